/*
 * Responsibility
 * - /admin/users handlers
 * - Reached only after require_authentication + require_admin; every query
 *   is scoped by the resolved AdminAudience extension, so a user outside
 *   the cleared tenant is indistinguishable from a missing one
 */
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::api::v1::dto::users::UserResponse;
use crate::error::AppError;
use crate::middleware::admin::AdminAudience;
use crate::state::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(audience): Extension<AdminAudience>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state
        .admin_store
        .list_users(&audience.0)
        .await
        .map_err(store_error)?;
    let res = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(res))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(audience): Extension<AdminAudience>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .admin_store
        .find_user(user_id, &audience.0)
        .await
        .map_err(store_error)?
        .ok_or(AppError::NotFound)?;

    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(audience): Extension<AdminAudience>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = state
        .admin_store
        .delete_user(user_id, &audience.0)
        .await
        .map_err(store_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

fn store_error(err: crate::services::auth::AdminStoreError) -> AppError {
    tracing::error!(error = %err, "admin user query failed");
    AppError::Internal
}
