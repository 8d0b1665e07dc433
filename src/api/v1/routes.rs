/*
 * Responsibility
 * - v1 URL structure
 * - /health is public; everything under /admin goes through the full
 *   authentication → admin-authorization gate
 */
use axum::{Router, routing::get};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    admin_users::{delete_user, get_user, list_users},
    health::health,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{user_id}", get(get_user).delete(delete_user));

    // Gate order: authentication must run before the admin check, so the
    // auth layer is applied last (outermost).
    let admin = middleware::admin::apply(admin, state.clone());
    let admin = middleware::auth::apply(admin, state);

    Router::new().route("/health", get(health)).merge(admin)
}
