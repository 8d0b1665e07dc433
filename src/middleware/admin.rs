//! Admin authorization: re-resolve the acting user from storage, resolve the
//! target audience (claims default, request-body override), check membership.
//!
//! Runs strictly after `auth::require_authentication`. Lookup failures and
//! membership denials both surface as `Unauthorized` so an unauthenticated
//! caller cannot probe which audiences exist.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::services::auth::AuthContext;
use crate::state::AppState;

// Upper bound for buffering an override body; anything privileged and larger
// than this is not a legitimate audience override.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Optional request-body shape letting an admin target an audience other
/// than the one embedded in their own claims.
#[derive(Debug, Default, Deserialize)]
struct AdminTargetParams {
    #[serde(default)]
    user: AdminTargetUser,
}

#[derive(Debug, Default, Deserialize)]
struct AdminTargetUser {
    #[serde(default)]
    aud: String,
}

/// Audience the request was cleared to administer. Inserted into request
/// extensions for handlers to scope their queries by.
#[derive(Debug, Clone)]
pub struct AdminAudience(pub String);

/// Apply the admin gate to a router. `auth::apply` must wrap the result so
/// the `AuthContext` extension is present when this runs.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, require_admin))
}

/// Middleware entry point for privileged routes.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = req
        .extensions()
        .get::<AuthContext>()
        .cloned()
        .ok_or(AppError::Unauthorized)?;

    // Fail closed: the admin check re-confirms identity against storage and
    // never falls back to claims alone.
    let admin = match state.admin_store.current_admin_user(&ctx).await {
        Ok(user) => user,
        Err(err) => {
            tracing::warn!(error = %err, "admin user lookup failed");
            return Err(AppError::Unauthorized);
        }
    };

    // Buffer the body so it can both be inspected here and handed on to the
    // handler unchanged.
    let (parts, body) = req.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => return Err(classify_body_error(&err)),
    };

    let audience = resolve_audience(
        &ctx.claims.aud,
        state.default_audience.as_deref(),
        &bytes,
    )?;

    if !state.admin_store.is_admin(&admin, &audience) {
        tracing::warn!(user_id = %admin.id, %audience, "admin membership check rejected");
        return Err(AppError::Unauthorized);
    }

    let mut req = Request::from_parts(parts, Body::from(bytes));
    req.extensions_mut().insert(AdminAudience(audience));

    Ok(next.run(req).await)
}

/// Split body-read failures by fault: a body blowing past the length limit
/// is a caller error, anything else is a local transport fault.
fn classify_body_error(err: &axum::Error) -> AppError {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(cause) = source {
        if cause.downcast_ref::<http_body_util::LengthLimitError>().is_some() {
            return AppError::InvalidRequest("request body too large".to_string());
        }
        source = cause.source();
    }

    tracing::error!(error = %err, "failed to read request body");
    AppError::Internal
}

/// Determine the audience the admin acts on.
///
/// Default is the verified claims' audience (or the configured fallback when
/// the claims carry none). A non-empty body containing a non-empty
/// `user.aud` overrides the default; an empty or absent field never does. A
/// body that is present but does not decode is a caller error, not "no
/// override".
fn resolve_audience(
    claims_aud: &str,
    default_audience: Option<&str>,
    body: &[u8],
) -> Result<String, AppError> {
    let mut audience = if claims_aud.is_empty() {
        default_audience.unwrap_or_default().to_string()
    } else {
        claims_aud.to_string()
    };

    if !body.is_empty() {
        let params: AdminTargetParams = serde_json::from_slice(body).map_err(|err| {
            AppError::InvalidRequest(format!("could not decode admin target params: {}", err))
        })?;

        if !params.user.aud.is_empty() {
            tracing::info!(
                default = %audience,
                target = %params.user.aud,
                "request body overrides admin target audience"
            );
            audience = params.user.aud;
        }
    }

    Ok(audience)
}
