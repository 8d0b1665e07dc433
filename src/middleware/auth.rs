//! Bearer-token authentication: header extraction → HS256 verification →
//! `AuthContext` in request extensions.
//!
//! Every failure surfaces as a generic `Unauthorized`; the concrete cause is
//! logged here and never reaches the caller.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Apply the authentication gate to a router.
///
/// Example:
/// ```ignore
/// let admin = api::v1::admin_routes();
/// let admin = middleware::admin::apply(admin, state.clone());
/// let admin = middleware::auth::apply(admin, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8's from_fn cannot take a State extractor on its own, so pass
    // state explicitly via from_fn_with_state
    router.layer(middleware::from_fn_with_state(state, require_authentication))
}

/// Middleware entry point for any route that needs a verified identity.
pub async fn require_authentication(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(req.headers())?;

    let ctx = match state.verifier.authenticate(token) {
        Ok(ctx) => ctx,
        Err(err) => {
            tracing::warn!(error = %err, "bearer token verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    // middleware → handler hand-off
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// Pull the bearer credential out of the Authorization header.
///
/// The scheme keyword is case-sensitive and followed by exactly one space;
/// the token capture must be non-empty and free of whitespace. Anything else
/// is treated as "no credential presented".
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = value.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(AppError::Unauthorized);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_err());
    }

    #[test]
    fn well_formed_header_yields_token() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn lowercase_scheme_is_rejected() {
        let headers = headers_with_auth("bearer abc.def.ghi");
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn missing_scheme_is_rejected() {
        let headers = headers_with_auth("abc.def.ghi");
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn empty_token_is_rejected() {
        let headers = headers_with_auth("Bearer ");
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn extra_space_is_rejected() {
        let headers = headers_with_auth("Bearer  abc.def.ghi");
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn token_with_embedded_space_is_rejected() {
        let headers = headers_with_auth("Bearer abc def");
        assert!(extract_bearer_token(&headers).is_err());
    }
}
