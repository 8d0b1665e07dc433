/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Clone is cheap (Arc internals); all storage access goes through the
 *   AdminStore seam
 */
use std::sync::Arc;

use crate::services::auth::{AdminStore, TokenVerifier};

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub admin_store: Arc<dyn AdminStore>,
    pub default_audience: Option<String>,
}

impl AppState {
    pub fn new(
        verifier: Arc<TokenVerifier>,
        admin_store: Arc<dyn AdminStore>,
        default_audience: Option<String>,
    ) -> Self {
        Self {
            verifier,
            admin_store,
            default_audience,
        }
    }
}
