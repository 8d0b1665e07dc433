use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::services::auth::verifier::AuthContext;

/// The acting administrative principal, re-resolved from storage on every
/// privileged request. Never derived from claims alone and never cached.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub aud: String,
    pub role: String,
    pub is_super_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum AdminStoreError {
    #[error("no user for authenticated subject")]
    NotFound,

    #[error("subject claim is not a valid user id")]
    InvalidSubject,

    #[error(transparent)]
    Store(#[from] RepoError),
}

/// User-storage collaborator consumed by the admin authorizer and the admin
/// handlers.
///
/// `current_admin_user` must be safe to call repeatedly with identical
/// results for identical input within one request's lifetime. The query
/// operations are scoped to a tenant audience: a user outside the given
/// audience is reported absent, never leaked across tenants.
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Resolve the acting principal for an already-verified context.
    async fn current_admin_user(&self, ctx: &AuthContext) -> Result<AdminUser, AdminStoreError>;

    /// Membership/policy decision: does `user` hold administrative rights
    /// over `audience`?
    fn is_admin(&self, user: &AdminUser, audience: &str) -> bool;

    /// All users belonging to `aud`.
    async fn list_users(&self, aud: &str) -> Result<Vec<AdminUser>, AdminStoreError>;

    /// A single user, only if it belongs to `aud`.
    async fn find_user(&self, user_id: Uuid, aud: &str)
    -> Result<Option<AdminUser>, AdminStoreError>;

    /// Delete a user, only if it belongs to `aud`. Returns whether a row
    /// was removed.
    async fn delete_user(&self, user_id: Uuid, aud: &str) -> Result<bool, AdminStoreError>;
}
