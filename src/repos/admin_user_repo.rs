/*
 * Responsibility
 * - SQLx access to the users table
 * - PgAdminStore: the storage-backed AdminStore implementation
 * - Query operations other than principal lookup are audience-scoped in SQL
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::services::auth::{AdminStore, AdminStoreError, AdminUser, AuthContext};

#[derive(Debug, FromRow)]
pub struct AdminUserRow {
    pub id: Uuid,
    pub email: String,
    pub aud: String,
    pub role: String,
    pub is_super_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AdminUserRow> for AdminUser {
    fn from(row: AdminUserRow) -> Self {
        AdminUser {
            id: row.id,
            email: row.email,
            aud: row.aud,
            role: row.role,
            is_super_admin: row.is_super_admin,
            created_at: row.created_at,
        }
    }
}

pub async fn find_by_id(db: &PgPool, user_id: Uuid) -> Result<Option<AdminUserRow>, RepoError> {
    let row = sqlx::query_as::<_, AdminUserRow>(
        r#"
        SELECT id, email, aud, role, is_super_admin, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn find_in_aud(
    db: &PgPool,
    user_id: Uuid,
    aud: &str,
) -> Result<Option<AdminUserRow>, RepoError> {
    let row = sqlx::query_as::<_, AdminUserRow>(
        r#"
        SELECT id, email, aud, role, is_super_admin, created_at
        FROM users
        WHERE id = $1 AND aud = $2
        "#,
    )
    .bind(user_id)
    .bind(aud)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn list_by_aud(db: &PgPool, aud: &str) -> Result<Vec<AdminUserRow>, RepoError> {
    let rows = sqlx::query_as::<_, AdminUserRow>(
        r#"
        SELECT id, email, aud, role, is_super_admin, created_at
        FROM users
        WHERE aud = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(aud)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn delete_in_aud(db: &PgPool, user_id: Uuid, aud: &str) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE id = $1 AND aud = $2
        "#,
    )
    .bind(user_id)
    .bind(aud)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Membership rule for the service's tenancy model: a super admin
/// administers any audience; everyone else must hold the configured admin
/// role and match the target audience exactly.
fn has_admin_rights(user: &AdminUser, audience: &str, admin_role: &str) -> bool {
    user.is_super_admin || (audience == user.aud && user.role == admin_role)
}

/// Postgres-backed admin-user lookup, membership policy and audience-scoped
/// user queries.
#[derive(Clone)]
pub struct PgAdminStore {
    db: PgPool,
    admin_role: String,
}

impl PgAdminStore {
    pub fn new(db: PgPool, admin_role: String) -> Self {
        Self { db, admin_role }
    }
}

#[async_trait]
impl AdminStore for PgAdminStore {
    async fn current_admin_user(&self, ctx: &AuthContext) -> Result<AdminUser, AdminStoreError> {
        let user_id = Uuid::parse_str(&ctx.claims.sub)
            .map_err(|_| AdminStoreError::InvalidSubject)?;

        let row = find_by_id(&self.db, user_id)
            .await?
            .ok_or(AdminStoreError::NotFound)?;

        Ok(row.into())
    }

    fn is_admin(&self, user: &AdminUser, audience: &str) -> bool {
        has_admin_rights(user, audience, &self.admin_role)
    }

    async fn list_users(&self, aud: &str) -> Result<Vec<AdminUser>, AdminStoreError> {
        let rows = list_by_aud(&self.db, aud).await?;
        Ok(rows.into_iter().map(AdminUser::from).collect())
    }

    async fn find_user(
        &self,
        user_id: Uuid,
        aud: &str,
    ) -> Result<Option<AdminUser>, AdminStoreError> {
        let row = find_in_aud(&self.db, user_id, aud).await?;
        Ok(row.map(AdminUser::from))
    }

    async fn delete_user(&self, user_id: Uuid, aud: &str) -> Result<bool, AdminStoreError> {
        Ok(delete_in_aud(&self.db, user_id, aud).await?)
    }
}
