/*
 * Responsibility
 * - Admin user response DTOs
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::services::auth::AdminUser;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub aud: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<AdminUser> for UserResponse {
    fn from(user: AdminUser) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            aud: user.aud,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
