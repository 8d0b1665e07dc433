pub mod admin_user_repo;
pub mod error;
