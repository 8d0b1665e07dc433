pub mod admin_store;
pub mod verifier;

pub use admin_store::{AdminStore, AdminStoreError, AdminUser};
pub use verifier::{AuthContext, Claims, TokenVerifier};
