use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Verified bearer-token claims.
///
/// NOTE:
/// - `aud` is the tenant audience the token is scoped to; an empty string
///   means the token carried none.
/// - `iat` is required: the typed field rejects tokens that omit it or carry
///   a non-numeric value.
/// - Application-defined claims land in `extra` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub aud: String,
    pub exp: u64,
    pub iat: u64,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Request-scoped authentication context.
///
/// Only the verifier constructs this; middleware puts it into request
/// extensions and handlers read it from there. Discarded with the request,
/// never cached.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub claims: Claims,
}

impl AuthContext {
    pub(crate) fn new(claims: Claims) -> Self {
        Self { claims }
    }
}

/// HS256-only bearer-token verifier.
///
/// The algorithm list is a deliberate allow-list: a token whose header
/// declares anything other than HS256 fails verification outright, even with
/// a valid signature. Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        // `aud` is data here, not an expectation: tokens are audience-scoped
        // and which audience the caller may act on is decided later by the
        // admin authorizer. Without this, default validation rejects every
        // audience-bearing token since no expected audience is configured.
        validation.validate_aud = false;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify signature and temporal claims, then decode into `Claims`.
    ///
    /// `jsonwebtoken::Validation` checks:
    /// - signature (against the process-wide secret)
    /// - declared algorithm is in the allow-list (HS256 only)
    /// - `exp` with the configured leeway
    ///
    /// The typed `Claims` struct additionally requires `sub`, `exp` and `iat`
    /// to be present and well-formed.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Verify and wrap into the request-scoped context.
    ///
    /// This is the only code path that produces a trusted `AuthContext`.
    pub fn authenticate(&self, token: &str) -> Result<AuthContext, jsonwebtoken::errors::Error> {
        let claims = self.verify(token)?;
        Ok(AuthContext::new(claims))
    }
}
