//! Authentication configuration: token signing and password hashing.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;
pub const MIN_PRODUCTION_ITERATIONS: u32 = 10_000;

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing key.
    #[serde(default = "empty_secret")]
    pub jwt_secret: Secret<String>,

    /// `iss` claim written and required on every token.
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,

    /// Token lifetime in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,

    /// PBKDF2 iteration count for new hashes.
    #[serde(default = "default_iterations")]
    pub password_iterations: u32,
}

impl AuthConfig {
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.jwt_issuer.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_ISSUER"));
        }
        if self.token_ttl_secs <= 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if self.password_iterations == 0 {
            return Err(ValidationError::TooFewIterations(1));
        }

        if environment == Environment::Production {
            if secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
            }
            if self.password_iterations < MIN_PRODUCTION_ITERATIONS {
                return Err(ValidationError::TooFewIterations(MIN_PRODUCTION_ITERATIONS));
            }
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: empty_secret(),
            jwt_issuer: default_issuer(),
            token_ttl_secs: default_token_ttl(),
            password_iterations: default_iterations(),
        }
    }
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

fn default_issuer() -> String {
    "eventhub".to_string()
}

fn default_token_ttl() -> i64 {
    30 * 24 * 60 * 60
}

fn default_iterations() -> u32 {
    crate::adapters::auth::DEFAULT_ITERATIONS
}
