//! HS256 bearer tokens.
//!
//! `JwtTokenIssuer` signs tokens at login/registration; `JwtSessionValidator`
//! verifies them and reloads the account, so a role change or a deleted user
//! takes effect on the very next request.

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::access::Role;
use crate::domain::account::User;
use crate::domain::foundation::{
    AuthError, AuthenticatedUser, DomainError, ErrorCode, Timestamp, UserId,
};
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer, UserRepository};

/// Claims carried by every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    name: String,
    role: Role,
    iss: String,
    iat: i64,
    exp: i64,
}

pub struct JwtTokenIssuer {
    key: EncodingKey,
    issuer: String,
    ttl_secs: i64,
}

impl JwtTokenIssuer {
    pub fn new(secret: &Secret<String>, issuer: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            issuer: issuer.into(),
            ttl_secs,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User) -> Result<IssuedToken, DomainError> {
        let now = Timestamp::now();
        let expires_at = now.plus_secs(self.ttl_secs);
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.name.clone(),
            role: user.role,
            iss: self.issuer.clone(),
            iat: now.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.key).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Failed to sign token: {}", e))
        })?;

        Ok(IssuedToken { token, expires_at })
    }
}

impl std::fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenIssuer")
            .field("issuer", &self.issuer)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

pub struct JwtSessionValidator {
    key: DecodingKey,
    validation: Validation,
    users: Arc<dyn UserRepository>,
}

impl JwtSessionValidator {
    pub fn new(
        secret: &Secret<String>,
        issuer: impl Into<String>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer.into()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;

        Self {
            key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
            users,
        }
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.decode_claims(token)?;

        let user_id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to load user for token");
                AuthError::service_unavailable(e.message)
            })?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, "Token for deleted user");
                AuthError::UserNotFound
            })?;

        // Current account state wins over whatever the token says.
        Ok(AuthenticatedUser::new(
            user.id,
            user.email.as_str(),
            user.name,
            user.role,
        ))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("iss", &self.validation.iss)
            .finish_non_exhaustive()
    }
}
