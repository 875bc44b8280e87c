//! Access-token issuing port. The validating side is `SessionValidator`.

use serde::Serialize;

use crate::domain::account::User;
use crate::domain::foundation::{DomainError, Timestamp};

/// A signed bearer token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> Result<IssuedToken, DomainError>;
}
