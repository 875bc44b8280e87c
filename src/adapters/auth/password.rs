//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Encoded form: `pbkdf2-sha256$<iterations>$<salt-hex>$<hash-hex>`.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Default work factor for production use.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

#[derive(Debug, Clone)]
pub struct Pbkdf2Hasher {
    iterations: u32,
}

impl Pbkdf2Hasher {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }
}

impl Default for Pbkdf2Hasher {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

/// Single-block PBKDF2; a SHA-256 output is exactly one block.
fn derive(password: &[u8], salt: &[u8], iterations: u32) -> Result<[u8; KEY_LEN], DomainError> {
    let keyed = || {
        HmacSha256::new_from_slice(password).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Invalid HMAC key: {}", e))
        })
    };

    let mut mac = keyed()?;
    mac.update(salt);
    mac.update(&1u32.to_be_bytes());
    let mut block = [0u8; KEY_LEN];
    block.copy_from_slice(&mac.finalize().into_bytes());
    let mut output = block;

    for _ in 1..iterations {
        let mut mac = keyed()?;
        mac.update(&block);
        block.copy_from_slice(&mac.finalize().into_bytes());
        for (out, b) in output.iter_mut().zip(block.iter()) {
            *out ^= b;
        }
    }
    Ok(output)
}

struct Encoded {
    iterations: u32,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

fn parse(encoded: &str) -> Option<Encoded> {
    let mut parts = encoded.split('$');
    if parts.next()? != SCHEME {
        return None;
    }
    let iterations = parts.next()?.parse().ok().filter(|n| *n > 0)?;
    let salt = hex::decode(parts.next()?).ok()?;
    let hash = hex::decode(parts.next()?).ok()?;
    if parts.next().is_some() || hash.len() != KEY_LEN {
        return None;
    }
    Some(Encoded {
        iterations,
        salt,
        hash,
    })
}

impl PasswordHasher for Pbkdf2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let hash = derive(password.as_bytes(), &salt, self.iterations)?;
        Ok(format!(
            "{}${}${}${}",
            SCHEME,
            self.iterations,
            hex::encode(salt),
            hex::encode(hash)
        ))
    }

    fn verify(&self, password: &str, encoded: &str) -> bool {
        let Some(stored) = parse(encoded) else {
            tracing::warn!("Stored password hash has an unknown format");
            return false;
        };
        match derive(password.as_bytes(), &stored.salt, stored.iterations) {
            Ok(candidate) => candidate[..].ct_eq(&stored.hash[..]).into(),
            Err(_) => false,
        }
    }
}
