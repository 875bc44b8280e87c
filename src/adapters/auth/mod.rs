//! Authentication adapters.
//!
//! - `jwt` - HS256 token issuing and validation
//! - `password` - PBKDF2 password hashing
//! - `mock` - in-memory session validator for tests

mod jwt;
mod mock;
mod password;

pub use jwt::{JwtSessionValidator, JwtTokenIssuer};
pub use mock::MockSessionValidator;
pub use password::{Pbkdf2Hasher, DEFAULT_ITERATIONS};
