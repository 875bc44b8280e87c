//! Account domain - registered users and their credentials.

mod aggregate;
mod email;
mod errors;

pub use aggregate::{validate_password, ProfileUpdate, User, UserUpdate, PASSWORD_MIN_LEN};
pub use email::Email;
pub use errors::UserError;
