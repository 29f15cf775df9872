//! Writer authentication implementations.

mod password;
mod session;

pub use password::{Argon2PasswordVerifier, LockedPasswordVerifier};
pub use session::{JwtSessionService, SessionConfig};
