//! Writer authentication ports.

/// Claims carried by a writer session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub subject: String,
    pub exp: i64,
}

/// Issues and validates the writer's session token.
pub trait SessionService: Send + Sync {
    fn issue(&self) -> Result<String, AuthError>;

    fn validate(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Lifetime of an issued token.
    fn expiration_seconds(&self) -> i64;
}

/// Checks the writer's password.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, password: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Incorrect password")]
    InvalidCredentials,

    #[error("Session expired")]
    TokenExpired,

    #[error("Invalid session: {0}")]
    InvalidToken(String),

    #[error("Not signed in")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
