//! Argon2 writer password check.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier as _, SaltString, rand_core::OsRng},
};

use journal_core::ports::{AuthError, PasswordVerifier};

/// Verifies login attempts against one Argon2 PHC hash.
///
/// A plaintext password from the environment is hashed once at startup.
pub struct Argon2PasswordVerifier {
    argon2: Argon2<'static>,
    hash: String,
}

impl Argon2PasswordVerifier {
    pub fn from_password(password: &str) -> Result<Self, AuthError> {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(Self { argon2, hash })
    }

    /// Use a precomputed PHC string (`$argon2id$...`).
    pub fn from_hash(hash: impl Into<String>) -> Result<Self, AuthError> {
        let hash = hash.into();
        PasswordHash::new(&hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::default(),
            hash,
        })
    }
}

impl PasswordVerifier for Argon2PasswordVerifier {
    fn verify(&self, password: &str) -> Result<bool, AuthError> {
        let parsed_hash =
            PasswordHash::new(&self.hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Used when no writer password is configured. Every login is refused.
pub struct LockedPasswordVerifier;

impl PasswordVerifier for LockedPasswordVerifier {
    fn verify(&self, _password: &str) -> Result<bool, AuthError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let verifier = Argon2PasswordVerifier::from_password("secure_password_123").unwrap();

        assert!(verifier.verify("secure_password_123").unwrap());
        assert!(!verifier.verify("wrong_password").unwrap());
    }

    #[test]
    fn test_from_precomputed_hash() {
        let original = Argon2PasswordVerifier::from_password("tea and toast").unwrap();

        let verifier = Argon2PasswordVerifier::from_hash(original.hash.clone()).unwrap();

        assert!(verifier.verify("tea and toast").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_rejected() {
        let result = Argon2PasswordVerifier::from_hash("not-a-phc-string");

        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }

    #[test]
    fn test_locked_verifier_refuses_everything() {
        assert!(!LockedPasswordVerifier.verify("").unwrap());
    }
}
