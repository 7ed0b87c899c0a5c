//! User Password Value Object
//!
//! Domain value object for user passwords.
//! Delegates to `platform::password` for cryptographic operations; hashing
//! and verification run on the blocking thread pool.

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    ///
    /// Non-empty, at most 128 characters, no control characters, NFKC
    /// normalized.
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::Empty => AuthError::InvalidParam("password is required".into()),
            PasswordPolicyError::TooLong { max, .. } => {
                AuthError::InvalidParam(format!("password must be at most {} characters", max))
            }
            PasswordPolicyError::InvalidCharacter => {
                AuthError::InvalidParam("password contains invalid characters".into())
            }
        })?;

        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

fn hash_error(e: PasswordHashError) -> AuthError {
    AuthError::Internal(e.to_string())
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
///
/// Argon2id PHC string. Never serialized into responses.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password
    pub async fn from_raw(raw: RawPassword) -> AuthResult<Self> {
        let hashed = raw.0.hash_blocking().await.map_err(hash_error)?;
        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AuthResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".into()))?;

        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash (constant time)
    pub async fn verify(&self, raw: RawPassword) -> AuthResult<bool> {
        self.0.verify_blocking(raw.0).await.map_err(hash_error)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(s: &str) -> RawPassword {
        RawPassword::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("pw123".to_string()).is_ok());
        assert!(matches!(
            RawPassword::new(String::new()),
            Err(AuthError::InvalidParam(_))
        ));
        assert!(RawPassword::new("a".repeat(129)).is_err());
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hashed = UserPassword::from_raw(raw("pw123")).await.unwrap();

        assert!(hashed.verify(raw("pw123")).await.unwrap());
        assert!(!hashed.verify(raw("wrong")).await.unwrap());
    }

    #[tokio::test]
    async fn test_phc_string_roundtrip() {
        let hashed = UserPassword::from_raw(raw("TestPassword123!")).await.unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(raw("TestPassword123!")).await.unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_internal() {
        assert!(matches!(
            UserPassword::from_phc_string("garbage"),
            Err(AuthError::Internal(_))
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let debug = format!("{:?}", raw("SecretPassword123!"));
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));
    }
}
