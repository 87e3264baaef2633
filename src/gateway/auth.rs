//! Shared-secret predicates applied at the boundary.

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::warn;

/// Authorization failures.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No credential was presented.
    #[error("missing credential")]
    MissingCredential,
    /// The presented credential does not match.
    #[error("invalid credential")]
    InvalidCredential,
    /// Admin login is not configured.
    #[error("admin login is disabled")]
    AdminLoginDisabled,
}

type SecretDigest = [u8; 32];

fn digest(secret: &str) -> SecretDigest {
    Sha256::digest(secret.as_bytes()).into()
}

fn matches(expected: &SecretDigest, presented: &str) -> bool {
    // Fixed-length digests keep the comparison independent of secret length.
    digest(presented)
        .iter()
        .zip(expected)
        .fold(0_u8, |acc, (left, right)| acc | (left ^ right))
        == 0
}

/// Checks the shared API key presented with every request.
#[derive(Clone)]
pub struct ApiKeyGuard {
    expected: SecretDigest,
}

impl ApiKeyGuard {
    /// Creates a guard for the given key.
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self {
            expected: digest(api_key),
        }
    }

    /// Authorizes a request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredential`] when no key was presented
    /// and [`AuthError::InvalidCredential`] when it does not match.
    pub fn authorize(&self, presented: Option<&str>) -> Result<(), AuthError> {
        let Some(key) = presented else {
            warn!("request without api key rejected");
            return Err(AuthError::MissingCredential);
        };
        if matches(&self.expected, key) {
            Ok(())
        } else {
            warn!("request with invalid api key rejected");
            Err(AuthError::InvalidCredential)
        }
    }
}

impl std::fmt::Debug for ApiKeyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyGuard").finish_non_exhaustive()
    }
}

/// Checks the admin password; disabled when no password is configured.
#[derive(Clone, Default)]
pub struct AdminGuard {
    expected: Option<SecretDigest>,
}

impl AdminGuard {
    /// Creates a guard; `None` disables admin login.
    #[must_use]
    pub fn new(password: Option<&str>) -> Self {
        Self {
            expected: password.map(digest),
        }
    }

    /// Checks an admin login attempt.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AdminLoginDisabled`] when no password is
    /// configured and [`AuthError::InvalidCredential`] on mismatch.
    pub fn login(&self, password: &str) -> Result<(), AuthError> {
        let Some(expected) = self.expected.as_ref() else {
            return Err(AuthError::AdminLoginDisabled);
        };
        if matches(expected, password) {
            Ok(())
        } else {
            warn!("admin login rejected");
            Err(AuthError::InvalidCredential)
        }
    }
}

impl std::fmt::Debug for AdminGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGuard")
            .field("enabled", &self.expected.is_some())
            .finish()
    }
}
