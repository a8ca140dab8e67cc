//! Credential generator port for temporary passwords.

use crate::credential::{CredentialError, Secret};

/// Produces temporary login passwords for new accounts.
pub trait CredentialGenerator: Send + Sync {
    /// Generates a password of exactly `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::TooShort`] when `length` cannot hold one
    /// character of every required class.
    fn generate(&self, length: usize) -> Result<Secret, CredentialError>;
}
