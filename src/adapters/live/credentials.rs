//! Live adapter for the `CredentialGenerator` port.

use crate::credential::{self, CredentialError, Secret};
use crate::ports::CredentialGenerator;

/// Generates passwords from the operating system's secure RNG.
pub struct OsCredentialGenerator;

impl CredentialGenerator for OsCredentialGenerator {
    fn generate(&self, length: usize) -> Result<Secret, CredentialError> {
        credential::generate(length)
    }
}
