//! `hrms password` commands.

use crate::context::ServiceContext;
use crate::credential::CredentialError;

use super::CommandError;

/// Execute `password generate`.
///
/// # Errors
///
/// Returns a usage error when `length` is too short to hold every
/// character class.
pub fn generate(ctx: &ServiceContext, length: usize) -> Result<(), CommandError> {
    let secret = ctx.credentials.generate(length).map_err(|e| match e {
        CredentialError::TooShort { .. } => CommandError::usage(e.to_string()),
        CredentialError::Hashing { .. } => CommandError::from(e.to_string()),
    })?;
    println!("{}", secret.expose());
    Ok(())
}
