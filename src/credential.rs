//! Temporary passwords for new accounts, and their hashes.
//!
//! A generated password always contains at least one uppercase letter, one
//! lowercase letter, one digit and one character of [`SYMBOLS`]. Every
//! selection and the final shuffle draw from the caller's RNG, which must be
//! a [`CryptoRng`]; [`generate`] uses the operating system's generator.

use std::fmt;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Password length used when none is configured.
pub const DEFAULT_LENGTH: usize = 12;
/// Shortest length that can hold one character of every class.
pub const MIN_LENGTH: usize = 4;
/// The symbol class.
pub const SYMBOLS: &str = "!@#$%^&*";

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";

/// Credential generation and hashing failures.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum CredentialError {
    /// Requested length cannot satisfy the character-class guarantee.
    #[error("password length {length} is below the minimum of {minimum}")]
    TooShort {
        /// The requested length.
        length: usize,
        /// The minimum supported length.
        minimum: usize,
    },
    /// Argon2 refused to hash the password.
    #[error("failed to hash password: {message}")]
    Hashing {
        /// The hasher's error message.
        message: String,
    },
}

/// A plaintext password that keeps itself out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a plaintext value.
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self(plaintext.into())
    }

    /// Reveals the plaintext.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([redacted])")
    }
}

/// Generates a password of `length` characters from the given RNG.
///
/// # Errors
///
/// Returns [`CredentialError::TooShort`] when `length` is below [`MIN_LENGTH`].
pub fn generate_with<R>(rng: &mut R, length: usize) -> Result<Secret, CredentialError>
where
    R: Rng + CryptoRng + ?Sized,
{
    if length < MIN_LENGTH {
        return Err(CredentialError::TooShort { length, minimum: MIN_LENGTH });
    }

    let classes: [&[u8]; 4] = [UPPER, LOWER, DIGITS, SYMBOLS.as_bytes()];
    let pool = classes.concat();

    let mut chars = Vec::with_capacity(length);
    for class in classes {
        chars.push(pick(rng, class));
    }
    while chars.len() < length {
        chars.push(pick(rng, &pool));
    }
    chars.shuffle(rng);

    Ok(Secret(chars.into_iter().map(char::from).collect()))
}

/// Generates a password of `length` characters using [`OsRng`].
///
/// # Errors
///
/// Returns [`CredentialError::TooShort`] when `length` is below [`MIN_LENGTH`].
pub fn generate(length: usize) -> Result<Secret, CredentialError> {
    generate_with(&mut OsRng, length)
}

fn pick<R: Rng + ?Sized>(rng: &mut R, class: &[u8]) -> u8 {
    class[rng.gen_range(0..class.len())]
}

/// Hashes a password into an Argon2id PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns [`CredentialError::Hashing`] if Argon2 rejects the input.
pub fn hash_password(secret: &Secret) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.expose().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hashing { message: e.to_string() })
}

/// Checks a password against a stored PHC string.
///
/// Malformed hashes never verify.
#[must_use]
pub fn verify_password(secret: &Secret, phc: &str) -> bool {
    PasswordHash::new(phc).is_ok_and(|parsed| {
        Argon2::default().verify_password(secret.expose().as_bytes(), &parsed).is_ok()
    })
}
