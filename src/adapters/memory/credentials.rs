//! Reproducible password generation.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::credential::{self, CredentialError, Secret};
use crate::ports::CredentialGenerator;

/// Draws passwords from a seeded `StdRng`.
///
/// Same seed, same passwords. The character-class guarantee is unchanged;
/// only the source of randomness is predictable, so this never backs a live
/// context.
#[derive(Debug)]
pub struct SeededCredentialGenerator {
    rng: Mutex<StdRng>,
}

impl SeededCredentialGenerator {
    /// Creates a generator from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl CredentialGenerator for SeededCredentialGenerator {
    fn generate(&self, length: usize) -> Result<Secret, CredentialError> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        credential::generate_with(&mut *rng, length)
    }
}
