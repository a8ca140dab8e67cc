//! Login id allocation.
//!
//! The allocator derives the deterministic prefix of a login id, picks the
//! starting serial from the highest serial already used in the same
//! (organization, join year) scope, and then probes the store for an exact
//! collision, bumping the serial until a free id is found or
//! [`MAX_ATTEMPTS`] probes have collided.
//!
//! Allocation is read-only. Two concurrent allocations for one scope can
//! return the same id; the store's uniqueness constraint on insert is what
//! catches that, and [`onboarding`](crate::onboarding) re-allocates on
//! conflict.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::{debug, error};

use crate::employee::EmployeeRecord;
use crate::login_id::{trailing_serial, LoginId, LoginPrefix};
use crate::ports::store::{EmployeeStore, StoreError};

/// Existence checks performed before giving up.
pub const MAX_ATTEMPTS: usize = 100;

/// Allocation failures.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// A required attribute is missing or unusable.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// Every candidate collided, or the serial space of the scope is full.
    #[error("no free login id in {scope} after {attempts} attempts")]
    AllocationExhausted {
        /// The (organization, year) scope, as `organization/year`.
        scope: String,
        /// Existence checks performed.
        attempts: usize,
    },
    /// The store failed while answering a query.
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

/// The attributes a login id is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRequest {
    /// Organization name.
    pub organization: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Join date.
    pub joined_on: NaiveDate,
}

impl AllocationRequest {
    /// Checks that every attribute can contribute to a login id.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::InvalidInput`] for blank names or a join
    /// year outside `1..=9999`.
    pub fn validate(&self) -> Result<(), AllocationError> {
        for (field, value) in [
            ("organization", &self.organization),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
        ] {
            if value.trim().is_empty() {
                return Err(AllocationError::InvalidInput {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if !(1..=9999).contains(&self.joined_on.year()) {
            return Err(AllocationError::InvalidInput {
                field: "joined_on",
                reason: format!("year {} does not fit four digits", self.joined_on.year()),
            });
        }
        Ok(())
    }

    fn year_bounds(&self) -> Result<(NaiveDate, NaiveDate), AllocationError> {
        let year = self.joined_on.year();
        NaiveDate::from_yo_opt(year, 1)
            .zip(NaiveDate::from_yo_opt(year + 1, 1))
            .ok_or_else(|| AllocationError::InvalidInput {
                field: "joined_on",
                reason: format!("year {year} is out of range"),
            })
    }
}

/// Allocates login ids against an employee store.
pub struct Allocator<'a> {
    store: &'a dyn EmployeeStore,
}

impl<'a> Allocator<'a> {
    /// Creates an allocator reading from `store`.
    #[must_use]
    pub fn new(store: &'a dyn EmployeeStore) -> Self {
        Self { store }
    }

    /// Allocates a login id for `request`.
    ///
    /// The returned id did not exist when it was checked. The caller must
    /// persist it with a uniqueness constraint.
    ///
    /// # Errors
    ///
    /// - [`AllocationError::InvalidInput`] if `request` fails validation.
    /// - [`AllocationError::AllocationExhausted`] after [`MAX_ATTEMPTS`]
    ///   collisions or when the serial would pass 9999.
    /// - [`AllocationError::StoreUnavailable`] if any store query fails.
    pub async fn allocate(&self, request: &AllocationRequest) -> Result<LoginId, AllocationError> {
        request.validate()?;
        let (from, until) = request.year_bounds()?;
        let organization = request.organization.trim();
        let prefix = LoginPrefix::derive(
            organization,
            &request.first_name,
            &request.last_name,
            request.joined_on,
        );
        let scope = format!("{organization}/{}", prefix.year());

        let existing = self.store.find_joined_between(organization, from, until).await?;
        let mut serial = next_serial(&existing);
        debug!(%scope, existing = existing.len(), serial, "starting login id allocation");

        for attempt in 0..MAX_ATTEMPTS {
            let Some(candidate) =
                u16::try_from(serial).ok().and_then(|s| LoginId::compose(&prefix, s))
            else {
                error!(%scope, attempts = attempt, "serial space exhausted");
                return Err(AllocationError::AllocationExhausted { scope, attempts: attempt });
            };

            if !self.store.login_id_exists(&candidate).await? {
                debug!(login_id = %candidate, attempts = attempt + 1, "allocated login id");
                return Ok(candidate);
            }

            debug!(login_id = %candidate, "login id collision");
            serial += 1;
        }

        error!(%scope, attempts = MAX_ATTEMPTS, "login id allocation exhausted");
        Err(AllocationError::AllocationExhausted { scope, attempts: MAX_ATTEMPTS })
    }
}

/// One past the highest well-formed serial among `records`, or 1.
fn next_serial(records: &[EmployeeRecord]) -> u32 {
    records
        .iter()
        .filter_map(|record| trailing_serial(&record.login_id))
        .max()
        .map_or(1, |max| u32::from(max) + 1)
}
