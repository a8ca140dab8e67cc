//! Employee store port: the persistence boundary of the onboarding core.

use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::employee::EmployeeRecord;
use crate::login_id::LoginId;

/// Boxed future type alias used by [`EmployeeStore`] to keep the trait dyn-compatible.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Failures reported by an employee store.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum StoreError {
    /// An insert hit the uniqueness constraint on the login id.
    #[error("login id {login_id} is already taken")]
    Conflict {
        /// The login id that was already present.
        login_id: String,
    },
    /// The store refused a record it cannot hold.
    #[error("employee record rejected: {message}")]
    Rejected {
        /// Why the record was refused.
        message: String,
    },
    /// The store could not be reached or returned an I/O failure.
    #[error("employee store unavailable: {message}")]
    Unavailable {
        /// Description of the underlying failure.
        message: String,
    },
}

impl StoreError {
    /// Wraps any displayable failure as [`StoreError::Unavailable`].
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable { message: err.to_string() }
    }
}

/// Persists employee records and answers the allocator's queries.
///
/// Implementations must reject an [`insert`](EmployeeStore::insert) whose
/// login id already exists with [`StoreError::Conflict`]; that constraint is
/// what turns two racing allocations into a detectable failure.
pub trait EmployeeStore: Send + Sync {
    /// Returns every record of `organization` whose join date lies in
    /// `from..until`, ordered by descending login id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the query fails.
    fn find_joined_between(
        &self,
        organization: &str,
        from: NaiveDate,
        until: NaiveDate,
    ) -> StoreFuture<'_, Vec<EmployeeRecord>>;

    /// Returns whether a record with exactly this login id exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the lookup fails.
    fn login_id_exists(&self, login_id: &LoginId) -> StoreFuture<'_, bool>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the login id is taken, or
    /// [`StoreError::Unavailable`] if the write fails.
    fn insert(&self, record: &EmployeeRecord) -> StoreFuture<'_, ()>;

    /// Fetches a record by login id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the lookup fails.
    fn get(&self, login_id: &LoginId) -> StoreFuture<'_, Option<EmployeeRecord>>;

    /// Lists records ordered by login id, optionally limited to one organization.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the listing fails.
    fn list(&self, organization: Option<&str>) -> StoreFuture<'_, Vec<EmployeeRecord>>;
}
