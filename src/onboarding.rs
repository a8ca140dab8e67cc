//! Employee creation: allocate a login id, issue a temporary password,
//! persist the record and hand the password to the new employee.
//!
//! The allocator only reads. Persistence goes through
//! [`EmployeeStore::insert`], whose uniqueness constraint turns a lost race
//! between two onboardings into [`StoreError::Conflict`]; the workflow then
//! allocates again, up to [`OnboardingSettings::write_attempts`] times.

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::allocator::{AllocationError, AllocationRequest, Allocator};
use crate::config::{Config, DEFAULT_WRITE_ATTEMPTS};
use crate::context::ServiceContext;
use crate::credential::{self, CredentialError, Secret, DEFAULT_LENGTH};
use crate::employee::{EmployeeRecord, EmployeeStatus, NewEmployee, Role};
use crate::login_id::LoginId;
use crate::ports::notifier::Welcome;
use crate::ports::store::StoreError;

/// Onboarding failures.
#[derive(Debug, Error)]
pub enum OnboardError {
    /// A supplied attribute is missing or malformed.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// The acting role may not create employees.
    #[error("role {role} may not onboard employees")]
    Forbidden {
        /// The acting role.
        role: Role,
    },
    /// The store failed or refused the record.
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
    /// No login id could be allocated in the scope.
    #[error("no free login id in {scope} after {attempts} attempts")]
    AllocationExhausted {
        /// The (organization, year) scope.
        scope: String,
        /// Existence checks performed.
        attempts: usize,
    },
    /// Every insert lost a race for its login id.
    #[error("login id taken by a concurrent write {attempts} times in a row")]
    WriteConflict {
        /// Inserts attempted.
        attempts: u32,
    },
    /// The temporary password could not be produced.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl OnboardError {
    /// Process exit code: 2 for caller mistakes, 1 for everything else.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput { .. } | Self::Forbidden { .. } => 2,
            Self::StoreUnavailable(_)
            | Self::AllocationExhausted { .. }
            | Self::WriteConflict { .. }
            | Self::Credential(_) => 1,
        }
    }
}

impl From<AllocationError> for OnboardError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::InvalidInput { field, reason } => Self::InvalidInput { field, reason },
            AllocationError::AllocationExhausted { scope, attempts } => {
                Self::AllocationExhausted { scope, attempts }
            }
            AllocationError::StoreUnavailable(e) => Self::StoreUnavailable(e),
        }
    }
}

/// Tunables of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingSettings {
    /// Length of the temporary password.
    pub password_length: usize,
    /// Inserts attempted before giving up on write conflicts.
    pub write_attempts: u32,
}

impl Default for OnboardingSettings {
    fn default() -> Self {
        Self { password_length: DEFAULT_LENGTH, write_attempts: DEFAULT_WRITE_ATTEMPTS }
    }
}

impl From<&Config> for OnboardingSettings {
    fn from(config: &Config) -> Self {
        Self { password_length: config.password_length, write_attempts: config.write_attempts }
    }
}

/// Outcome of a successful onboarding. Carries no plaintext password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Onboarded {
    /// The allocated login id.
    pub login_id: LoginId,
    /// The record as persisted.
    pub record: EmployeeRecord,
    /// Whether the welcome message was delivered.
    pub notified: bool,
}

/// The employee-creation workflow over a [`ServiceContext`].
pub struct Onboarding<'a> {
    ctx: &'a ServiceContext,
    settings: OnboardingSettings,
}

impl<'a> Onboarding<'a> {
    /// Creates the workflow.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, settings: OnboardingSettings) -> Self {
        Self { ctx, settings }
    }

    /// Creates an employee on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// See [`OnboardError`]. A failed welcome delivery is not an error; it
    /// is reported through [`Onboarded::notified`].
    pub async fn onboard(&self, actor: Role, new: NewEmployee) -> Result<Onboarded, OnboardError> {
        if !actor.manages_employees() {
            warn!(role = %actor, "onboarding refused");
            return Err(OnboardError::Forbidden { role: actor });
        }

        let email = validate_email(&new.email)?;
        let request = AllocationRequest {
            organization: new.organization.trim().to_string(),
            first_name: new.first_name.trim().to_string(),
            last_name: new.last_name.trim().to_string(),
            joined_on: new.joined_on,
        };
        request.validate()?;

        let password = self.ctx.credentials.generate(self.settings.password_length)?;
        let password_hash = credential::hash_password(&password)?;
        let id = self.ctx.id_gen.generate_id();
        let created_at = self.ctx.clock.now();
        let allocator = Allocator::new(self.ctx.store.as_ref());

        for attempt in 1..=self.settings.write_attempts {
            let login_id = allocator.allocate(&request).await?;
            let record = EmployeeRecord {
                id: id.clone(),
                login_id: login_id.to_string(),
                organization: request.organization.clone(),
                first_name: request.first_name.clone(),
                last_name: request.last_name.clone(),
                email: email.clone(),
                joined_on: request.joined_on,
                role: new.role,
                status: EmployeeStatus::Active,
                password_hash: password_hash.clone(),
                created_at,
            };

            match self.ctx.store.insert(&record).await {
                Ok(()) => {
                    info!(%login_id, organization = %record.organization, "employee onboarded");
                    let notified = self.welcome(&record, &login_id, password);
                    return Ok(Onboarded { login_id, record, notified });
                }
                Err(StoreError::Conflict { login_id }) => {
                    warn!(%login_id, attempt, "login id taken before insert, allocating again");
                }
                Err(e) => return Err(e.into()),
            }
        }

        error!(attempts = self.settings.write_attempts, "giving up after repeated write conflicts");
        Err(OnboardError::WriteConflict { attempts: self.settings.write_attempts })
    }

    fn welcome(&self, record: &EmployeeRecord, login_id: &LoginId, password: Secret) -> bool {
        let welcome = Welcome {
            email: record.email.clone(),
            full_name: record.full_name(),
            login_id: login_id.clone(),
            password,
        };
        match self.ctx.notifier.send_welcome(&welcome) {
            Ok(()) => true,
            Err(e) => {
                error!(%login_id, error = %e, "welcome message not delivered");
                false
            }
        }
    }
}

/// Trims `email` and requires exactly one `@` between non-empty parts.
fn validate_email(email: &str) -> Result<String, OnboardError> {
    let email = email.trim();
    let invalid = |reason: &str| OnboardError::InvalidInput { field: "email", reason: reason.into() };
    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid("missing '@'"));
    };
    if domain.contains('@') {
        return Err(invalid("more than one '@'"));
    }
    if local.is_empty() || domain.is_empty() {
        return Err(invalid("empty local part or domain"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }
    Ok(email.to_string())
}
