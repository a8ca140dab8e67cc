//! Employee records as persisted by the employee store.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Access level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Human-resources staff.
    Hr,
    /// Regular employee.
    Employee,
}

impl Role {
    /// Whether this role may create and administer employee records.
    #[must_use]
    pub fn manages_employees(self) -> bool {
        matches!(self, Self::Admin | Self::Hr)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Admin => "admin",
            Self::Hr => "hr",
            Self::Employee => "employee",
        };
        f.write_str(name)
    }
}

/// Whether an account can sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    /// Account is in use.
    Active,
    /// Account has been deactivated.
    Inactive,
}

/// A persisted employee.
///
/// `login_id` is assigned once at creation and never rewritten. Documents
/// written by older tooling may lack it, in which case it deserializes empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Opaque document id.
    pub id: String,
    /// Allocated login id.
    #[serde(default)]
    pub login_id: String,
    /// Organization the employee belongs to.
    pub organization: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address for the welcome message.
    pub email: String,
    /// Join date; its year scopes the login id serial.
    pub joined_on: NaiveDate,
    /// Access level.
    pub role: Role,
    /// Account status.
    pub status: EmployeeStatus,
    /// Argon2 PHC string of the temporary password.
    pub password_hash: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl EmployeeRecord {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Attributes supplied by whoever creates a new employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    /// Organization name.
    pub organization: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address.
    pub email: String,
    /// Join date.
    pub joined_on: NaiveDate,
    /// Access level of the new account.
    pub role: Role,
}
