//! Shared fixtures for unit tests.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::employee::{EmployeeRecord, EmployeeStatus, Role};
use crate::login_id::LoginId;

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A persisted employee of `organization` holding `login_id`.
pub(crate) fn record(login_id: &LoginId, organization: &str, joined_on: NaiveDate) -> EmployeeRecord {
    EmployeeRecord {
        id: format!("doc-{login_id}"),
        login_id: login_id.to_string(),
        organization: organization.to_string(),
        first_name: "Test".to_string(),
        last_name: "Person".to_string(),
        email: "test.person@example.com".to_string(),
        joined_on,
        role: Role::Employee,
        status: EmployeeStatus::Active,
        password_hash: "$argon2id$placeholder".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}
