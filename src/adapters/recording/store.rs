//! Recording adapter for the `EmployeeStore` port.

use chrono::NaiveDate;
use serde_json::json;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::employee::EmployeeRecord;
use crate::login_id::LoginId;
use crate::ports::store::{EmployeeStore, StoreFuture};

/// Records store queries and writes while delegating to an inner store.
///
/// Records hold only the password hash, so nothing secret reaches the cassette.
pub struct RecordingEmployeeStore {
    inner: Box<dyn EmployeeStore>,
    recorder: SharedRecorder,
}

impl RecordingEmployeeStore {
    /// Creates a new recording store wrapping the given implementation.
    pub fn new(inner: Box<dyn EmployeeStore>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl EmployeeStore for RecordingEmployeeStore {
    fn find_joined_between(
        &self,
        organization: &str,
        from: NaiveDate,
        until: NaiveDate,
    ) -> StoreFuture<'_, Vec<EmployeeRecord>> {
        let input = json!({ "organization": organization, "from": from, "until": until });
        let pending = self.inner.find_joined_between(organization, from, until);
        Box::pin(async move {
            let result = pending.await;
            record_result(&self.recorder, "store", "find_joined_between", &input, &result);
            result
        })
    }

    fn login_id_exists(&self, login_id: &LoginId) -> StoreFuture<'_, bool> {
        let input = json!({ "login_id": login_id });
        let pending = self.inner.login_id_exists(login_id);
        Box::pin(async move {
            let result = pending.await;
            record_result(&self.recorder, "store", "login_id_exists", &input, &result);
            result
        })
    }

    fn insert(&self, record: &EmployeeRecord) -> StoreFuture<'_, ()> {
        let input = json!({ "record": record });
        let pending = self.inner.insert(record);
        Box::pin(async move {
            let result = pending.await;
            record_result(&self.recorder, "store", "insert", &input, &result);
            result
        })
    }

    fn get(&self, login_id: &LoginId) -> StoreFuture<'_, Option<EmployeeRecord>> {
        let input = json!({ "login_id": login_id });
        let pending = self.inner.get(login_id);
        Box::pin(async move {
            let result = pending.await;
            record_result(&self.recorder, "store", "get", &input, &result);
            result
        })
    }

    fn list(&self, organization: Option<&str>) -> StoreFuture<'_, Vec<EmployeeRecord>> {
        let input = json!({ "organization": organization });
        let pending = self.inner.list(organization);
        Box::pin(async move {
            let result = pending.await;
            record_result(&self.recorder, "store", "list", &input, &result);
            result
        })
    }
}
