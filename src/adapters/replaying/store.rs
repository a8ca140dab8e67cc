//! Replaying adapter for the `EmployeeStore` port.

use std::sync::Mutex;

use chrono::NaiveDate;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::employee::EmployeeRecord;
use crate::login_id::LoginId;
use crate::ports::store::{EmployeeStore, StoreError, StoreFuture};

/// Replays recorded store results, including conflicts and outages.
pub struct ReplayingEmployeeStore {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingEmployeeStore {
    /// Creates a new replaying store from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn replay<T>(&self, method: &str) -> StoreFuture<'_, T>
    where
        T: serde::de::DeserializeOwned + Send + 'static,
    {
        let output = next_output(&self.replayer, "store", method);
        let result: Result<T, StoreError> = replay_result(output, &format!("store::{method}"));
        Box::pin(async move { result })
    }
}

impl EmployeeStore for ReplayingEmployeeStore {
    fn find_joined_between(
        &self,
        _organization: &str,
        _from: NaiveDate,
        _until: NaiveDate,
    ) -> StoreFuture<'_, Vec<EmployeeRecord>> {
        self.replay("find_joined_between")
    }

    fn login_id_exists(&self, _login_id: &LoginId) -> StoreFuture<'_, bool> {
        self.replay("login_id_exists")
    }

    fn insert(&self, _record: &EmployeeRecord) -> StoreFuture<'_, ()> {
        self.replay("insert")
    }

    fn get(&self, _login_id: &LoginId) -> StoreFuture<'_, Option<EmployeeRecord>> {
        self.replay("get")
    }

    fn list(&self, _organization: Option<&str>) -> StoreFuture<'_, Vec<EmployeeRecord>> {
        self.replay("list")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapters::replaying::test_util::replayer;
    use crate::test_support::{date, record};

    #[tokio::test]
    async fn replays_recorded_results_and_errors() {
        let login_id: LoginId = "EMPTEAVLE20240001".parse().unwrap();
        let rec = record(&login_id, "TechCorp", date(2024, 3, 10));
        let store = ReplayingEmployeeStore::new(replayer(
            "store",
            vec![
                ("find_joined_between", json!({ "Ok": [rec] })),
                ("insert", json!({ "Err": { "Conflict": { "login_id": "EMPTEAVLE20240001" } } })),
                ("login_id_exists", json!({ "Err": { "Unavailable": { "message": "timeout" } } })),
            ],
        ));

        let found = store
            .find_joined_between("TechCorp", date(2024, 1, 1), date(2025, 1, 1))
            .await
            .unwrap();
        assert_eq!(found, vec![rec.clone()]);
        assert_eq!(
            store.insert(&rec).await.unwrap_err(),
            StoreError::Conflict { login_id: "EMPTEAVLE20240001".into() }
        );
        assert_eq!(
            store.login_id_exists(&login_id).await.unwrap_err(),
            StoreError::Unavailable { message: "timeout".into() }
        );
    }
}
