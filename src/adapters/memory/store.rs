//! In-memory employee store.

use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::employee::EmployeeRecord;
use crate::login_id::LoginId;
use crate::ports::store::{EmployeeStore, StoreError, StoreFuture};

/// Employee store held in a mutex-guarded vector.
///
/// Enforces the same login id uniqueness constraint as the file store.
#[derive(Debug, Default)]
pub struct MemoryEmployeeStore {
    records: Mutex<Vec<EmployeeRecord>>,
}

impl MemoryEmployeeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `records`, bypassing the uniqueness
    /// check so legacy data without login ids can be seeded.
    #[must_use]
    pub fn with_records(records: Vec<EmployeeRecord>) -> Self {
        Self { records: Mutex::new(records) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<EmployeeRecord>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::unavailable("memory store lock poisoned"))
    }

    fn sorted_desc(mut records: Vec<EmployeeRecord>) -> Vec<EmployeeRecord> {
        records.sort_by(|a, b| b.login_id.cmp(&a.login_id));
        records
    }
}

impl EmployeeStore for MemoryEmployeeStore {
    fn find_joined_between(
        &self,
        organization: &str,
        from: NaiveDate,
        until: NaiveDate,
    ) -> StoreFuture<'_, Vec<EmployeeRecord>> {
        let result = self.lock().map(|records| {
            let matching = records
                .iter()
                .filter(|r| r.organization == organization)
                .filter(|r| r.joined_on >= from && r.joined_on < until)
                .cloned()
                .collect();
            Self::sorted_desc(matching)
        });
        Box::pin(async move { result })
    }

    fn login_id_exists(&self, login_id: &LoginId) -> StoreFuture<'_, bool> {
        let result = self
            .lock()
            .map(|records| records.iter().any(|r| r.login_id == login_id.as_str()));
        Box::pin(async move { result })
    }

    fn insert(&self, record: &EmployeeRecord) -> StoreFuture<'_, ()> {
        let result = self.lock().and_then(|mut records| {
            if records.iter().any(|r| r.login_id == record.login_id) {
                return Err(StoreError::Conflict { login_id: record.login_id.clone() });
            }
            records.push(record.clone());
            Ok(())
        });
        Box::pin(async move { result })
    }

    fn get(&self, login_id: &LoginId) -> StoreFuture<'_, Option<EmployeeRecord>> {
        let result = self
            .lock()
            .map(|records| records.iter().find(|r| r.login_id == login_id.as_str()).cloned());
        Box::pin(async move { result })
    }

    fn list(&self, organization: Option<&str>) -> StoreFuture<'_, Vec<EmployeeRecord>> {
        let result = self.lock().map(|records| {
            let mut matching: Vec<EmployeeRecord> = records
                .iter()
                .filter(|r| organization.map_or(true, |org| r.organization == org))
                .cloned()
                .collect();
            matching.sort_by(|a, b| a.login_id.cmp(&b.login_id));
            matching
        });
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, record};

    fn id(s: &str) -> LoginId {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_login_ids() {
        let store = MemoryEmployeeStore::new();
        let taken = id("EMPTEAVLE20240001");
        store.insert(&record(&taken, "TechCorp", date(2024, 3, 10))).await.unwrap();

        let err = store.insert(&record(&taken, "TechCorp", date(2024, 4, 1))).await.unwrap_err();
        assert_eq!(err, StoreError::Conflict { login_id: "EMPTEAVLE20240001".into() });
    }

    #[tokio::test]
    async fn scoped_query_filters_and_orders_descending() {
        let store = MemoryEmployeeStore::new();
        for (login, org, joined) in [
            ("EMPTEAVLE20240001", "TechCorp", date(2024, 1, 1)),
            ("EMPTEBENG20240003", "TechCorp", date(2024, 12, 31)),
            ("EMPTECYOH20250001", "TechCorp", date(2025, 1, 1)),
            ("EMPINAVLE20240002", "Initech", date(2024, 6, 1)),
        ] {
            store.insert(&record(&id(login), org, joined)).await.unwrap();
        }

        let found = store
            .find_joined_between("TechCorp", date(2024, 1, 1), date(2025, 1, 1))
            .await
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|r| r.login_id.as_str()).collect();
        assert_eq!(ids, vec!["EMPTEBENG20240003", "EMPTEAVLE20240001"]);
    }

    #[tokio::test]
    async fn organization_scope_is_case_sensitive() {
        let store = MemoryEmployeeStore::new();
        store.insert(&record(&id("EMPTEAVLE20240001"), "techcorp", date(2024, 3, 1))).await.unwrap();

        let found = store
            .find_joined_between("TechCorp", date(2024, 1, 1), date(2025, 1, 1))
            .await
            .unwrap();
        assert!(found.is_empty());
        assert!(store.login_id_exists(&id("EMPTEAVLE20240001")).await.unwrap());
    }

    #[tokio::test]
    async fn get_and_list() {
        let store = MemoryEmployeeStore::new();
        store.insert(&record(&id("EMPTEBENG20240002"), "TechCorp", date(2024, 2, 2))).await.unwrap();
        store.insert(&record(&id("EMPINAVLE20240001"), "Initech", date(2024, 2, 2))).await.unwrap();

        assert!(store.login_id_exists(&id("EMPTEBENG20240002")).await.unwrap());
        assert!(store.get(&id("EMPTEBENG20240009")).await.unwrap().is_none());

        let all = store.list(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].login_id, "EMPINAVLE20240001");

        let techcorp = store.list(Some("TechCorp")).await.unwrap();
        assert_eq!(techcorp.len(), 1);
    }
}
