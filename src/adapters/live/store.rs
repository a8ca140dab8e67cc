//! File-backed employee store.
//!
//! One YAML document per employee, named after its login id:
//!
//! ```text
//! <root>/
//!   └── employees/
//!         ├── EMPTEAVLE20240001.yaml
//!         └── EMPTEBENG20240002.yaml
//! ```
//!
//! Because the file name is the login id, creating the file with
//! [`FileSystem::create_new`] is the uniqueness constraint.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use crate::employee::EmployeeRecord;
use crate::login_id::LoginId;
use crate::ports::filesystem::FileSystem;
use crate::ports::store::{EmployeeStore, StoreError, StoreFuture};

/// Employee store persisting YAML documents through the `FileSystem` port.
pub struct FileEmployeeStore {
    fs: Box<dyn FileSystem>,
    root: PathBuf,
}

impl FileEmployeeStore {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, root: &Path) -> Self {
        Self { fs, root: root.to_path_buf() }
    }

    fn employees_dir(&self) -> PathBuf {
        self.root.join("employees")
    }

    fn record_path(&self, login_id: &str) -> PathBuf {
        self.employees_dir().join(format!("{login_id}.yaml"))
    }

    fn load(&self, path: &Path) -> Result<EmployeeRecord, StoreError> {
        let contents = self
            .fs
            .read_to_string(path)
            .map_err(|e| StoreError::unavailable(format!("failed to read {}: {e}", path.display())))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| StoreError::unavailable(format!("failed to parse {}: {e}", path.display())))
    }

    fn load_all(&self) -> Result<Vec<EmployeeRecord>, StoreError> {
        let dir = self.employees_dir();
        if !self.fs.exists(&dir) {
            return Ok(Vec::new());
        }
        let entries = self
            .fs
            .list_dir(&dir)
            .map_err(|e| StoreError::unavailable(format!("failed to list {}: {e}", dir.display())))?;
        entries
            .iter()
            .filter(|name| name.ends_with(".yaml"))
            .map(|name| self.load(&dir.join(name)))
            .collect()
    }

    fn insert_now(&self, record: &EmployeeRecord) -> Result<(), StoreError> {
        let login_id: LoginId = record.login_id.parse().map_err(|e| StoreError::Rejected {
            message: format!("login id {:?}: {e}", record.login_id),
        })?;
        let yaml = serde_yaml::to_string(record)
            .map_err(|e| StoreError::Rejected { message: format!("failed to serialize: {e}") })?;
        let path = self.record_path(login_id.as_str());
        let created = self
            .fs
            .create_new(&path, &yaml)
            .map_err(|e| StoreError::unavailable(format!("failed to write {}: {e}", path.display())))?;
        if !created {
            return Err(StoreError::Conflict { login_id: record.login_id.clone() });
        }
        debug!(path = %path.display(), "stored employee record");
        Ok(())
    }

    fn get_now(&self, login_id: &LoginId) -> Result<Option<EmployeeRecord>, StoreError> {
        let path = self.record_path(login_id.as_str());
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        self.load(&path).map(Some)
    }
}

impl EmployeeStore for FileEmployeeStore {
    fn find_joined_between(
        &self,
        organization: &str,
        from: NaiveDate,
        until: NaiveDate,
    ) -> StoreFuture<'_, Vec<EmployeeRecord>> {
        let result = self.load_all().map(|records| {
            let mut matching: Vec<EmployeeRecord> = records
                .into_iter()
                .filter(|r| r.organization == organization)
                .filter(|r| r.joined_on >= from && r.joined_on < until)
                .collect();
            matching.sort_by(|a, b| b.login_id.cmp(&a.login_id));
            matching
        });
        Box::pin(async move { result })
    }

    fn login_id_exists(&self, login_id: &LoginId) -> StoreFuture<'_, bool> {
        let exists = self.fs.exists(&self.record_path(login_id.as_str()));
        Box::pin(async move { Ok(exists) })
    }

    fn insert(&self, record: &EmployeeRecord) -> StoreFuture<'_, ()> {
        let result = self.insert_now(record);
        Box::pin(async move { result })
    }

    fn get(&self, login_id: &LoginId) -> StoreFuture<'_, Option<EmployeeRecord>> {
        let result = self.get_now(login_id);
        Box::pin(async move { result })
    }

    fn list(&self, organization: Option<&str>) -> StoreFuture<'_, Vec<EmployeeRecord>> {
        let result = self.load_all().map(|records| {
            let mut matching: Vec<EmployeeRecord> = records
                .into_iter()
                .filter(|r| organization.map_or(true, |org| r.organization == org))
                .collect();
            matching.sort_by(|a, b| a.login_id.cmp(&b.login_id));
            matching
        });
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;
    use crate::adapters::memory::CollectingNotifier;
    use crate::context::ServiceContext;
    use crate::employee::{NewEmployee, Role};
    use crate::onboarding::{Onboarding, OnboardingSettings};
    use crate::test_support::{date, record};

    /// In-memory filesystem for exercising the store without touching disk.
    #[derive(Default)]
    struct MemFs {
        files: Mutex<HashMap<PathBuf, String>>,
    }

    impl FileSystem for MemFs {
        fn read_to_string(
            &self,
            path: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            let files = self.files.lock().unwrap();
            files
                .get(path)
                .cloned()
                .ok_or_else(|| format!("File not found: {}", path.display()).into())
        }

        fn create_new(
            &self,
            path: &Path,
            contents: &str,
        ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
            let mut files = self.files.lock().unwrap();
            if files.contains_key(path) {
                return Ok(false);
            }
            files.insert(path.to_path_buf(), contents.to_string());
            Ok(true)
        }

        fn exists(&self, path: &Path) -> bool {
            let files = self.files.lock().unwrap();
            files.contains_key(path) || files.keys().any(|k| k.starts_with(path) && k != path)
        }

        fn list_dir(
            &self,
            path: &Path,
        ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
            let files = self.files.lock().unwrap();
            let mut names: Vec<String> = files
                .keys()
                .filter(|k| k.parent() == Some(path))
                .filter_map(|k| k.file_name().map(|n| n.to_string_lossy().into_owned()))
                .collect();
            names.sort();
            Ok(names)
        }
    }

    fn id(s: &str) -> LoginId {
        s.parse().unwrap()
    }

    fn mem_store() -> FileEmployeeStore {
        FileEmployeeStore::new(Box::new(MemFs::default()), Path::new("/data"))
    }

    #[tokio::test]
    async fn empty_store_has_no_records() {
        let store = mem_store();
        assert!(store.list(None).await.unwrap().is_empty());
        assert!(!store.login_id_exists(&id("EMPTEAVLE20240001")).await.unwrap());
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = mem_store();
        let rec = record(&id("EMPTEAVLE20240001"), "TechCorp", date(2024, 3, 10));
        store.insert(&rec).await.unwrap();

        assert!(store.login_id_exists(&id("EMPTEAVLE20240001")).await.unwrap());
        assert_eq!(store.get(&id("EMPTEAVLE20240001")).await.unwrap(), Some(rec));
    }

    #[tokio::test]
    async fn duplicate_insert_is_a_conflict() {
        let store = mem_store();
        let rec = record(&id("EMPTEAVLE20240001"), "TechCorp", date(2024, 3, 10));
        store.insert(&rec).await.unwrap();

        let err = store.insert(&rec).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn malformed_login_ids_are_rejected() {
        let store = mem_store();
        let mut rec = record(&id("EMPTEAVLE20240001"), "TechCorp", date(2024, 3, 10));
        rec.login_id = "../escape".to_string();

        let err = store.insert(&rec).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { .. }));
    }

    #[tokio::test]
    async fn scoped_query_orders_descending() {
        let store = mem_store();
        store.insert(&record(&id("EMPTEAVLE20240001"), "TechCorp", date(2024, 3, 10))).await.unwrap();
        store.insert(&record(&id("EMPTEBENG20240002"), "TechCorp", date(2024, 8, 1))).await.unwrap();
        store.insert(&record(&id("EMPTEBENG20230005"), "TechCorp", date(2023, 8, 1))).await.unwrap();

        let found = store
            .find_joined_between("TechCorp", date(2024, 1, 1), date(2025, 1, 1))
            .await
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|r| r.login_id.as_str()).collect();
        assert_eq!(ids, vec!["EMPTEBENG20240002", "EMPTEAVLE20240001"]);
    }

    #[tokio::test]
    async fn unreadable_documents_surface_as_unavailable() {
        let fs = MemFs::default();
        fs.create_new(Path::new("/data/employees/EMPTEAVLE20240001.yaml"), ": not yaml [").unwrap();
        let store = FileEmployeeStore::new(Box::new(fs), Path::new("/data"));

        let err = store.list(None).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let rec = record(&id("EMPTEAVLE20240001"), "TechCorp", date(2024, 3, 10));
        FileEmployeeStore::new(Box::new(LiveFileSystem), dir.path()).insert(&rec).await.unwrap();

        let reopened = FileEmployeeStore::new(Box::new(LiveFileSystem), dir.path());
        assert_eq!(reopened.list(Some("TechCorp")).await.unwrap(), vec![rec]);
        assert!(dir.path().join("employees/EMPTEAVLE20240001.yaml").exists());
    }

    fn hire(organization: &str, first: &str, last: &str) -> NewEmployee {
        NewEmployee {
            organization: organization.into(),
            first_name: first.into(),
            last_name: last.into(),
            email: format!("{}@nordic.example", first.to_lowercase()),
            joined_on: date(2024, 3, 10),
            role: Role::Employee,
        }
    }

    #[tokio::test]
    async fn punctuated_organizations_share_one_serial_scope_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileEmployeeStore::new(Box::new(LiveFileSystem), dir.path());
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let ctx = ServiceContext::in_memory_with(now, store, Arc::new(CollectingNotifier::new()));
        let onboarding = Onboarding::new(&ctx, OnboardingSettings::default());

        let first = onboarding.onboard(Role::Hr, hire("A/S Nordic", "Ava", "Lee")).await.unwrap();
        let second = onboarding.onboard(Role::Hr, hire("A/S Nordic", "Bo", "O'Brien")).await.unwrap();

        assert_eq!(first.login_id.as_str(), "EMPASAVLE20240001");
        assert_eq!(second.login_id.as_str(), "EMPASBOOB20240002");
        assert!(dir.path().join("employees/EMPASAVLE20240001.yaml").is_file());

        let listed = ctx.store.list(Some("A/S Nordic")).await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|r| r.login_id.as_str()).collect();
        assert_eq!(ids, vec!["EMPASAVLE20240001", "EMPASBOOB20240002"]);
    }

    #[tokio::test]
    async fn path_characters_in_login_ids_are_rejected() {
        let store = mem_store();
        let mut rec = record(&id("EMPTEAVLE20240001"), "A/S Nordic", date(2024, 3, 10));
        rec.login_id = "EMPA/AVLE20240001".to_string();

        let err = store.insert(&rec).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { .. }));
        assert!(store.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn organization_scope_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileEmployeeStore::new(Box::new(LiveFileSystem), dir.path());
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let ctx = ServiceContext::in_memory_with(now, store, Arc::new(CollectingNotifier::new()));
        let onboarding = Onboarding::new(&ctx, OnboardingSettings::default());

        onboarding.onboard(Role::Hr, hire("techcorp", "Ava", "Lee")).await.unwrap();
        let scoped = ctx
            .store
            .find_joined_between("TechCorp", date(2024, 1, 1), date(2025, 1, 1))
            .await
            .unwrap();
        assert!(scoped.is_empty());

        // Same prefix, separate scope: the exact-collision check moves past 0001.
        let upper = onboarding.onboard(Role::Hr, hire("TechCorp", "Ava", "Lee")).await.unwrap();
        assert_eq!(upper.login_id.as_str(), "EMPTEAVLE20240002");
    }
}
