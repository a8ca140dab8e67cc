//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::credentials::OsCredentialGenerator;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::id_gen::LiveIdGenerator;
use crate::adapters::live::notifier::ConsoleNotifier;
use crate::adapters::live::store::FileEmployeeStore;
use crate::adapters::memory::{
    CollectingNotifier, FixedClock, MemoryEmployeeStore, SeededCredentialGenerator,
    SequentialIdGenerator,
};
use crate::adapters::recording::{
    RecordingClock, RecordingEmployeeStore, RecordingIdGenerator, RecordingNotifier,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingEmployeeStore, ReplayingIdGenerator, ReplayingNotifier,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Config;
use crate::employee::EmployeeRecord;
use crate::login_id::LoginId;
use crate::ports::notifier::{NotifyError, Notifier, Welcome};
use crate::ports::store::{EmployeeStore, StoreFuture};
use crate::ports::{Clock, CredentialGenerator, IdGenerator};

/// Seed for the credential generator of replaying contexts. Passwords are
/// never recorded, so replay draws reproducible ones instead.
const REPLAY_CREDENTIAL_SEED: u64 = 0x0b0a_2d00;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, in-memory, recording,
/// replaying).
pub struct ServiceContext {
    /// Clock for creation timestamps and the default join date.
    pub clock: Box<dyn Clock>,
    /// Generator of opaque record ids.
    pub id_gen: Box<dyn IdGenerator>,
    /// Persistence for employee records.
    pub store: Box<dyn EmployeeStore>,
    /// Source of temporary passwords.
    pub credentials: Box<dyn CredentialGenerator>,
    /// Side channel for welcome messages.
    pub notifier: Box<dyn Notifier>,
}

impl ServiceContext {
    /// Creates a live context: file store under `config.data_dir`, OS
    /// randomness, console notifications.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self {
            clock: Box::new(LiveClock),
            id_gen: Box::new(LiveIdGenerator),
            store: Box::new(FileEmployeeStore::new(Box::new(LiveFileSystem), &config.data_dir)),
            credentials: Box::new(OsCredentialGenerator),
            notifier: Box::new(ConsoleNotifier),
        }
    }

    /// Creates a self-contained context with deterministic adapters and an
    /// empty in-memory store. Welcome messages are collected, not sent.
    #[must_use]
    pub fn in_memory(now: DateTime<Utc>) -> Self {
        Self::in_memory_with(now, MemoryEmployeeStore::new(), Arc::new(CollectingNotifier::new()))
    }

    /// Like [`ServiceContext::in_memory`], with the given store and notifier.
    #[must_use]
    pub fn in_memory_with(
        now: DateTime<Utc>,
        store: impl EmployeeStore + 'static,
        notifier: Arc<CollectingNotifier>,
    ) -> Self {
        Self {
            clock: Box::new(FixedClock(now)),
            id_gen: Box::new(SequentialIdGenerator::new("emp")),
            store: Box::new(store),
            credentials: Box::new(SeededCredentialGenerator::new(REPLAY_CREDENTIAL_SEED)),
            notifier: Box::new(SharedNotifier(notifier)),
        }
    }

    /// Creates a live context whose clock, id generator, store and notifier
    /// are recorded into `session`.
    ///
    /// The credential generator stays unrecorded.
    #[must_use]
    pub fn recording(config: &Config, session: &RecordingSession) -> Self {
        let live = Self::live(config);
        Self {
            clock: Box::new(RecordingClock::new(live.clock, Arc::clone(&session.clock))),
            id_gen: Box::new(RecordingIdGenerator::new(live.id_gen, Arc::clone(&session.id_gen))),
            store: Box::new(RecordingEmployeeStore::new(live.store, Arc::clone(&session.store))),
            credentials: live.credentials,
            notifier: Box::new(RecordingNotifier::new(live.notifier, Arc::clone(&session.notifier))),
        }
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// All ports are served by a single cassette; each port/method pair
    /// is dispatched to the right interaction stream automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = CassetteConfig::load(path)?;
        let replayer = || CassetteReplayer::new(&cassette);

        Ok(Self {
            clock: Box::new(ReplayingClock::new(replayer())),
            id_gen: Box::new(ReplayingIdGenerator::new(replayer())),
            store: Box::new(ReplayingEmployeeStore::new(replayer())),
            credentials: Box::new(SeededCredentialGenerator::new(REPLAY_CREDENTIAL_SEED)),
            notifier: Box::new(ReplayingNotifier::new(replayer())),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette file use a panicking adapter
    /// that fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            id_gen: match replayers.id_gen {
                Some(r) => Box::new(ReplayingIdGenerator::new(r)),
                None => Box::new(PanickingIdGenerator),
            },
            store: match replayers.store {
                Some(r) => Box::new(ReplayingEmployeeStore::new(r)),
                None => Box::new(PanickingEmployeeStore),
            },
            credentials: Box::new(SeededCredentialGenerator::new(REPLAY_CREDENTIAL_SEED)),
            notifier: match replayers.notifier {
                Some(r) => Box::new(ReplayingNotifier::new(r)),
                None => Box::new(PanickingNotifier),
            },
        })
    }
}

/// Lets a caller keep a handle on the collecting notifier it handed over.
struct SharedNotifier(Arc<CollectingNotifier>);

impl Notifier for SharedNotifier {
    fn send_welcome(&self, welcome: &Welcome) -> Result<(), NotifyError> {
        self.0.send_welcome(welcome)
    }
}

// --- Panicking adapters for unspecified ports ---

fn unconfigured(port: &str, field: &str) -> ! {
    panic!("{port} port not configured in CassetteConfig: no cassette loaded for {field}");
}

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> DateTime<Utc> {
        unconfigured("Clock", "clock")
    }
}

struct PanickingIdGenerator;
impl IdGenerator for PanickingIdGenerator {
    fn generate_id(&self) -> String {
        unconfigured("IdGenerator", "id_gen")
    }
}

struct PanickingEmployeeStore;
impl EmployeeStore for PanickingEmployeeStore {
    fn find_joined_between(
        &self,
        _organization: &str,
        _from: NaiveDate,
        _until: NaiveDate,
    ) -> StoreFuture<'_, Vec<EmployeeRecord>> {
        unconfigured("EmployeeStore", "store")
    }
    fn login_id_exists(&self, _login_id: &LoginId) -> StoreFuture<'_, bool> {
        unconfigured("EmployeeStore", "store")
    }
    fn insert(&self, _record: &EmployeeRecord) -> StoreFuture<'_, ()> {
        unconfigured("EmployeeStore", "store")
    }
    fn get(&self, _login_id: &LoginId) -> StoreFuture<'_, Option<EmployeeRecord>> {
        unconfigured("EmployeeStore", "store")
    }
    fn list(&self, _organization: Option<&str>) -> StoreFuture<'_, Vec<EmployeeRecord>> {
        unconfigured("EmployeeStore", "store")
    }
}

struct PanickingNotifier;
impl Notifier for PanickingNotifier {
    fn send_welcome(&self, _welcome: &Welcome) -> Result<(), NotifyError> {
        unconfigured("Notifier", "notifier")
    }
}
