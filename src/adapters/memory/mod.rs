//! In-process adapters with no external state.
//!
//! Deterministic stand-ins used by tests and by replay, where the ports
//! they replace are not recorded.

pub mod clock;
pub mod credentials;
pub mod id_gen;
pub mod notifier;
pub mod store;

pub use clock::FixedClock;
pub use credentials::SeededCredentialGenerator;
pub use id_gen::SequentialIdGenerator;
pub use notifier::CollectingNotifier;
pub use store::MemoryEmployeeStore;
