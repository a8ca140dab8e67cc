//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the onboarding core and an
//! external system (time, record ids, files, the employee store, password
//! generation, notifications). Implementations live in `src/adapters/`.

pub mod clock;
pub mod credentials;
pub mod filesystem;
pub mod id_gen;
pub mod notifier;
pub mod store;

pub use clock::Clock;
pub use credentials::CredentialGenerator;
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
pub use notifier::{NotifyError, Notifier, Welcome};
pub use store::{EmployeeStore, StoreError, StoreFuture};
