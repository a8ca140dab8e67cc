//! Notifier port for relaying first-login details to a new employee.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::credential::Secret;
use crate::login_id::LoginId;

/// The one-time message carrying a new employee's temporary password.
#[derive(Debug, Clone)]
pub struct Welcome {
    /// Recipient address.
    pub email: String,
    /// Display name used in the greeting.
    pub full_name: String,
    /// The allocated login id.
    pub login_id: LoginId,
    /// Plaintext temporary password; only ever travels through this port.
    pub password: Secret,
}

/// Failure to deliver a welcome message.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotifyError {
    /// The side channel refused or failed to deliver the message.
    #[error("delivery to {recipient} failed: {reason}")]
    DeliveryFailed {
        /// The intended recipient.
        recipient: String,
        /// Why delivery failed.
        reason: String,
    },
}

/// Sends the out-of-band welcome message.
pub trait Notifier: Send + Sync {
    /// Delivers the welcome message once.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be delivered.
    fn send_welcome(&self, welcome: &Welcome) -> Result<(), NotifyError>;
}
