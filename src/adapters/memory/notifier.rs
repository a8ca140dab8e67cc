//! Notifier that keeps messages instead of sending them.

use std::sync::{Mutex, PoisonError};

use crate::ports::notifier::{NotifyError, Notifier, Welcome};

/// Collects every welcome it is asked to send.
///
/// Built with [`CollectingNotifier::failing`], it records nothing and
/// reports every delivery as failed.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    sent: Mutex<Vec<Welcome>>,
    failure: Option<String>,
}

impl CollectingNotifier {
    /// A notifier that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose deliveries all fail with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self { sent: Mutex::default(), failure: Some(reason.into()) }
    }

    /// Messages delivered so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Welcome> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Notifier for CollectingNotifier {
    fn send_welcome(&self, welcome: &Welcome) -> Result<(), NotifyError> {
        if let Some(reason) = &self.failure {
            return Err(NotifyError::DeliveryFailed {
                recipient: welcome.email.clone(),
                reason: reason.clone(),
            });
        }
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).push(welcome.clone());
        Ok(())
    }
}
