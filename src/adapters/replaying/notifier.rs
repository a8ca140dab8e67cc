//! Replaying adapter for the `Notifier` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::notifier::{NotifyError, Notifier, Welcome};

/// Replays recorded delivery outcomes without sending anything.
pub struct ReplayingNotifier {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingNotifier {
    /// Creates a new replaying notifier from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Notifier for ReplayingNotifier {
    fn send_welcome(&self, _welcome: &Welcome) -> Result<(), NotifyError> {
        replay_result(
            next_output(&self.replayer, "notifier", "send_welcome"),
            "notifier::send_welcome",
        )
    }
}
