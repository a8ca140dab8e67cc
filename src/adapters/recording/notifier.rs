//! Recording adapter for the `Notifier` port.

use serde_json::json;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::notifier::{NotifyError, Notifier, Welcome};

const REDACTED: &str = "[redacted]";

/// Records welcome deliveries while delegating to an inner notifier.
///
/// The password is replaced before the interaction is recorded.
pub struct RecordingNotifier {
    inner: Box<dyn Notifier>,
    recorder: SharedRecorder,
}

impl RecordingNotifier {
    /// Creates a new recording notifier wrapping the given implementation.
    pub fn new(inner: Box<dyn Notifier>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl Notifier for RecordingNotifier {
    fn send_welcome(&self, welcome: &Welcome) -> Result<(), NotifyError> {
        let result = self.inner.send_welcome(welcome);
        let input = json!({
            "email": welcome.email,
            "full_name": welcome.full_name,
            "login_id": welcome.login_id,
            "password": REDACTED,
        });
        record_result(&self.recorder, "notifier", "send_welcome", &input, &result);
        result
    }
}
