//! Recording adapters that capture interactions to cassettes.

pub mod clock;
pub mod id_gen;
pub mod notifier;
pub mod store;

pub use clock::RecordingClock;
pub use id_gen::RecordingIdGenerator;
pub use notifier::RecordingNotifier;
pub use store::RecordingEmployeeStore;

use serde::Serialize;
use tracing::warn;

use crate::cassette::session::SharedRecorder;

/// Record one interaction.
///
/// Mirror of `replaying::next_output`. A value that fails to serialize is
/// logged and skipped; recording never changes what the wrapped port returns.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let (input, output) = match (serde_json::to_value(input), serde_json::to_value(output)) {
        (Ok(input), Ok(output)) => (input, output),
        (Err(e), _) | (_, Err(e)) => {
            warn!(port, method, error = %e, "failed to serialize interaction, not recorded");
            return;
        }
    };
    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input, output),
        Err(_) => warn!(port, method, "recorder lock poisoned, interaction not recorded"),
    }
}

/// Record a `Result<T, E>` interaction.
///
/// Mirror of `replaying::replay_result`. `Ok(v)` is stored as `{"Ok": v}`
/// and `Err(e)` as `{"Err": e}`, with the error kept structured so replay
/// reproduces the same variant.
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: Serialize,
    I: Serialize,
{
    record_interaction(recorder, port, method, input, result);
}
