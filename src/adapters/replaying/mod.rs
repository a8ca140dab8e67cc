//! Replaying adapters that replay recorded interactions.
//!
//! A replay that asks for something the recording never did has diverged,
//! so these adapters panic rather than invent an answer.

pub mod clock;
pub mod id_gen;
pub mod notifier;
pub mod store;

pub use clock::ReplayingClock;
pub use id_gen::ReplayingIdGenerator;
pub use notifier::ReplayingNotifier;
pub use store::ReplayingEmployeeStore;

use std::sync::{Mutex, PoisonError};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

/// Take the output of the next recorded `port::method` interaction.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard.next_interaction(port, method).output.clone()
}

/// Decode a recorded output into the port's return type.
///
/// Mirror of `recording::record_result`; plain values decode the same way.
///
/// # Panics
///
/// Panics if the recorded value does not have the expected shape.
pub(crate) fn replay_result<T: DeserializeOwned>(output: serde_json::Value, context: &str) -> T {
    serde_json::from_value(output)
        .unwrap_or_else(|e| panic!("{context}: recorded output has the wrong shape: {e}"))
}

#[cfg(test)]
pub(crate) mod test_util {
    use chrono::Utc;

    use crate::cassette::format::{Cassette, Interaction};
    use crate::cassette::replayer::CassetteReplayer;

    /// Builds a replayer whose interactions are numbered in the given order.
    pub(crate) fn replayer(
        port: &str,
        calls: Vec<(&str, serde_json::Value)>,
    ) -> CassetteReplayer {
        let interactions = calls
            .into_iter()
            .enumerate()
            .map(|(seq, (method, output))| Interaction {
                seq: seq as u64,
                port: port.into(),
                method: method.into(),
                input: serde_json::json!({}),
                output,
            })
            .collect();
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.0.0".into(),
            interactions,
        };
        CassetteReplayer::new(&cassette)
    }
}
