//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Interactions recorded for one port/method pair and how many were served.
#[derive(Debug, Default)]
struct Stream {
    interactions: Vec<Interaction>,
    served: usize,
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    streams: HashMap<(String, String), Stream>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut streams: HashMap<(String, String), Stream> = HashMap::new();
        for interaction in &cassette.interactions {
            streams
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .interactions
                .push(interaction.clone());
        }
        Self { streams }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination. A replay that asks for something the
    /// recording never did has diverged, and the test must fail loudly.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = (port.to_string(), method.to_string());
        let available = self.describe_streams();
        let Some(stream) = self.streams.get_mut(&key) else {
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{available}]"
            );
        };

        let count = stream.interactions.len();
        let Some(interaction) = stream.interactions.get(stream.served) else {
            panic!(
                "Cassette exhausted: all {count} interactions for port={port:?} method={method:?} \
                 have been consumed."
            );
        };
        stream.served += 1;
        interaction
    }

    fn describe_streams(&self) -> String {
        let mut pairs: Vec<String> =
            self.streams.keys().map(|(port, method)| format!("{port}::{method}")).collect();
        pairs.sort();
        pairs.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), version: "0.1.0".into(), interactions }
    }

    #[test]
    fn serves_each_method_stream_in_order() {
        let cassette = make_cassette(vec![
            interaction(0, "store", "login_id_exists", json!({"Ok": true})),
            interaction(1, "clock", "now", json!("2024-03-10T09:00:00Z")),
            interaction(2, "store", "login_id_exists", json!({"Ok": false})),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("store", "login_id_exists").seq, 0);
        assert_eq!(replayer.next_interaction("clock", "now").seq, 1);
        let third = replayer.next_interaction("store", "login_id_exists");
        assert_eq!(third.seq, 2);
        assert_eq!(third.output, json!({"Ok": false}));
    }

    #[test]
    #[should_panic(expected = "have been consumed")]
    fn exhausted_stream_panics() {
        let cassette = make_cassette(vec![interaction(0, "clock", "now", json!("2024-01-01T00:00:00Z"))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("clock", "now");
        let _ = replayer.next_interaction("clock", "now");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unknown_port_panics() {
        let mut replayer = CassetteReplayer::new(&make_cassette(vec![]));
        let _ = replayer.next_interaction("unknown", "method");
    }
}
