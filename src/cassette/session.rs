//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// A recorder shared by the recording adapter of one port.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Manages per-port `CassetteRecorder` instances for a recording session.
///
/// Each port gets its own cassette file inside a timestamped directory.
/// The credential generator is deliberately absent: recording it would put
/// plaintext passwords on disk.
#[derive(Debug)]
pub struct RecordingSession {
    /// Recorder for clock interactions.
    pub clock: SharedRecorder,
    /// Recorder for ID generator interactions.
    pub id_gen: SharedRecorder,
    /// Recorder for employee store interactions.
    pub store: SharedRecorder,
    /// Recorder for notifier interactions.
    pub notifier: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a session writing into a new `<base>/<timestamp>/` directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(base: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let make_recorder = |port: &str| -> SharedRecorder {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            Arc::new(Mutex::new(CassetteRecorder::new(path, format!("{timestamp}-{port}"))))
        };

        Ok(Self {
            clock: make_recorder("clock"),
            id_gen: make_recorder("id_gen"),
            store: make_recorder("store"),
            notifier: make_recorder("notifier"),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// Every recording adapter must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a cassette
    /// file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(recorder: SharedRecorder, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(recorder)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.clock, "clock")?;
        finish_one(self.id_gen, "id_gen")?;
        finish_one(self.store, "store")?;
        finish_one(self.notifier, "notifier")?;

        Ok(self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_cassette_per_port() {
        let base = tempfile::tempdir().unwrap();
        let session = RecordingSession::new(base.path()).unwrap();
        assert!(session.output_dir().exists());

        let dir = session.finish().unwrap();
        for port in ["clock", "id_gen", "store", "notifier"] {
            assert!(dir.join(format!("{port}.cassette.yaml")).exists(), "missing {port}");
        }
        assert!(!dir.join("credentials.cassette.yaml").exists());
    }

    #[test]
    fn finish_fails_while_an_adapter_holds_a_recorder() {
        let base = tempfile::tempdir().unwrap();
        let session = RecordingSession::new(base.path()).unwrap();
        let _held = Arc::clone(&session.store);

        let err = session.finish().unwrap_err();
        assert!(err.contains("store still has references"));
    }
}
