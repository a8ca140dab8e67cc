//! Live filesystem adapter using `std::fs`.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

fn create_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) => std::fs::create_dir_all(parent),
        None => Ok(()),
    }
}

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn create_new(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        create_parent(path)?;
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        Ok(true)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_new_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("a.yaml");

        assert!(LiveFileSystem.create_new(&path, "first").unwrap());
        assert!(!LiveFileSystem.create_new(&path, "second").unwrap());
        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn lists_sorted_entries() {
        let dir = tempfile::tempdir().unwrap();
        LiveFileSystem.create_new(&dir.path().join("b.yaml"), "b").unwrap();
        LiveFileSystem.create_new(&dir.path().join("a.yaml"), "a").unwrap();

        assert_eq!(LiveFileSystem.list_dir(dir.path()).unwrap(), vec!["a.yaml", "b.yaml"]);
        assert!(LiveFileSystem.exists(&dir.path().join("a.yaml")));
    }
}
