use crate::backend::StorageBackend;
use crate::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-per-key backend rooted at a directory.
///
/// Each key maps to `<root>/<key>.json`; characters outside
/// `[A-Za-z0-9._-]` are replaced with `_` so a key can never escape the
/// root. The root directory is created lazily on the first write.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", sanitized))
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_backend_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("prefs"));

        assert_eq!(backend.get_item("theme_preference").unwrap(), None);

        backend.set_item("theme_preference", "\"dark\"").unwrap();
        assert_eq!(
            backend.get_item("theme_preference").unwrap().as_deref(),
            Some("\"dark\"")
        );

        backend.remove_item("theme_preference").unwrap();
        assert_eq!(backend.get_item("theme_preference").unwrap(), None);
    }

    #[test]
    fn test_keys_are_sanitized_to_filenames() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("prefs"));

        backend.set_item("../escape/attempt", "\"x\"").unwrap();

        // The write lands inside the root, not outside it.
        assert!(temp_dir.path().join("prefs/.._escape_attempt.json").exists());
        assert_eq!(
            backend.get_item("../escape/attempt").unwrap().as_deref(),
            Some("\"x\"")
        );
    }

    #[test]
    fn test_remove_absent_key_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("prefs"));
        backend.remove_item("never_written").unwrap();
    }
}
