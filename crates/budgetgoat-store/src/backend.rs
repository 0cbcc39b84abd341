use crate::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Key-value persistence primitive behind the [`Setting`](crate::Setting)
/// accessor.
///
/// Implementations are best-effort: any call may fail, and the accessor
/// recovers locally instead of propagating. No persistence guarantee
/// beyond "may survive until the next read" is assumed.
pub trait StorageBackend: Send + Sync {
    /// Read the raw stored string for `key`; `None` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Persist `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the entry for `key`; removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// In-memory backend for ephemeral profiles and tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get_item("k").unwrap(), None);

        backend.set_item("k", "\"v\"").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("\"v\""));

        backend.remove_item("k").unwrap();
        assert_eq!(backend.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_remove_absent_key_is_ok() {
        let backend = MemoryBackend::new();
        backend.remove_item("never_written").unwrap();
    }
}
