use crate::backend::StorageBackend;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Load status of a [`Setting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Constructed, nothing read yet; `value()` returns the default.
    Uninitialized,
    /// A load is in flight.
    Loading,
    /// The last load/save/clear has settled; check `error()` for failures.
    Ready,
}

/// Best-effort accessor for a single typed value under a string key.
///
/// Every operation recovers from backend and serialization failures
/// locally; nothing propagates to the caller. The only failure signal is
/// the captured error string, and the observable value is always usable
/// (the stored value when readable, the default otherwise).
pub struct Setting<T> {
    backend: Arc<dyn StorageBackend>,
    key: String,
    default: T,
    value: T,
    state: LoadState,
    error: Option<String>,
}

impl<T> Setting<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(backend: Arc<dyn StorageBackend>, key: impl Into<String>, default: T) -> Self {
        Self {
            backend,
            key: key.into(),
            value: default.clone(),
            default,
            state: LoadState::Uninitialized,
            error: None,
        }
    }

    /// Read the stored value.
    ///
    /// An absent key yields the default with no error; a backend failure
    /// or an undeserializable payload yields the default with a captured
    /// error string.
    pub fn load(&mut self) -> &T {
        self.state = LoadState::Loading;
        self.error = None;

        match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => self.value = value,
                Err(err) => {
                    self.value = self.default.clone();
                    self.error = Some(format!(
                        "stored value for '{}' failed to deserialize: {}",
                        self.key, err
                    ));
                }
            },
            Ok(None) => self.value = self.default.clone(),
            Err(err) => {
                self.value = self.default.clone();
                self.error = Some(err.to_string());
            }
        }

        self.state = LoadState::Ready;
        &self.value
    }

    /// Persist a new value, optimistically.
    ///
    /// The in-memory value is updated before the backend write and kept
    /// even when the write fails, so `value()` always reflects the
    /// requested write. A failed write surfaces only through the returned
    /// error string and is not retried; the value may therefore be lost
    /// on the next process start. That trade is deliberate.
    pub fn save(&mut self, value: T) -> Option<String> {
        self.value = value;
        self.state = LoadState::Ready;

        self.error = match serde_json::to_string(&self.value) {
            Ok(raw) => self
                .backend
                .set_item(&self.key, &raw)
                .err()
                .map(|err| err.to_string()),
            Err(err) => Some(format!(
                "value for '{}' failed to serialize: {}",
                self.key, err
            )),
        };
        self.error.clone()
    }

    /// Remove the stored entry and reset to the default.
    ///
    /// The reset happens regardless of whether the backend removal
    /// succeeded.
    pub fn clear(&mut self) -> Option<String> {
        self.value = self.default.clone();
        self.state = LoadState::Ready;
        self.error = self
            .backend
            .remove_item(&self.key)
            .err()
            .map(|err| err.to_string());
        self.error.clone()
    }

    /// Re-run [`Setting::load`] to resynchronize with the backend after
    /// an external change.
    pub fn refresh(&mut self) {
        self.load();
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
