use serde::Serialize;
use serde::de::DeserializeOwned;
use tether_core::{Env, Signal, StoreError, current_env, remember, signal};

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reactive value mirrored into the environment's persistent store.
///
/// Bindings are per-callsite: two bindings to the same key do not observe
/// each other's writes within a session. The store sees JSON text.
#[derive(Clone)]
pub struct Persisted<T: Clone + 'static> {
    key: String,
    value: Signal<T>,
    env: Env,
}

impl<T> Persisted<T>
where
    T: Serialize + Clone + 'static,
{
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Updates the in-memory value synchronously, then persists it. A failed
    /// write is logged and swallowed; the in-memory value stays updated.
    pub fn set(&self, value: T) {
        if let Err(err) = self.try_set(value) {
            log::warn!("persist {:?}: write failed: {err}", self.key);
        }
    }

    /// Like [`set`](Self::set), but surfaces the failure to the caller. The
    /// in-memory value is updated either way.
    pub fn try_set(&self, value: T) -> Result<(), PersistError> {
        self.value.set(value.clone());
        let text = serde_json::to_string(&value)?;
        self.env.storage().write(&self.key, &text)?;
        Ok(())
    }
}

/// Binds a reactive value to `key` in the persistent store.
///
/// Initialization reads the store once, at first composition; a missing key
/// or an undecodable stored value falls back to `default()` with a warning.
/// The key is fixed for the lifetime of the callsite.
pub fn persisted<T>(key: &str, default: impl FnOnce() -> T) -> Persisted<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    let slot = remember({
        let key = key.to_string();
        move || {
            let env = current_env();
            let initial = load_initial(&env, &key).unwrap_or_else(default);
            Persisted {
                key,
                value: signal(initial),
                env,
            }
        }
    });
    (*slot).clone()
}

fn load_initial<T: DeserializeOwned>(env: &Env, key: &str) -> Option<T> {
    let text = match env.storage().read(key) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("persist {key:?}: read failed, using default: {err}");
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("persist {key:?}: stored value undecodable, using default: {err}");
            None
        }
    }
}
