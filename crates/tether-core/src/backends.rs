use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{HttpError, StoreError};

/// Synchronous key-value store holding JSON text. Survives across sessions
/// when the backend does.
pub trait StorageBackend: 'static {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Evaluates whether a media condition currently holds.
pub trait MediaBackend: 'static {
    fn matches(&self, query: &str) -> bool;
}

/// Blocking HTTP GET. Invoked on a request worker thread, or inline when the
/// environment runs in [`SpawnMode::Inline`](crate::env::SpawnMode).
pub trait HttpTransport: Send + Sync + 'static {
    fn get(&self, url: &str) -> Result<Vec<u8>, HttpError>;
}

/// In-memory store for tests and headless runs. Can simulate a full store.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// While set, every `write` fails with [`StoreError::QuotaExceeded`].
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::QuotaExceeded);
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Media backend whose matching queries are toggled explicitly.
#[derive(Default)]
pub struct StaticMedia {
    active: RefCell<HashSet<String>>,
}

impl StaticMedia {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Flip a query's state; emit `EnvEvent::MediaChanged` afterwards so
    /// watchers re-evaluate.
    pub fn set_matches(&self, query: &str, matched: bool) {
        let mut active = self.active.borrow_mut();
        if matched {
            active.insert(query.to_string());
        } else {
            active.remove(query);
        }
    }
}

impl MediaBackend for StaticMedia {
    fn matches(&self, query: &str) -> bool {
        self.active.borrow().contains(query)
    }
}

/// Transport answering from canned per-URL responses.
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<HashMap<String, Result<Vec<u8>, HttpError>>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond_json(&self, url: &str, body: &str) {
        self.responses
            .lock()
            .insert(url.to_string(), Ok(body.as_bytes().to_vec()));
    }

    pub fn respond_err(&self, url: &str, err: HttpError) {
        self.responses.lock().insert(url.to_string(), Err(err));
    }
}

impl HttpTransport for StubTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        self.responses
            .lock()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(HttpError::Transport(format!("no stub response for {url}"))))
    }
}

/// Fails every request; the headless default.
pub struct NoTransport;

impl HttpTransport for NoTransport {
    fn get(&self, _url: &str) -> Result<Vec<u8>, HttpError> {
        Err(HttpError::Transport("no http transport configured".into()))
    }
}
