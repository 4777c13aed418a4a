//! The environment capability.
//!
//! Hooks never touch timers, event streams, storage, media state, or HTTP
//! directly. They go through an [`Env`] handle installed as a composition
//! local, so the same hook code runs against the real desktop backends or a
//! deterministic headless environment.
//!
//! The environment is single-threaded cooperative: request workers are the
//! only other threads, and they communicate exclusively by sending `Send`
//! payloads over a channel that [`Env::pump`] drains on the composing thread.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use slotmap::SlotMap;
use web_time::{Duration, Instant};

use crate::backends::{
    HttpTransport, MediaBackend, MemoryStorage, NoTransport, StaticMedia, StorageBackend,
};
use crate::clock::{Clock, SystemClock};
use crate::error::HttpError;
use crate::input::PointerClick;

slotmap::new_key_type! {
    pub struct EventToken;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    PointerClick,
    MediaChange,
}

/// An event on one of the environment-wide streams.
#[derive(Clone, Debug)]
pub enum EnvEvent {
    PointerClick(PointerClick),
    MediaChanged,
}

impl EnvEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            EnvEvent::PointerClick(_) => EventKind::PointerClick,
            EnvEvent::MediaChanged => EventKind::MediaChange,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

struct TimerEntry {
    due: Instant,
    token: TimerToken,
}

// Min-heap on `due`; token order breaks ties so equal deadlines fire in
// arming order.
impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.token.0.cmp(&self.token.0))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.token == other.token
    }
}

impl Eq for TimerEntry {}

#[derive(Default)]
struct Timers {
    queue: BinaryHeap<TimerEntry>,
    callbacks: HashMap<TimerToken, Box<dyn FnOnce()>>,
    next: u64,
}

pub type HttpResult = Result<Vec<u8>, HttpError>;

/// How request work leaves the composing thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnMode {
    /// Run the transport on a worker thread. The desktop default.
    Thread,
    /// Run the transport inline and queue the result for the next pump.
    /// Deterministic; the headless default.
    Inline,
}

struct Requests {
    mode: SpawnMode,
    next: Cell<u64>,
    // Continuations hold Rc state and never leave this thread; only the
    // (id, payload) pair crosses the channel.
    waiting: RefCell<HashMap<u64, Box<dyn FnOnce(HttpResult)>>>,
    tx: Sender<(u64, HttpResult)>,
    rx: Receiver<(u64, HttpResult)>,
}

struct Subscriber {
    kind: EventKind,
    handler: Rc<dyn Fn(&EnvEvent)>,
}

struct EnvInner {
    clock: Rc<dyn Clock>,
    subscribers: RefCell<SlotMap<EventToken, Subscriber>>,
    timers: RefCell<Timers>,
    requests: Requests,
    storage: Rc<dyn StorageBackend>,
    media: Rc<dyn MediaBackend>,
    http: Arc<dyn HttpTransport>,
}

/// Cheap-to-clone handle on the host environment.
#[derive(Clone)]
pub struct Env {
    inner: Rc<EnvInner>,
}

impl Env {
    pub fn builder() -> EnvBuilder {
        EnvBuilder::default()
    }

    /// In-memory storage, no matching media, no transport, inline spawns.
    pub fn headless() -> Self {
        Self::builder().build()
    }

    pub fn now(&self) -> Instant {
        self.inner.clock.now()
    }

    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl Fn(&EnvEvent) + 'static,
    ) -> EventToken {
        self.inner.subscribers.borrow_mut().insert(Subscriber {
            kind,
            handler: Rc::new(handler),
        })
    }

    pub fn unsubscribe(&self, token: EventToken) {
        self.inner.subscribers.borrow_mut().remove(token);
    }

    /// Delivers `event` to every subscriber of its kind. Handlers may
    /// subscribe or unsubscribe while running; the delivery list is the set
    /// of subscribers present when `emit` started.
    pub fn emit(&self, event: EnvEvent) {
        let kind = event.kind();
        let handlers: Vec<Rc<dyn Fn(&EnvEvent)>> = self
            .inner
            .subscribers
            .borrow()
            .values()
            .filter(|s| s.kind == kind)
            .map(|s| s.handler.clone())
            .collect();
        for handler in handlers {
            handler(&event);
        }
    }

    /// Arms a one-shot timer. Due timers fire during [`pump`](Self::pump),
    /// never synchronously: a zero delay fires on the next tick.
    pub fn set_timeout(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerToken {
        let mut timers = self.inner.timers.borrow_mut();
        let token = TimerToken(timers.next);
        timers.next += 1;
        timers.queue.push(TimerEntry {
            due: self.inner.clock.now() + delay,
            token,
        });
        timers.callbacks.insert(token, Box::new(callback));
        token
    }

    pub fn cancel_timeout(&self, token: TimerToken) {
        self.inner.timers.borrow_mut().callbacks.remove(&token);
    }

    /// Issues an HTTP GET through the transport and hands the result to
    /// `on_done` during a later pump. There is no cancellation: a superseded
    /// request still runs to completion and still delivers.
    pub fn request(&self, url: impl Into<String>, on_done: impl FnOnce(HttpResult) + 'static) {
        let url = url.into();
        let requests = &self.inner.requests;
        let id = requests.next.get();
        requests.next.set(id + 1);
        requests.waiting.borrow_mut().insert(id, Box::new(on_done));

        let http = self.inner.http.clone();
        let tx = requests.tx.clone();
        match requests.mode {
            SpawnMode::Thread => {
                std::thread::spawn(move || {
                    let _ = tx.send((id, http.get(&url)));
                });
            }
            SpawnMode::Inline => {
                let _ = tx.send((id, http.get(&url)));
            }
        }
    }

    /// Fires due timers, then delivers completed request results, in arrival
    /// order. Call once per host tick.
    pub fn pump(&self) {
        let now = self.inner.clock.now();
        loop {
            let callback = {
                let mut timers = self.inner.timers.borrow_mut();
                if !timers.queue.peek().is_some_and(|entry| entry.due <= now) {
                    break;
                }
                timers
                    .queue
                    .pop()
                    .and_then(|entry| timers.callbacks.remove(&entry.token))
            };
            // Cancelled timers leave a stale heap entry behind; skip them.
            if let Some(callback) = callback {
                callback();
            }
        }

        loop {
            let Ok((id, result)) = self.inner.requests.rx.try_recv() else {
                break;
            };
            let continuation = self.inner.requests.waiting.borrow_mut().remove(&id);
            if let Some(continuation) = continuation {
                continuation(result);
            }
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        &*self.inner.storage
    }

    pub fn media_matches(&self, query: &str) -> bool {
        self.inner.media.matches(query)
    }
}

pub struct EnvBuilder {
    clock: Rc<dyn Clock>,
    storage: Rc<dyn StorageBackend>,
    media: Rc<dyn MediaBackend>,
    http: Arc<dyn HttpTransport>,
    mode: SpawnMode,
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self {
            clock: Rc::new(SystemClock),
            storage: MemoryStorage::new(),
            media: StaticMedia::new(),
            http: Arc::new(NoTransport),
            mode: SpawnMode::Inline,
        }
    }
}

impl EnvBuilder {
    pub fn clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn storage(mut self, storage: Rc<dyn StorageBackend>) -> Self {
        self.storage = storage;
        self
    }

    pub fn media(mut self, media: Rc<dyn MediaBackend>) -> Self {
        self.media = media;
        self
    }

    pub fn transport(mut self, http: Arc<dyn HttpTransport>) -> Self {
        self.http = http;
        self
    }

    pub fn spawn_mode(mut self, mode: SpawnMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn build(self) -> Env {
        let (tx, rx) = channel();
        Env {
            inner: Rc::new(EnvInner {
                clock: self.clock,
                subscribers: RefCell::new(SlotMap::with_key()),
                timers: RefCell::new(Timers::default()),
                requests: Requests {
                    mode: self.mode,
                    next: Cell::new(0),
                    waiting: RefCell::new(HashMap::new()),
                    tx,
                    rx,
                },
                storage: self.storage,
                media: self.media,
                http: self.http,
            }),
        }
    }
}
