use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::env::{Env, EnvEvent};
use crate::locals::with_env;
use crate::scope::Scope;

thread_local! {
    pub(crate) static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

/// Slot table backing `remember*`. One composer per thread; the cursor is
/// reset at the start of every frame, the slots persist across frames.
#[derive(Default)]
pub struct Composer {
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
    keyed_slots: HashMap<String, Box<dyn Any>>,
}

impl Composer {
    fn begin_frame(&mut self) {
        self.cursor = 0;
    }

    fn reset(&mut self) {
        self.slots.clear();
        self.keyed_slots.clear();
        self.cursor = 0;
    }
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;

        if cursor >= c.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            c.slots.push(Box::new(rc.clone()));
            return rc;
        }

        if let Some(rc) = c.slots[cursor].downcast_ref::<Rc<T>>() {
            rc.clone()
        } else {
            // replace (else panics)
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            c.slots[cursor] = Box::new(rc.clone());
            rc
        }
    })
}

/// Key-based remember, stable across conditional branches.
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let key = key.into();

        if let Some(existing) = c.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            } else {
                log::warn!(
                    "remember_with_key: key '{}' reused with a different type; replacing.",
                    key
                );
            }
        }

        let rc: Rc<T> = Rc::new(init());
        c.keyed_slots.insert(key, Box::new(rc.clone()));
        rc
    })
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

/// Owns the environment and the root scope for a composition. Drives frames,
/// ticks the environment, and feeds it events.
///
/// One runtime per thread at a time: the composer slot table is
/// thread-local.
pub struct Runtime {
    env: Env,
    root: Scope,
}

impl Runtime {
    pub fn new(env: Env) -> Self {
        COMPOSER.with(|c| c.borrow_mut().reset());
        Self {
            env,
            root: Scope::new(),
        }
    }

    pub fn headless() -> Self {
        Self::new(Env::headless())
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Composes one frame: resets the slot cursor and runs `build` under the
    /// root scope with the environment installed.
    pub fn frame<R>(&mut self, build: impl FnOnce() -> R) -> R {
        COMPOSER.with(|c| c.borrow_mut().begin_frame());
        let env = self.env.clone();
        with_env(env, || self.root.run(build))
    }

    /// Pumps the environment: fires due timers and delivers completed
    /// request results.
    pub fn tick(&self) {
        self.env.pump();
    }

    /// Feeds an environment event to subscribers.
    pub fn dispatch(&self, event: EnvEvent) {
        self.env.emit(event);
    }

    /// Disposes the root scope (running every effect teardown) and clears
    /// the composer. Dropping the runtime tears down the same way.
    pub fn shutdown(self) {
        let Runtime { root, .. } = self;
        root.dispose();
        COMPOSER.with(|c| c.borrow_mut().reset());
    }
}
