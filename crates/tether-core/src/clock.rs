use std::cell::Cell;
use std::rc::Rc;

use web_time::{Duration, Instant};

/// Time source for timers. The environment owns one per instance, so tests
/// can drive it without touching global state.
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A test clock you can drive deterministically.
pub struct TestClock {
    t: Cell<Instant>,
}

impl TestClock {
    pub fn start_now() -> Rc<Self> {
        Rc::new(Self {
            t: Cell::new(Instant::now()),
        })
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}
