use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::runtime::remember;
use crate::scope::current_scope;

#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// For effects with nothing to tear down.
    pub fn noop() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        if let Some(f) = self.0.borrow_mut().take() {
            f()
        }
    }
}

/// Effect tied to a dependency key: on the first run and on every change of
/// `key`, runs the previous teardown, then `setup`. The last teardown runs
/// when the owning scope is disposed. Setup runs synchronously, during
/// composition.
pub fn keyed_effect<K: PartialEq + 'static>(key: K, setup: impl FnOnce() -> Dispose) {
    let last_key = remember(|| RefCell::new(None::<K>));
    let cleanup = remember(|| RefCell::new(None::<Dispose>));
    let hooked = remember(|| Cell::new(false));

    // One unmount disposer per callsite.
    if !hooked.get() {
        hooked.set(true);
        if let Some(scope) = current_scope() {
            let cleanup = cleanup.clone();
            scope.add_disposer(move || {
                if let Some(d) = cleanup.borrow_mut().take() {
                    d.run();
                }
            });
        } else {
            log::warn!("keyed_effect outside a composition scope; teardown will not run at unmount");
        }
    }

    let changed = last_key.borrow().as_ref() != Some(&key);
    if changed {
        *last_key.borrow_mut() = Some(key);

        if let Some(d) = cleanup.borrow_mut().take() {
            d.run();
        }

        *cleanup.borrow_mut() = Some(setup());
    }
}
