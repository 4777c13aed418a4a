use std::cell::RefCell;

use tether_core::remember;

struct Tracked<T> {
    prior: Option<T>,
    latest: Option<T>,
}

/// Returns the value observed on the previous update cycle; `None` on the
/// first. A cycle is a change of the observed value: re-composing with an
/// unchanged value returns the same previous value, so host re-reads within
/// a cycle cannot clobber it.
pub fn remember_previous<T: Clone + PartialEq + 'static>(current: T) -> Option<T> {
    let tracked = remember(|| {
        RefCell::new(Tracked::<T> {
            prior: None,
            latest: None,
        })
    });

    let mut tracked = tracked.borrow_mut();
    if tracked.latest.as_ref() != Some(&current) {
        tracked.prior = tracked.latest.take();
        tracked.latest = Some(current);
    }
    tracked.prior.clone()
}
