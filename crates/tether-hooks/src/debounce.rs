use tether_core::{Dispose, current_env, keyed_effect, remember, signal};
use web_time::Duration;

/// Trailing-edge debounce: returns the most recent value that has stayed
/// unchanged for `delay`.
///
/// Every change of `value` (or `delay`) cancels the previously armed timer
/// and arms a new one, so at most one timer is pending per callsite. A zero
/// delay still publishes on the next tick, never synchronously.
pub fn debounced<T: Clone + PartialEq + 'static>(value: T, delay: Duration) -> T {
    let settled = remember({
        let initial = value.clone();
        move || signal(initial)
    });

    keyed_effect((value.clone(), delay), {
        let settled = settled.clone();
        move || {
            let env = current_env();
            let token = env.set_timeout(delay, {
                let settled = settled.clone();
                move || settled.set(value)
            });
            Dispose::new(move || env.cancel_timeout(token))
        }
    });

    settled.get()
}
