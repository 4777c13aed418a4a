//! Composition locals.
//!
//! The environment handle reaches hooks the same way a theme reaches
//! widgets: installed for the duration of a frame and read back with a
//! getter that falls back to a default when nothing is installed.

use std::cell::RefCell;

use crate::env::Env;

thread_local! {
    static ENV_STACK: RefCell<Vec<Env>> = const { RefCell::new(Vec::new()) };
    static FALLBACK_ENV: RefCell<Option<Env>> = const { RefCell::new(None) };
}

/// Installs `env` for the duration of `f`. Nesting overrides for the inner
/// extent only.
pub fn with_env<R>(env: Env, f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            ENV_STACK.with(|stack| {
                stack.borrow_mut().pop();
            });
        }
    }
    ENV_STACK.with(|stack| stack.borrow_mut().push(env));
    let _guard = Guard;
    f()
}

/// The innermost installed environment. Outside any `with_env` extent this
/// returns a per-thread headless fallback, once, with a warning.
pub fn current_env() -> Env {
    if let Some(env) = ENV_STACK.with(|stack| stack.borrow().last().cloned()) {
        return env;
    }
    FALLBACK_ENV.with(|fallback| {
        let mut fallback = fallback.borrow_mut();
        if fallback.is_none() {
            log::warn!("no environment installed; falling back to a headless Env");
            *fallback = Some(Env::headless());
        }
        fallback.clone().unwrap_or_else(Env::headless)
    })
}
