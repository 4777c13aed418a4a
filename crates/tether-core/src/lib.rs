//! # Runtime substrate for tether's hooks
//!
//! tether's hooks are thin wrappers around browser-shaped primitives
//! (timers, HTTP, key-value storage, media conditions, a global pointer
//! stream). This crate is everything they stand on:
//!
//! - `remember*` — lifecycle-aware storage bound to composition slots.
//! - `Signal<T>` — observable, reactive value.
//! - `keyed_effect` — setup on dependency change, teardown before
//!   replacement and at unmount.
//! - [`Env`] — the injected environment capability: clock, timers, event
//!   streams, storage, media evaluation, HTTP transport.
//!
//! ## Remembered state
//!
//! ```rust
//! use tether_core::*;
//!
//! let mut rt = Runtime::headless();
//! rt.frame(|| {
//!     let count = remember_state(|| 0); // Rc<RefCell<i32>>
//!     *count.borrow_mut() += 1;
//! });
//! ```
//!
//! - `remember` and `remember_state` are order-based: the Nth call in a
//!   frame always refers to the Nth stored value.
//! - `remember_with_key` is key-based and more stable across conditional
//!   branches.
//!
//! ## Effects and cleanup
//!
//! ```rust
//! use tether_core::*;
//!
//! let mut rt = Runtime::headless();
//! rt.frame(|| {
//!     keyed_effect("dep-key", || {
//!         // acquire a listener, a timer, ...
//!         Dispose::new(|| { /* ...and release it here */ })
//!     });
//! });
//! ```
//!
//! The teardown runs when the key changes (before the replacement setup) and
//! once more when the owning scope is disposed (`Runtime::shutdown` for the
//! root).
//!
//! ## The environment
//!
//! Hooks read the current [`Env`] through a composition local installed by
//! `Runtime::frame`. Tests build one from the headless backends and drive it
//! by hand: advance the [`TestClock`], `tick()` to fire timers and deliver
//! request results, `dispatch()` to emit pointer or media events.

pub mod backends;
pub mod clock;
pub mod effects;
pub mod env;
pub mod error;
pub mod geometry;
pub mod input;
pub mod locals;
pub mod node_ref;
pub mod runtime;
pub mod scope;
pub mod signal;
pub mod tests;

pub use backends::{HttpTransport, MediaBackend, StorageBackend};
pub use clock::{Clock, SystemClock, TestClock};
pub use effects::{Dispose, keyed_effect};
pub use env::{Env, EnvBuilder, EnvEvent, EventKind, EventToken, HttpResult, SpawnMode, TimerToken};
pub use error::{HttpError, StoreError};
pub use geometry::{Rect, Vec2};
pub use input::{Modifiers, PointerButton, PointerClick};
pub use locals::{current_env, with_env};
pub use node_ref::NodeRef;
pub use runtime::{Runtime, remember, remember_state, remember_with_key};
pub use scope::{Scope, current_scope};
pub use signal::{Signal, SubId, signal};
