//! # UI-state hooks
//!
//! Seven independent utilities for composition-based UIs, each a thin
//! wrapper around an environment primitive (timers, HTTP, key-value
//! storage, media conditions, the global pointer stream) or around trivial
//! state bookkeeping. None depends on another; a component may use any
//! number of them in the same frame.
//!
//! | Hook | Wraps |
//! |---|---|
//! | [`on_click_outside`] | global pointer-click stream + element bounds |
//! | [`debounced`] | environment timers |
//! | [`fetch_json`] | HTTP transport, JSON decode |
//! | [`persisted`] | persistent key-value store |
//! | [`media_matches`] | media-condition evaluation + change events |
//! | [`remember_previous`] | a slot holding the prior cycle's value |
//! | [`remember_toggle`] | a boolean signal |
//!
//! All of them read the current [`Env`](tether_core::Env) through the
//! composition local installed by `Runtime::frame`, and release whatever
//! they acquire (timers, subscriptions) when their dependency key changes
//! or the owning scope is torn down. Failures never escape as panics: the
//! fetcher reports through its `error` field, the persistent binding logs
//! and falls back.

pub mod debounce;
pub mod fetch;
pub mod media;
pub mod outside;
pub mod persist;
pub mod previous;
pub mod toggle;

pub use debounce::debounced;
pub use fetch::{FetchError, FetchState, fetch_json};
pub use media::media_matches;
pub use outside::on_click_outside;
pub use persist::{PersistError, Persisted, persisted};
pub use previous::remember_previous;
pub use toggle::{Toggle, remember_toggle};
