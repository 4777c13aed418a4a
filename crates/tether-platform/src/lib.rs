//! Desktop backends for the tether environment.
//!
//! Wires real primitives under the traits `tether-core` defines: a blocking
//! reqwest transport running on request worker threads, file-backed JSON
//! storage under the platform config directory, and media-query evaluation
//! against live window metrics. The host loop owns the [`WindowMedia`]
//! handle, updates it on resize, and emits `MediaChanged` afterwards.

pub mod http;
pub mod media;
pub mod storage;

pub use http::ReqwestTransport;
pub use media::{WindowMedia, WindowMetrics};
pub use storage::FsStorage;

use std::rc::Rc;
use std::sync::Arc;

use tether_core::{Env, SpawnMode};

#[derive(Debug, thiserror::Error)]
pub enum DesktopEnvError {
    #[error(transparent)]
    Storage(#[from] tether_core::StoreError),
    #[error(transparent)]
    Http(#[from] tether_core::HttpError),
}

/// Environment wired to the real desktop: reqwest on worker threads,
/// storage under the config dir for `app_name`, media evaluated against
/// `media`'s window metrics.
pub fn desktop_env(app_name: &str, media: Rc<WindowMedia>) -> Result<Env, DesktopEnvError> {
    let storage = FsStorage::for_app(app_name)?;
    let transport = ReqwestTransport::new()?;
    Ok(Env::builder()
        .storage(Rc::new(storage))
        .media(media)
        .transport(Arc::new(transport))
        .spawn_mode(SpawnMode::Thread)
        .build())
}
