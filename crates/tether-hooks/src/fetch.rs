use serde::de::DeserializeOwned;
use tether_core::{Dispose, HttpError, current_env, keyed_effect, remember, signal};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("decode: {0}")]
    Decode(String),
}

/// Tri-state result of an in-flight or settled request.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<FetchError>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Issues an HTTP GET for `url` and decodes the response body as JSON.
///
/// On every URL change: `loading` goes up, `error` clears, and a new request
/// is issued. On delivery, success populates `data`; any failure (transport,
/// status, decode) populates `error` and leaves `data` at its previous
/// value. Either way `loading` drops.
///
/// Requests are never cancelled. If the URL changes while one is in flight,
/// every request runs to completion and the last *delivered* response wins
/// the final state, whatever its issue order. Callers that care should key
/// the composition so a stale callsite unmounts instead.
pub fn fetch_json<T>(url: &str) -> FetchState<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    let state = remember(|| signal(FetchState::<T>::default()));

    keyed_effect(url.to_string(), {
        let state = state.clone();
        let url = url.to_string();
        move || {
            state.update(|s| {
                s.loading = true;
                s.error = None;
            });

            let env = current_env();
            env.request(url, {
                let state = state.clone();
                move |result| {
                    state.update(|s| {
                        s.loading = false;
                        match result.map_err(FetchError::Http).and_then(decode::<T>) {
                            Ok(data) => {
                                s.data = Some(data);
                                s.error = None;
                            }
                            // data keeps its previous value
                            Err(err) => s.error = Some(err),
                        }
                    });
                }
            });

            // In-flight requests are not aborted on key change.
            Dispose::noop()
        }
    });

    state.get()
}

fn decode<T: DeserializeOwned>(bytes: Vec<u8>) -> Result<T, FetchError> {
    serde_json::from_slice(&bytes).map_err(|err| FetchError::Decode(err.to_string()))
}
