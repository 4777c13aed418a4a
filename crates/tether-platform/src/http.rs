use std::time::Duration;

use tether_core::{HttpError, HttpTransport};

/// Blocking transport for the desktop environment. Runs on request worker
/// threads, never on the composing thread.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("tether/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| HttpError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| HttpError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .map_err(|err| HttpError::Transport(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}
