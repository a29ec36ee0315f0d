//! Random profile fetching
//!
//! The profile service is an untrusted collaborator: its response is checked
//! against the expected shape before anything is stored.

use std::sync::Arc;
use std::time::Duration;

use phonegate_core::{Error, ProfileData, RandomUserResponse};
use reqwest::blocking::Client;

/// Default endpoint returning one synthetic profile
pub const DEFAULT_PROFILE_URL: &str = "https://randomuser.me/api/?results=1&nat=us";

/// Trait for fetching a profile to attach to a new session
pub trait ProfileFetcher: Send + Sync {
    fn fetch(&self) -> phonegate_core::Result<ProfileData>;
}

/// HTTP-based profile fetcher
pub struct HttpProfileFetcher {
    endpoint: String,
    timeout: Duration,
}

impl HttpProfileFetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpProfileFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_URL)
    }
}

impl ProfileFetcher for HttpProfileFetcher {
    fn fetch(&self) -> phonegate_core::Result<ProfileData> {
        // Built per call: a blocking client must not be created or dropped
        // on an async worker thread.
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::ProfileFetchFailed(format!("HTTP client error: {}", e)))?;

        let response = client
            .get(&self.endpoint)
            .send()
            .map_err(|e| Error::ProfileFetchFailed(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ProfileFetchFailed(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body: RandomUserResponse = response
            .json()
            .map_err(|e| Error::ProfileFetchFailed(format!("Invalid JSON: {}", e)))?;

        body.into_profile()
    }
}

/// Run a fetch on the blocking pool
pub async fn fetch_profile<F>(fetcher: Arc<F>) -> phonegate_core::Result<ProfileData>
where
    F: ProfileFetcher + 'static,
{
    tokio::task::spawn_blocking(move || fetcher.fetch())
        .await
        .map_err(|e| Error::ProfileFetchFailed(format!("Blocking task failed: {}", e)))?
}
