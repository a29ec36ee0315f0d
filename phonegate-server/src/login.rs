//! Phone login flow
//!
//! Validate the number, fetch a profile, store the session. Only one attempt
//! may be in flight at a time; a second one fails fast instead of queueing.

use std::sync::Arc;

use phonegate_core::{phone, Error, SessionRecord};
use tokio::sync::Mutex;

use crate::fetcher::{fetch_profile, ProfileFetcher};
use crate::gate::SessionGate;
use crate::store::SessionStorage;

pub struct LoginService<S, F> {
    gate: SessionGate<S>,
    fetcher: Arc<F>,
    in_flight: Mutex<()>,
}

impl<S, F> LoginService<S, F>
where
    S: SessionStorage,
    F: ProfileFetcher + 'static,
{
    pub fn new(gate: SessionGate<S>, fetcher: Arc<F>) -> Self {
        Self {
            gate,
            fetcher,
            in_flight: Mutex::new(()),
        }
    }

    /// Log in with a raw, user-entered phone number
    pub async fn login(&self, raw_phone: &str) -> phonegate_core::Result<SessionRecord> {
        let phone = phone::validate_and_normalize(raw_phone)?;

        let _guard = self.in_flight.try_lock().map_err(|_| {
            tracing::debug!("Rejecting login while another is in flight");
            Error::LoginInProgress
        })?;

        let profile = fetch_profile(Arc::clone(&self.fetcher)).await?;
        let record = self.gate.login(profile, phone)?;

        tracing::info!(
            phone = %record.phone_normalized,
            name = %record.display_name(),
            "Login succeeded"
        );
        Ok(record)
    }
}
