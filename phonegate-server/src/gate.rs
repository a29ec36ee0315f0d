//! Session gate for protected pages
//!
//! Reads the single session slot and decides whether a visitor may see a
//! protected page. A stored value that fails validation is deleted and
//! treated as absent; the gate never reports a read failure to its caller.

use std::sync::Arc;

use phonegate_core::{Error, PhoneNumber, ProfileData, SessionRecord, SESSION_STORAGE_KEY};

use crate::store::SessionStorage;

/// Outcome of a gate evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Not evaluated yet
    #[default]
    Unknown,
    /// A valid record was found
    Admitted(SessionRecord),
    /// No valid record; the visitor was sent to the entry page
    Denied,
}

impl SessionState {
    pub fn is_admitted(&self) -> bool {
        matches!(self, SessionState::Admitted(_))
    }
}

/// Gate over the session slot of a storage medium
pub struct SessionGate<S> {
    storage: Arc<S>,
}

impl<S> Clone for SessionGate<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: SessionStorage> SessionGate<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored record, if there is a valid one
    pub fn get_user(&self) -> Option<SessionRecord> {
        let stored = match self.storage.get(SESSION_STORAGE_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session record");
                return None;
            }
        };

        match SessionRecord::from_json(&stored) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding invalid session record");
                self.logout();
                None
            }
        }
    }

    /// Whether a valid record is stored. Deletes a corrupt one.
    pub fn has_valid_session(&self) -> bool {
        self.get_user().is_some()
    }

    /// Evaluate the gate once. `on_denied` runs exactly once when no valid
    /// record exists, before `Denied` is returned.
    pub fn admit_or_redirect<F>(&self, on_denied: F) -> SessionState
    where
        F: FnOnce(),
    {
        match self.get_user() {
            Some(record) => SessionState::Admitted(record),
            None => {
                on_denied();
                SessionState::Denied
            }
        }
    }

    /// Persist a new session, replacing any previous one
    pub fn login(
        &self,
        profile: ProfileData,
        phone: PhoneNumber,
    ) -> phonegate_core::Result<SessionRecord> {
        let record = SessionRecord::new(profile, phone);
        let json = record.to_json()?;

        self.storage
            .set(SESSION_STORAGE_KEY, &json)
            .map_err(|e| Error::StorageWrite(e.to_string()))?;

        tracing::info!(phone = %record.phone_normalized, "Session stored");
        Ok(record)
    }

    /// Delete the stored session. Succeeds when nothing is stored.
    pub fn logout(&self) {
        if let Err(e) = self.storage.remove(SESSION_STORAGE_KEY) {
            tracing::error!(error = %e, "Failed to clear session record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStorage;
    use phonegate_core::user::{PersonName, Picture};

    fn profile() -> ProfileData {
        ProfileData {
            name: PersonName {
                first: "John".into(),
                last: "Doe".into(),
            },
            email: "john.doe@example.com".into(),
            picture: Picture {
                large: "https://randomuser.me/api/portraits/men/1.jpg".into(),
                medium: "https://randomuser.me/api/portraits/med/men/1.jpg".into(),
                thumbnail: "https://randomuser.me/api/portraits/thumb/men/1.jpg".into(),
            },
        }
    }

    fn gate() -> SessionGate<InMemoryStorage> {
        SessionGate::new(Arc::new(InMemoryStorage::new()))
    }

    #[test]
    fn test_default_state_is_unknown() {
        assert_eq!(SessionState::default(), SessionState::Unknown);
    }

    #[test]
    fn test_no_record_denies_once() {
        let gate = gate();
        let mut redirects = 0;

        let state = gate.admit_or_redirect(|| redirects += 1);

        assert_eq!(state, SessionState::Denied);
        assert_eq!(redirects, 1);
    }

    #[test]
    fn test_login_then_admit() {
        let gate = gate();
        let phone = PhoneNumber::parse("+989123456789").unwrap();
        gate.login(profile(), phone.clone()).unwrap();

        let mut redirected = false;
        let state = gate.admit_or_redirect(|| redirected = true);

        assert!(!redirected);
        assert!(state.is_admitted());
        match state {
            SessionState::Admitted(record) => {
                assert_eq!(record.phone_normalized, phone);
                assert_eq!(record.display_name(), "John Doe");
            }
            other => panic!("expected Admitted, got {other:?}"),
        }
    }

    #[test]
    fn test_login_overwrites_previous_session() {
        let gate = gate();
        gate.login(profile(), PhoneNumber::parse("+989111111111").unwrap())
            .unwrap();
        gate.login(profile(), PhoneNumber::parse("+989222222222").unwrap())
            .unwrap();

        let record = gate.get_user().unwrap();
        assert_eq!(record.phone_normalized.as_str(), "+989222222222");
        assert_eq!(gate.storage().len().unwrap(), 1);
    }

    #[test]
    fn test_login_rejects_invalid_profile() {
        let gate = gate();
        let mut bad = profile();
        bad.picture.large = "not a url".into();

        let result = gate.login(bad, PhoneNumber::parse("+989123456789").unwrap());

        assert!(matches!(result, Err(Error::StorageWrite(_))));
        assert!(!gate.has_valid_session());
    }

    #[test]
    fn test_corrupt_record_is_deleted() {
        let gate = gate();
        gate.storage().set(SESSION_STORAGE_KEY, "{\"name\":").unwrap();

        assert!(!gate.has_valid_session());
        assert!(gate.storage().get(SESSION_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let gate = gate();
        gate.login(profile(), PhoneNumber::parse("+989123456789").unwrap())
            .unwrap();

        gate.logout();
        gate.logout();

        assert!(!gate.has_valid_session());
    }
}
