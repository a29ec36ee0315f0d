//! Application state

use std::sync::Arc;

use crate::fetcher::ProfileFetcher;
use crate::gate::SessionGate;
use crate::login::LoginService;
use crate::store::SessionStorage;

/// Shared state for all routes
pub struct AppState<S, F> {
    pub gate: SessionGate<S>,
    pub login: LoginService<S, F>,
}

impl<S, F> AppState<S, F>
where
    S: SessionStorage,
    F: ProfileFetcher + 'static,
{
    pub fn new(storage: S, fetcher: F) -> Self {
        let gate = SessionGate::new(Arc::new(storage));
        let login = LoginService::new(gate.clone(), Arc::new(fetcher));
        Self { gate, login }
    }
}
