//! Common test utilities for server integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum_test::TestServer;
use phonegate_core::user::{PersonName, Picture};
use phonegate_core::{Error, ProfileData};
use phonegate_server::store::StoreResult;
use phonegate_server::{routes, AppState, InMemoryStorage, ProfileFetcher, ServerError, SessionStorage};
use serde_json::{json, Value};

pub type TestState = Arc<AppState<InMemoryStorage, MockProfileFetcher>>;

/// Profile fetcher returning a fixed John Doe, or failing on demand.
/// Clones share the call counter.
#[derive(Default, Clone)]
pub struct MockProfileFetcher {
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockProfileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProfileFetcher for MockProfileFetcher {
    fn fetch(&self) -> phonegate_core::Result<ProfileData> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(Error::ProfileFetchFailed("HTTP error: 500 Internal Server Error".into()));
        }

        Ok(john_doe())
    }
}

pub fn john_doe() -> ProfileData {
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

/// Storage with no reachable medium: every operation fails
pub struct UnavailableStorage;

impl SessionStorage for UnavailableStorage {
    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(ServerError::Storage("no storage available".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(ServerError::Storage("no storage available".into()))
    }

    fn remove(&self, _key: &str) -> StoreResult<()> {
        Err(ServerError::Storage("no storage available".into()))
    }
}

/// Create a test server backed by in-memory storage
pub fn create_test_server() -> (TestServer, TestState) {
    create_test_server_with(MockProfileFetcher::new())
}

pub fn create_test_server_with(fetcher: MockProfileFetcher) -> (TestServer, TestState) {
    create_test_server_on(InMemoryStorage::new(), fetcher)
}

/// Create a test server over any storage medium
pub fn create_test_server_on<S>(
    storage: S,
    fetcher: MockProfileFetcher,
) -> (TestServer, Arc<AppState<S, MockProfileFetcher>>)
where
    S: SessionStorage + 'static,
{
    let state = Arc::new(AppState::new(storage, fetcher));
    let app = routes::create_router(Arc::clone(&state));
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, state)
}

/// Submit the login form and return the response body
pub async fn login(server: &TestServer, phone: &str) -> Value {
    let response = server
        .post("/api/login")
        .json(&json!({ "phone": phone }))
        .await;
    assert_eq!(response.status_code(), 200, "login with {phone:?} failed");
    response.json()
}
