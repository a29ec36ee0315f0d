//! phonegate login service
//!
//! A demo login: any well-formed Iranian mobile number gets a random profile
//! and a session. The session lives in a single storage slot and gates the
//! dashboard.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod gate;
pub mod login;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::ServerError;
pub use fetcher::{HttpProfileFetcher, ProfileFetcher};
pub use gate::{SessionGate, SessionState};
pub use login::LoginService;
pub use state::AppState;
pub use store::{InMemoryStorage, SessionStorage, SqliteStorage};
