//! Notely Server: HTTP surface over the note service.
//!
//! The binary in `main.rs` wires configuration, storage and logging
//! around [`routes::router`]; the library half exists so that the router
//! can be driven directly from tests and from the client crate's tests.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
