//! Notely Core: domain models, repository traits, the error taxonomy
//! and the role/plan access policy shared by every other crate.

pub mod error;
pub mod models;
pub mod policy;
pub mod repository;

pub use error::{ErrorCode, NotelyError, NotelyResult};
