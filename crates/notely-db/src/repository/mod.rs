//! SurrealDB repository implementations.

mod note;
mod tenant;
mod user;

use surrealdb_types::SurrealValue;

pub use note::SurrealNoteRepository;
pub use tenant::SurrealTenantRepository;
pub use user::SurrealUserRepository;

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}
