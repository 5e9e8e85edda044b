//! Shared application state handed to every handler.

use std::sync::Arc;

use notely_auth::{AuthConfig, AuthService};
use notely_db::repository::{
    SurrealNoteRepository, SurrealTenantRepository, SurrealUserRepository,
};
use notely_notes::NoteService;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

pub type Auth = AuthService<SurrealUserRepository<Any>, SurrealTenantRepository<Any>>;
pub type Notes = NoteService<SurrealNoteRepository<Any>, SurrealTenantRepository<Any>>;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<Auth>,
    pub notes: Arc<Notes>,
}

impl AppState {
    pub fn new(db: Surreal<Any>, auth_config: AuthConfig) -> Self {
        let tenants = SurrealTenantRepository::new(db.clone());
        let users = SurrealUserRepository::with_pepper(db.clone(), auth_config.pepper.clone());
        let notes = SurrealNoteRepository::new(db);

        Self {
            auth: Arc::new(AuthService::new(users, tenants.clone(), auth_config)),
            notes: Arc::new(NoteService::new(notes, tenants)),
        }
    }
}
