//! Notely Notes: the authorization and quota core.
//!
//! Every operation takes the caller's verified [`Claims`] and derives the
//! tenant scope from them; nothing tenant-related is ever read from
//! request input.
//!
//! [`Claims`]: notely_core::models::identity::Claims

pub mod input;
pub mod service;

pub use input::NoteInput;
pub use service::NoteService;
