//! Domain models for Notely.
//!
//! These are the core types shared across all crates.

pub mod identity;
pub mod note;
pub mod tenant;
pub mod user;
