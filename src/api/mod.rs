//! Client for the Dreaming external time API
//!
//! Covers the two endpoints the migration needs: the paginated list of time
//! entries for an account/language pair, and the create endpoint for a single
//! entry. Each client is bound to one account's bearer token.

pub mod client;
pub mod constants;
pub mod error;
pub mod models;

pub use client::DreamingClient;
pub use error::ApiFailure;
pub use models::{ActivityType, EntryPage, Language, NewTimeEntry, TimeEntry};
