//! Domain rules for the Draftboard rating and auction backend.
//!
//! Everything in this crate is pure: no database or HTTP access. The `db`
//! and `api` crates call into these modules before touching storage.

pub mod auction;
pub mod ballot;
pub mod error;
pub mod roles;
pub mod selection;
pub mod types;
