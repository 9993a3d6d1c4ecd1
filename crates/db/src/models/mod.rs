//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Response / view structs where the row is not sent as-is

pub mod candidate;
pub mod rating;
pub mod team;
pub mod voter;
