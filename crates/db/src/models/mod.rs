//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Filter types consumed by the repository's list queries

pub mod rating;
