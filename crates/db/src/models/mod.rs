//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Read-only projection structs assembled by the repositories

pub mod image;
pub mod office;
pub mod reservation;
pub mod tag;
pub mod user;
