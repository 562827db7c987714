//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - The DTOs the handlers exchange with the repositories

pub mod download_lead;
pub mod resource;
