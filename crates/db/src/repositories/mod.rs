//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod download_lead_repo;
pub mod resource_repo;

pub use download_lead_repo::DownloadLeadRepo;
pub use resource_repo::ResourceRepo;
