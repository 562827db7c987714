//! Resource catalog models (`tools` and `articles` tables).
//!
//! The catalog is written by the admin side of the site; the download
//! gate only reads it to resolve references and build listings.

use ledgergate_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tools` or `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogEntry {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub file_path: String,
    pub published: bool,
    pub created_at: Timestamp,
}

/// Public listing projection. File paths never appear in listings; they
/// are only resolved into URLs after the gate releases a download.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResourceSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
}
