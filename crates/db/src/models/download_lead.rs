//! Download lead entity model and DTOs.

use ledgergate_core::error::CoreError;
use ledgergate_core::resource::ResourceRef;
use ledgergate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `download_leads` table: one person × one requested
/// resource, plus the state of its verification cycle.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DownloadLead {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub resource_kind: String,
    pub resource_id: DbId,
    /// Never serialized: the code leaves the system only by email.
    #[serde(skip_serializing)]
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<Timestamp>,
    pub verified: bool,
    pub downloaded_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl DownloadLead {
    /// Reassemble the typed resource reference from the stored parts.
    pub fn resource_ref(&self) -> Result<ResourceRef, CoreError> {
        ResourceRef::from_parts(&self.resource_kind, self.resource_id)
    }
}

/// Contact profile fields submitted with a download request.
///
/// `email` is expected to be normalized (trimmed, lowercased) before this
/// struct reaches a repository.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadProfile {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
}
