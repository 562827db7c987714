//! Repository for the `download_leads` table.

use ledgergate_core::resource::ResourceRef;
use ledgergate_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::download_lead::{DownloadLead, LeadProfile};

/// Column list for `download_leads` queries.
const COLUMNS: &str = "id, name, email, phone, company, resource_kind, resource_id, \
                       otp_code, otp_expires_at, verified, downloaded_at, created_at";

/// Provides CRUD operations for download leads.
///
/// All writes are single-row statements; the unique constraint
/// `uq_download_leads_email_resource` on `(email, resource_kind,
/// resource_id)` makes the two upserts atomic under concurrent duplicate
/// submissions, so the latest OTP cycle always supersedes prior ones for
/// the pair.
pub struct DownloadLeadRepo;

impl DownloadLeadRepo {
    /// Fetch a lead by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DownloadLead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM download_leads WHERE id = $1");
        sqlx::query_as::<_, DownloadLead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent verified lead for an email, across all resources.
    ///
    /// Drives the returning-user shortcut: any hit means the holder has
    /// already proven control of the mailbox once.
    pub async fn latest_verified_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<DownloadLead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM download_leads \
             WHERE email = $1 AND verified = true \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, DownloadLead>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Create or refresh the pending OTP cycle for `(email, resource)`.
    ///
    /// On conflict the profile fields and the code/expiry are replaced;
    /// `verified`, `downloaded_at`, and `created_at` are left untouched.
    /// Only the latest code for the pair is ever valid.
    pub async fn upsert_pending(
        pool: &PgPool,
        profile: &LeadProfile,
        resource: &ResourceRef,
        code: &str,
        expires_at: Timestamp,
    ) -> Result<DownloadLead, sqlx::Error> {
        let query = format!(
            "INSERT INTO download_leads \
                 (name, email, phone, company, resource_kind, resource_id, otp_code, otp_expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT ON CONSTRAINT uq_download_leads_email_resource DO UPDATE \
             SET name = EXCLUDED.name, \
                 phone = EXCLUDED.phone, \
                 company = EXCLUDED.company, \
                 otp_code = EXCLUDED.otp_code, \
                 otp_expires_at = EXCLUDED.otp_expires_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DownloadLead>(&query)
            .bind(&profile.name)
            .bind(&profile.email)
            .bind(&profile.phone)
            .bind(&profile.company)
            .bind(resource.kind())
            .bind(resource.id())
            .bind(code)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Create or update the `(email, resource)` lead as immediately
    /// verified (returning-user shortcut), releasing the download in the
    /// same statement.
    ///
    /// Any outstanding code for the pair is cleared; `downloaded_at` is
    /// stamped only if this is the first release for the lead.
    pub async fn upsert_verified(
        pool: &PgPool,
        profile: &LeadProfile,
        resource: &ResourceRef,
    ) -> Result<DownloadLead, sqlx::Error> {
        let query = format!(
            "INSERT INTO download_leads \
                 (name, email, phone, company, resource_kind, resource_id, verified, downloaded_at) \
             VALUES ($1, $2, $3, $4, $5, $6, true, NOW()) \
             ON CONFLICT ON CONSTRAINT uq_download_leads_email_resource DO UPDATE \
             SET name = EXCLUDED.name, \
                 phone = EXCLUDED.phone, \
                 company = EXCLUDED.company, \
                 verified = true, \
                 otp_code = NULL, \
                 otp_expires_at = NULL, \
                 downloaded_at = COALESCE(download_leads.downloaded_at, NOW()) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DownloadLead>(&query)
            .bind(&profile.name)
            .bind(&profile.email)
            .bind(&profile.phone)
            .bind(&profile.company)
            .bind(resource.kind())
            .bind(resource.id())
            .fetch_one(pool)
            .await
    }

    /// Transition a lead to VERIFIED: clear the code, stamp
    /// `downloaded_at` if this is the first release.
    ///
    /// Returns `None` if the lead does not exist.
    pub async fn mark_verified(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DownloadLead>, sqlx::Error> {
        let query = format!(
            "UPDATE download_leads \
             SET verified = true, \
                 otp_code = NULL, \
                 otp_expires_at = NULL, \
                 downloaded_at = COALESCE(downloaded_at, NOW()) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DownloadLead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the outstanding code for an unverified lead (resend).
    ///
    /// The previous code becomes unverifiable in the same statement.
    /// Returns `None` if the lead does not exist or is already verified.
    pub async fn regenerate_otp(
        pool: &PgPool,
        id: DbId,
        code: &str,
        expires_at: Timestamp,
    ) -> Result<Option<DownloadLead>, sqlx::Error> {
        let query = format!(
            "UPDATE download_leads \
             SET otp_code = $2, otp_expires_at = $3 \
             WHERE id = $1 AND verified = false \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DownloadLead>(&query)
            .bind(id)
            .bind(code)
            .bind(expires_at)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `downloaded_at` if it is still unset. Idempotent.
    pub async fn stamp_downloaded(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DownloadLead>, sqlx::Error> {
        let query = format!(
            "UPDATE download_leads \
             SET downloaded_at = COALESCE(downloaded_at, NOW()) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DownloadLead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
