//! Handlers for the OTP-gated download workflow.
//!
//! A lead moves `PENDING_OTP -> VERIFIED` (terminal) or
//! `PENDING_OTP -> EXPIRED`, where expiry recovers only through resend.
//! Emails that already hold a verified lead for any resource skip OTP
//! issuance entirely and get the download released on submit.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use ledgergate_core::error::CoreError;
use ledgergate_core::resource::{self, ResourceRef};
use ledgergate_core::types::DbId;
use ledgergate_core::{leads, otp};
use ledgergate_db::models::download_lead::{DownloadLead, LeadProfile};
use ledgergate_db::models::resource::CatalogEntry;
use ledgergate_db::repositories::{DownloadLeadRepo, ResourceRepo};
use ledgergate_mailer::messages;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a download lead exists, returning the full row.
async fn ensure_lead_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<DownloadLead> {
    DownloadLeadRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "DownloadLead",
                id,
            })
        })
}

/// Resolve a resource reference against the published catalog.
async fn resolve_resource(pool: &sqlx::PgPool, reference: &ResourceRef) -> AppResult<CatalogEntry> {
    ResourceRepo::resolve(pool, reference)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: reference.entity_name(),
                id: reference.id(),
            })
        })
}

/// Build the public download URL for a resolved catalog entry.
fn download_url_for(state: &AppState, entry: &CatalogEntry) -> String {
    resource::join_download_url(&state.config.download_base_url, &entry.file_path)
}

/// Validate and normalize the submitted contact profile.
fn normalized_profile(
    name: &str,
    email: &str,
    phone: Option<String>,
    company: Option<String>,
) -> AppResult<LeadProfile> {
    leads::validate_name(name)?;
    let email = leads::normalize_email(email);
    leads::validate_email(&email)?;
    Ok(LeadProfile {
        name: name.trim().to_string(),
        email,
        phone,
        company,
    })
}

// ---------------------------------------------------------------------------
// Request/response payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RecognizeRequest {
    pub email: String,
}

/// Known profile fields from the most recent verified lead, used by the
/// UI to pre-fill the request form.
#[derive(Debug, Serialize)]
pub struct KnownProfile {
    pub name: String,
    pub phone: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecognizeResponse {
    pub recognized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<KnownProfile>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub resource: ResourceRef,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub recognized: bool,
    pub lead_id: DbId,
    /// Present only when the returning-user shortcut released immediately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub lead_id: DbId,
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub download_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ResendRequest {
    pub lead_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct ResendResponse {
    pub lead_id: DbId,
}

// ---------------------------------------------------------------------------
// POST /downloads/recognize
// ---------------------------------------------------------------------------

/// Read-only returning-user check for form pre-fill.
///
/// Reports whether the email has any prior verified lead, and if so the
/// profile fields from the most recent one. No side effects; the actual
/// shortcut decision is recomputed on submit.
pub async fn recognize(
    State(state): State<AppState>,
    Json(input): Json<RecognizeRequest>,
) -> AppResult<impl IntoResponse> {
    let email = leads::normalize_email(&input.email);
    leads::validate_email(&email)?;

    let prior = DownloadLeadRepo::latest_verified_by_email(&state.pool, &email).await?;

    let response = match prior {
        Some(lead) => RecognizeResponse {
            recognized: true,
            profile: Some(KnownProfile {
                name: lead.name,
                phone: lead.phone,
                company: lead.company,
            }),
        },
        None => RecognizeResponse {
            recognized: false,
            profile: None,
        },
    };

    Ok(Json(DataResponse { data: response }))
}

// ---------------------------------------------------------------------------
// POST /downloads/requests
// ---------------------------------------------------------------------------

/// Intake: create or refresh the lead for `(email, resource)`.
///
/// An email with a prior verified lead skips OTP issuance: the lead is
/// upserted as verified and the download URL is returned immediately.
/// Everyone else gets a fresh OTP cycle: the row is persisted first, then
/// the code is emailed. A transport failure after persistence surfaces as
/// `DELIVERY_FAILED`; the stored code stays valid and resend recovers.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<SubmitRequest>,
) -> AppResult<impl IntoResponse> {
    let profile = normalized_profile(&input.name, &input.email, input.phone, input.company)?;
    let entry = resolve_resource(&state.pool, &input.resource).await?;

    let prior = DownloadLeadRepo::latest_verified_by_email(&state.pool, &profile.email).await?;

    if prior.is_some() {
        // Returning-user shortcut: mailbox control was proven once already.
        let lead = DownloadLeadRepo::upsert_verified(&state.pool, &profile, &input.resource).await?;

        tracing::info!(
            lead_id = lead.id,
            resource = %input.resource,
            "Returning user recognized, download released without OTP",
        );

        let response = SubmitResponse {
            recognized: true,
            lead_id: lead.id,
            download_url: Some(download_url_for(&state, &entry)),
        };
        return Ok((StatusCode::OK, Json(DataResponse { data: response })));
    }

    let code = otp::generate_code();
    let expires_at = otp::expiry_from(Utc::now());
    let lead =
        DownloadLeadRepo::upsert_pending(&state.pool, &profile, &input.resource, &code, expires_at)
            .await?;

    tracing::info!(lead_id = lead.id, resource = %input.resource, "OTP issued");

    let email = messages::otp_email(&profile.email, &code, &entry.title, otp::OTP_TTL_MINUTES);
    state.mailer.send(email).await?;

    let response = SubmitResponse {
        recognized: false,
        lead_id: lead.id,
        download_url: None,
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

// ---------------------------------------------------------------------------
// POST /downloads/verify
// ---------------------------------------------------------------------------

/// Verify a submitted code and release the download.
///
/// Expiry is checked before the code comparison, so a correct-but-stale
/// code reports `OTP_EXPIRED`. A mismatch changes nothing: the stored
/// code stays valid until its deadline. There is no attempt counter;
/// wrong codes may be retried until expiry.
pub async fn verify(
    State(state): State<AppState>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<impl IntoResponse> {
    let lead = ensure_lead_exists(&state.pool, input.lead_id).await?;
    let reference = lead.resource_ref()?;
    let entry = resolve_resource(&state.pool, &reference).await?;

    // Repeat downloads never require re-verification.
    if lead.verified {
        let response = DownloadResponse {
            download_url: download_url_for(&state, &entry),
        };
        return Ok(Json(DataResponse { data: response }));
    }

    otp::check_code(
        lead.otp_code.as_deref(),
        lead.otp_expires_at,
        &input.otp,
        Utc::now(),
    )?;

    let lead = DownloadLeadRepo::mark_verified(&state.pool, lead.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DownloadLead",
            id: input.lead_id,
        }))?;

    tracing::info!(lead_id = lead.id, resource = %reference, "Lead verified, download released");

    let response = DownloadResponse {
        download_url: download_url_for(&state, &entry),
    };
    Ok(Json(DataResponse { data: response }))
}

// ---------------------------------------------------------------------------
// POST /downloads/resend
// ---------------------------------------------------------------------------

/// Regenerate the code for a pending lead and email it again.
///
/// The previous code is superseded in the same statement; only the
/// latest code for a lead is ever valid.
pub async fn resend(
    State(state): State<AppState>,
    Json(input): Json<ResendRequest>,
) -> AppResult<impl IntoResponse> {
    let lead = ensure_lead_exists(&state.pool, input.lead_id).await?;

    if lead.verified {
        return Err(AppError::Core(CoreError::Validation(
            "Lead is already verified; the download can be requested directly".to_string(),
        )));
    }

    let reference = lead.resource_ref()?;
    let entry = resolve_resource(&state.pool, &reference).await?;

    let code = otp::generate_code();
    let expires_at = otp::expiry_from(Utc::now());
    let lead = DownloadLeadRepo::regenerate_otp(&state.pool, lead.id, &code, expires_at)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DownloadLead",
            id: input.lead_id,
        }))?;

    tracing::info!(lead_id = lead.id, resource = %reference, "OTP regenerated");

    let email = messages::otp_email(&lead.email, &code, &entry.title, otp::OTP_TTL_MINUTES);
    state.mailer.send(email).await?;

    Ok(Json(DataResponse {
        data: ResendResponse { lead_id: lead.id },
    }))
}

// ---------------------------------------------------------------------------
// GET /downloads/leads/{id}/file
// ---------------------------------------------------------------------------

/// Re-release a download for an already-verified lead.
///
/// Idempotent: the same URL comes back every time, and `downloaded_at`
/// keeps its first value.
pub async fn release(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lead = ensure_lead_exists(&state.pool, id).await?;

    if !lead.verified {
        return Err(AppError::Core(CoreError::Validation(
            "Download has not been verified for this lead".to_string(),
        )));
    }

    let reference = lead.resource_ref()?;
    let entry = resolve_resource(&state.pool, &reference).await?;

    DownloadLeadRepo::stamp_downloaded(&state.pool, lead.id).await?;

    let response = DownloadResponse {
        download_url: download_url_for(&state, &entry),
    };
    Ok(Json(DataResponse { data: response }))
}
