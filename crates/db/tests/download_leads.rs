//! Repository tests for the `download_leads` table.

use chrono::{Duration, Utc};
use ledgergate_core::resource::ResourceRef;
use ledgergate_db::models::download_lead::LeadProfile;
use ledgergate_db::repositories::{DownloadLeadRepo, ResourceRepo};
use sqlx::PgPool;

fn profile(email: &str) -> LeadProfile {
    LeadProfile {
        name: "Asha Rao".to_string(),
        email: email.to_string(),
        phone: Some("+91 98000 00000".to_string()),
        company: None,
    }
}

async fn seed_tool(pool: &PgPool, slug: &str) -> ResourceRef {
    let entry = ResourceRepo::create_tool(pool, "EMI Calculator Guide", slug, "guides/emi.pdf")
        .await
        .expect("tool creation should succeed");
    ResourceRef::Tool(entry.id)
}

#[sqlx::test]
async fn upsert_pending_creates_one_row(pool: PgPool) {
    let tool = seed_tool(&pool, "emi-guide").await;
    let expires = Utc::now() + Duration::minutes(10);

    let lead = DownloadLeadRepo::upsert_pending(&pool, &profile("a@x.com"), &tool, "123456", expires)
        .await
        .unwrap();

    assert_eq!(lead.email, "a@x.com");
    assert_eq!(lead.otp_code.as_deref(), Some("123456"));
    assert!(!lead.verified);
    assert!(lead.downloaded_at.is_none());
}

/// Re-requesting the same (email, resource) pair supersedes the prior
/// cycle instead of accumulating duplicate unverified rows.
#[sqlx::test]
async fn upsert_pending_supersedes_prior_cycle(pool: PgPool) {
    let tool = seed_tool(&pool, "emi-guide").await;
    let expires = Utc::now() + Duration::minutes(10);

    let first = DownloadLeadRepo::upsert_pending(&pool, &profile("a@x.com"), &tool, "111111", expires)
        .await
        .unwrap();
    let second =
        DownloadLeadRepo::upsert_pending(&pool, &profile("a@x.com"), &tool, "222222", expires)
            .await
            .unwrap();

    assert_eq!(first.id, second.id, "same pair must reuse the row");
    assert_eq!(second.otp_code.as_deref(), Some("222222"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM download_leads")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

/// Distinct resources for the same email get distinct rows.
#[sqlx::test]
async fn leads_are_scoped_per_resource(pool: PgPool) {
    let tool_a = seed_tool(&pool, "emi-guide").await;
    let tool_b = seed_tool(&pool, "gst-checklist").await;
    let expires = Utc::now() + Duration::minutes(10);

    let lead_a = DownloadLeadRepo::upsert_pending(&pool, &profile("a@x.com"), &tool_a, "111111", expires)
        .await
        .unwrap();
    let lead_b = DownloadLeadRepo::upsert_pending(&pool, &profile("a@x.com"), &tool_b, "222222", expires)
        .await
        .unwrap();

    assert_ne!(lead_a.id, lead_b.id);
}

/// Verifying resource A leaves the same email's resource B lead pending.
#[sqlx::test]
async fn mark_verified_does_not_leak_across_resources(pool: PgPool) {
    let tool_a = seed_tool(&pool, "emi-guide").await;
    let tool_b = seed_tool(&pool, "gst-checklist").await;
    let expires = Utc::now() + Duration::minutes(10);

    let lead_a = DownloadLeadRepo::upsert_pending(&pool, &profile("a@x.com"), &tool_a, "111111", expires)
        .await
        .unwrap();
    let lead_b = DownloadLeadRepo::upsert_pending(&pool, &profile("a@x.com"), &tool_b, "222222", expires)
        .await
        .unwrap();

    DownloadLeadRepo::mark_verified(&pool, lead_a.id).await.unwrap();

    let lead_b = DownloadLeadRepo::find_by_id(&pool, lead_b.id).await.unwrap().unwrap();
    assert!(!lead_b.verified);
    assert_eq!(lead_b.otp_code.as_deref(), Some("222222"));
}

#[sqlx::test]
async fn mark_verified_clears_code_and_stamps_release(pool: PgPool) {
    let tool = seed_tool(&pool, "emi-guide").await;
    let expires = Utc::now() + Duration::minutes(10);

    let lead = DownloadLeadRepo::upsert_pending(&pool, &profile("a@x.com"), &tool, "123456", expires)
        .await
        .unwrap();
    let verified = DownloadLeadRepo::mark_verified(&pool, lead.id).await.unwrap().unwrap();

    assert!(verified.verified);
    assert!(verified.otp_code.is_none());
    assert!(verified.otp_expires_at.is_none());
    assert!(verified.downloaded_at.is_some());
}

/// `downloaded_at` is written at most once; repeat stamps keep the first
/// timestamp.
#[sqlx::test]
async fn stamp_downloaded_is_idempotent(pool: PgPool) {
    let tool = seed_tool(&pool, "emi-guide").await;
    let expires = Utc::now() + Duration::minutes(10);

    let lead = DownloadLeadRepo::upsert_pending(&pool, &profile("a@x.com"), &tool, "123456", expires)
        .await
        .unwrap();
    let first = DownloadLeadRepo::mark_verified(&pool, lead.id).await.unwrap().unwrap();
    let again = DownloadLeadRepo::stamp_downloaded(&pool, lead.id).await.unwrap().unwrap();

    assert_eq!(first.downloaded_at, again.downloaded_at);
}

#[sqlx::test]
async fn latest_verified_by_email_finds_newest(pool: PgPool) {
    let tool_a = seed_tool(&pool, "emi-guide").await;
    let tool_b = seed_tool(&pool, "gst-checklist").await;
    let expires = Utc::now() + Duration::minutes(10);

    assert!(DownloadLeadRepo::latest_verified_by_email(&pool, "a@x.com")
        .await
        .unwrap()
        .is_none());

    let lead_a = DownloadLeadRepo::upsert_pending(&pool, &profile("a@x.com"), &tool_a, "111111", expires)
        .await
        .unwrap();
    DownloadLeadRepo::mark_verified(&pool, lead_a.id).await.unwrap();

    let lead_b = DownloadLeadRepo::upsert_verified(&pool, &profile("a@x.com"), &tool_b)
        .await
        .unwrap();

    let latest = DownloadLeadRepo::latest_verified_by_email(&pool, "a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, lead_b.id);
}

/// The shortcut upsert over an existing pending row flips it to verified
/// and clears the outstanding cycle.
#[sqlx::test]
async fn upsert_verified_clears_pending_cycle(pool: PgPool) {
    let tool = seed_tool(&pool, "emi-guide").await;
    let expires = Utc::now() + Duration::minutes(10);

    let pending = DownloadLeadRepo::upsert_pending(&pool, &profile("a@x.com"), &tool, "123456", expires)
        .await
        .unwrap();
    let verified = DownloadLeadRepo::upsert_verified(&pool, &profile("a@x.com"), &tool)
        .await
        .unwrap();

    assert_eq!(pending.id, verified.id);
    assert!(verified.verified);
    assert!(verified.otp_code.is_none());
    assert!(verified.downloaded_at.is_some());
}

/// A verified lead keeps its first release timestamp through a repeat
/// shortcut request.
#[sqlx::test]
async fn upsert_verified_preserves_first_release(pool: PgPool) {
    let tool = seed_tool(&pool, "emi-guide").await;

    let first = DownloadLeadRepo::upsert_verified(&pool, &profile("a@x.com"), &tool)
        .await
        .unwrap();
    let second = DownloadLeadRepo::upsert_verified(&pool, &profile("a@x.com"), &tool)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.downloaded_at, second.downloaded_at);
}

#[sqlx::test]
async fn regenerate_otp_replaces_code(pool: PgPool) {
    let tool = seed_tool(&pool, "emi-guide").await;
    let expires = Utc::now() + Duration::minutes(10);

    let lead = DownloadLeadRepo::upsert_pending(&pool, &profile("a@x.com"), &tool, "111111", expires)
        .await
        .unwrap();
    let later = Utc::now() + Duration::minutes(10);
    let updated = DownloadLeadRepo::regenerate_otp(&pool, lead.id, "222222", later)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.otp_code.as_deref(), Some("222222"));
}

/// Resend has nothing to do for a verified lead.
#[sqlx::test]
async fn regenerate_otp_skips_verified_leads(pool: PgPool) {
    let tool = seed_tool(&pool, "emi-guide").await;

    let lead = DownloadLeadRepo::upsert_verified(&pool, &profile("a@x.com"), &tool)
        .await
        .unwrap();
    let result = DownloadLeadRepo::regenerate_otp(
        &pool,
        lead.id,
        "222222",
        Utc::now() + Duration::minutes(10),
    )
    .await
    .unwrap();

    assert!(result.is_none());
}
