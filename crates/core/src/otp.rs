//! OTP policy: code generation, expiry, and the verification decision.
//!
//! The lead state machine is `PENDING_OTP -> VERIFIED` (terminal) or
//! `PENDING_OTP -> EXPIRED`, where EXPIRED recovers only through
//! re-issuance of a fresh code. [`check_code`] is the pure decision
//! function; persistence of the resulting transition is the caller's job.

use rand::Rng;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Lowest issuable code. Codes are always six digits.
pub const OTP_MIN: u32 = 100_000;
/// Highest issuable code.
pub const OTP_MAX: u32 = 999_999;
/// Verification window in minutes.
pub const OTP_TTL_MINUTES: i64 = 10;

/// Generate a uniform six-digit verification code.
pub fn generate_code() -> String {
    rand::rng().random_range(OTP_MIN..=OTP_MAX).to_string()
}

/// Expiry deadline for a code issued at `now`.
pub fn expiry_from(now: Timestamp) -> Timestamp {
    now + chrono::Duration::minutes(OTP_TTL_MINUTES)
}

/// Decide whether a submitted code verifies against the outstanding cycle.
///
/// Expiry is checked before the code comparison, so a correct-but-stale
/// code still reports [`CoreError::OtpExpired`]. A lead with no
/// outstanding cycle (no code or no deadline) behaves as expired, since
/// the only recovery in either case is re-issuance. The submitted code is
/// whitespace-trimmed; no other normalization is applied.
pub fn check_code(
    stored_code: Option<&str>,
    expires_at: Option<Timestamp>,
    submitted: &str,
    now: Timestamp,
) -> Result<(), CoreError> {
    let (code, deadline) = match (stored_code, expires_at) {
        (Some(code), Some(deadline)) => (code, deadline),
        _ => return Err(CoreError::OtpExpired),
    };

    if now > deadline {
        return Err(CoreError::OtpExpired);
    }

    if submitted.trim() != code {
        return Err(CoreError::InvalidCode);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
