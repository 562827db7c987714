//! Lead-intake validation and normalization.
//!
//! The email address is the natural correlation key across download
//! requests, so it is normalized (trimmed, lowercased) before any lookup
//! or write. The returning-user shortcut in the handlers relies on exact
//! matches over the normalized form.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Normalize an email for storage and lookup: trim and lowercase.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Syntactic email check, rejected before any persistence.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

/// Contact name must be non-empty after trimming.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        Err(CoreError::Validation("Name must not be empty".to_string()))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  A.User@Example.COM "), "a.user@example.com");
    }

    #[test]
    fn valid_email_accepted() {
        assert!(validate_email("a.user@example.com").is_ok());
    }

    #[test]
    fn malformed_emails_rejected() {
        for bad in ["", "not-an-email", "a@", "@x.com", "a b@x.com"] {
            assert!(validate_email(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn empty_name_rejected() {
        assert!(validate_name("   ").is_err());
        assert!(validate_name("Asha").is_ok());
    }
}
