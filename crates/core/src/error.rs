use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The submitted code does not match the outstanding one. The lead is
    /// left untouched; the stored code stays valid until expiry.
    #[error("Verification code does not match")]
    InvalidCode,

    /// The verification window has closed (or no cycle is outstanding).
    /// Recovery requires issuing a new code.
    #[error("Verification code has expired")]
    OtpExpired,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
