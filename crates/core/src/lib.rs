//! Domain logic for the ledgergate download gate.
//!
//! Everything in this crate is pure: shared type aliases, the error
//! taxonomy, the `ResourceRef` tagged union, OTP policy (generation,
//! expiry, verification decision) and lead-intake validation. Persistence
//! and transport live in `ledgergate-db` and `ledgergate-mailer`.

pub mod error;
pub mod leads;
pub mod otp;
pub mod resource;
pub mod types;
