//! Outbound email for the download gate.
//!
//! The workflow never depends on a concrete transport: handlers hold an
//! `Arc<dyn Mailer>` resolved once at startup, so tests substitute
//! [`MemoryMailer`] and production uses the lettre-backed [`SmtpMailer`].
//! A transport failure is always distinguishable from a persistence
//! failure: it surfaces as [`MailError`], never as a database error.

pub mod memory;
pub mod messages;
pub mod smtp;

pub use memory::MemoryMailer;
pub use smtp::{SmtpConfig, SmtpMailer};

use async_trait::async_trait;

/// An email ready for transport.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// Sends [`OutboundEmail`]s somewhere.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;
}
