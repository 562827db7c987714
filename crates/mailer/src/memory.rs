//! In-memory recording transport for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{MailError, Mailer, OutboundEmail};

/// Records outbound email instead of sending it.
///
/// `set_failing(true)` makes every subsequent send fail, which is how
/// tests exercise the delivery-error path without an SMTP server.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    failing: AtomicBool,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far, in order.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("mailer lock poisoned").clone()
    }

    /// Toggle simulated transport failure.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::Build("simulated transport failure".to_string()));
        }
        self.sent.lock().expect("mailer lock poisoned").push(email);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
