//! Message builders for the download gate's notification emails.

use crate::OutboundEmail;

/// Build the OTP delivery email for a pending download request.
///
/// The code reaches the user only through this message; API responses
/// never carry it.
pub fn otp_email(to: &str, code: &str, resource_title: &str, ttl_minutes: i64) -> OutboundEmail {
    let subject = format!("Your download code for {resource_title}");
    let html = format!(
        "<p>Hello,</p>\
         <p>Use this one-time code to download <strong>{resource_title}</strong>:</p>\
         <p style=\"font-size:24px;letter-spacing:4px\"><strong>{code}</strong></p>\
         <p>The code expires in {ttl_minutes} minutes. If you did not request \
         this download, you can ignore this email.</p>"
    );
    OutboundEmail {
        to: to.to_string(),
        subject,
        html,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
