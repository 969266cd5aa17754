// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! Outbound notifications for the service center.
//!
//! Provides email over SMTP, SMS over Twilio, PDF rendering for booking
//! confirmations and business reports, and the message templates that tie
//! them to domain records.

mod dispatcher;
mod document;
mod email;
mod error;
mod messages;
mod sms;

#[cfg(test)]
mod tests;

pub use dispatcher::Notifier;
pub use document::PdfDocument;
pub use email::{
    Attachment, EmailSender, LogEmailSender, OutboundEmail, SmtpEmailSender, SmtpSettings,
    build_message, parse_mailbox,
};
pub use error::NotifyError;
pub use messages::{
    Recipient, SmsOrder, booking_confirmation_email, booking_confirmation_pdf,
    business_report_pdf, complaint_received_email, complaint_update_email, inventory_order_sms,
    supplier_order_email,
};
pub use sms::{DisabledSmsSender, SmsReceipt, SmsSender, TwilioSettings, TwilioSmsSender};
