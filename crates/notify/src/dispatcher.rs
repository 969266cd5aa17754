// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use servicebay_domain::PhoneNumber;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::email::{EmailSender, LogEmailSender, OutboundEmail};
use crate::error::NotifyError;
use crate::sms::{DisabledSmsSender, SmsReceipt, SmsSender};

/// Routes notifications to the configured channels.
///
/// Emails are fire-and-forget: they are sent on a background task and a
/// failure is only logged. SMS is awaited because the caller reports the
/// outcome.
#[derive(Clone)]
pub struct Notifier {
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
}

impl Notifier {
    #[must_use]
    pub fn new(email: Arc<dyn EmailSender>, sms: Arc<dyn SmsSender>) -> Self {
        Self { email, sms }
    }

    /// A notifier that logs emails and refuses SMS.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Arc::new(LogEmailSender), Arc::new(DisabledSmsSender))
    }

    /// Sends an email in the background.
    ///
    /// Must be called from within a Tokio runtime. The returned handle
    /// may be dropped.
    pub fn dispatch_email(&self, email: OutboundEmail) -> JoinHandle<()> {
        let sender: Arc<dyn EmailSender> = Arc::clone(&self.email);
        tokio::spawn(async move {
            match sender.send(&email).await {
                Ok(()) => info!(to = %email.to, subject = %email.subject, "Email sent"),
                Err(e) => warn!(
                    to = %email.to,
                    subject = %email.subject,
                    error = %e,
                    "Email delivery failed"
                ),
            }
        })
    }

    /// Sends each email in the background.
    pub fn dispatch_all(&self, emails: Vec<OutboundEmail>) -> Vec<JoinHandle<()>> {
        emails
            .into_iter()
            .map(|email| self.dispatch_email(email))
            .collect()
    }

    /// Sends an SMS and waits for the provider's answer.
    ///
    /// # Errors
    ///
    /// Returns the provider error, or `NotifyError::Disabled` when no SMS
    /// account is configured.
    pub async fn send_sms(&self, to: &PhoneNumber, body: &str) -> Result<SmsReceipt, NotifyError> {
        let result: Result<SmsReceipt, NotifyError> = self.sms.send(to, body).await;
        match &result {
            Ok(receipt) => info!(to = %to, sid = %receipt.message_sid, "SMS sent"),
            Err(e) => warn!(to = %to, error = %e, "SMS delivery failed"),
        }
        result
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}
