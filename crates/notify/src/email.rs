// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbound email.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment as MailAttachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use crate::error::NotifyError;

/// A file attached to an outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl Attachment {
    /// A PDF attachment.
    #[must_use]
    pub fn pdf(filename: String, content: Vec<u8>) -> Self {
        Self {
            filename,
            content_type: String::from("application/pdf"),
            content,
        }
    }
}

/// A plain-text email with optional attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<Attachment>,
}

/// Delivers emails.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends one email.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be built or delivered.
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError>;
}

/// SMTP account settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Display name on the `From` header.
    pub from_name: String,
}

/// Sends email through an SMTP relay using STARTTLS.
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// Creates a sender for the given account. No connection is made until
    /// the first send.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay host or the sender address is invalid.
    pub fn new(settings: &SmtpSettings) -> Result<Self, NotifyError> {
        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .map_err(|e| NotifyError::Transport(format!("SMTP relay error: {e}")))?
                .port(settings.port)
                .credentials(Credentials::new(
                    settings.username.clone(),
                    settings.password.clone(),
                ))
                .build();

        let from: Mailbox = parse_mailbox(&format!(
            "{} <{}>",
            settings.from_name, settings.username
        ))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        let message: Message = build_message(&self.from, email)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        debug!(to = %email.to, "SMTP accepted message");
        Ok(())
    }
}

/// Writes emails to the log instead of sending them.
///
/// Used when no SMTP account is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            attachments = email.attachments.len(),
            "Email not sent (SMTP not configured)"
        );
        Ok(())
    }
}

/// Parses an RFC 5322 mailbox such as `Name <user@example.com>`.
///
/// # Errors
///
/// Returns `NotifyError::InvalidAddress` if the text is not a mailbox.
pub fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| NotifyError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Assembles a MIME message.
///
/// Emails without attachments are sent as a single `text/plain` part.
///
/// # Errors
///
/// Returns an error if the recipient or an attachment content type is invalid.
pub fn build_message(from: &Mailbox, email: &OutboundEmail) -> Result<Message, NotifyError> {
    let builder = Message::builder()
        .from(from.clone())
        .to(parse_mailbox(&email.to)?)
        .subject(email.subject.clone());

    let message: Result<Message, lettre::error::Error> = if email.attachments.is_empty() {
        builder
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
    } else {
        let mut parts: MultiPart = MultiPart::mixed().singlepart(SinglePart::plain(email.body.clone()));
        for attachment in &email.attachments {
            let content_type: ContentType = ContentType::parse(&attachment.content_type)
                .map_err(|e| NotifyError::MessageBuild(format!("{}: {e}", attachment.filename)))?;
            parts = parts.singlepart(
                MailAttachment::new(attachment.filename.clone())
                    .body(attachment.content.clone(), content_type),
            );
        }
        builder.multipart(parts)
    };

    message.map_err(|e| NotifyError::MessageBuild(e.to_string()))
}
