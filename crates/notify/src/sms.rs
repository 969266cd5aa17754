// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbound SMS through the Twilio REST API.

use async_trait::async_trait;
use serde::Deserialize;
use servicebay_domain::PhoneNumber;
use tracing::debug;

use crate::error::NotifyError;

const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// The provider's acknowledgement of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsReceipt {
    pub message_sid: String,
    pub status: Option<String>,
}

/// Delivers text messages.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Sends one message to an E.164 number.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the message or cannot be reached.
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<SmsReceipt, NotifyError>;
}

/// Twilio account settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioSettings {
    pub account_sid: String,
    pub auth_token: String,
    /// The sending number in E.164 form.
    pub from_number: String,
}

#[derive(Deserialize)]
struct TwilioMessage {
    sid: String,
    status: Option<String>,
}

#[derive(Deserialize)]
struct TwilioError {
    message: String,
}

/// Sends SMS via Twilio's Messages resource.
pub struct TwilioSmsSender {
    client: reqwest::Client,
    settings: TwilioSettings,
    api_base: String,
}

impl TwilioSmsSender {
    #[must_use]
    pub fn new(settings: TwilioSettings) -> Self {
        Self::with_api_base(settings, TWILIO_API_BASE)
    }

    /// Creates a sender that talks to `api_base` instead of Twilio.
    #[must_use]
    pub fn with_api_base(settings: TwilioSettings, api_base: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.settings.account_sid
        )
    }
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<SmsReceipt, NotifyError> {
        let response: reqwest::Response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.settings.account_sid, Some(&self.settings.auth_token))
            .form(&[
                ("To", to.value()),
                ("From", self.settings.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status: reqwest::StatusCode = response.status();
        if !status.is_success() {
            let detail: String = response
                .json::<TwilioError>()
                .await
                .map_or_else(|_| String::from("no error detail"), |e| e.message);
            return Err(NotifyError::Transport(format!(
                "Twilio returned {status}: {detail}"
            )));
        }

        let message: TwilioMessage = response
            .json()
            .await
            .map_err(|e| NotifyError::Transport(format!("Unreadable Twilio response: {e}")))?;

        debug!(to = %to, sid = %message.sid, "Twilio accepted message");
        Ok(SmsReceipt {
            message_sid: message.sid,
            status: message.status,
        })
    }
}

/// Stand-in used when no SMS account is configured; every send fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSmsSender;

#[async_trait]
impl SmsSender for DisabledSmsSender {
    async fn send(&self, _to: &PhoneNumber, _body: &str) -> Result<SmsReceipt, NotifyError> {
        Err(NotifyError::Disabled { channel: "SMS" })
    }
}
