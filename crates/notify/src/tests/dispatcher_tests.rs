// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use servicebay_domain::PhoneNumber;

use super::{FailingEmailSender, RecordingEmailSender, RecordingSmsSender};
use crate::{DisabledSmsSender, Notifier, NotifyError, OutboundEmail, SmsReceipt};

fn email(to: &str) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: String::from("Subject"),
        body: String::from("Body"),
        attachments: Vec::new(),
    }
}

#[tokio::test]
async fn test_dispatch_email_delivers_in_background() {
    let recorder: Arc<RecordingEmailSender> = Arc::new(RecordingEmailSender::default());
    let notifier: Notifier = Notifier::new(recorder.clone(), Arc::new(DisabledSmsSender));

    notifier.dispatch_email(email("a@example.com")).await.unwrap();

    let sent = recorder.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@example.com");
}

#[tokio::test]
async fn test_dispatch_all_sends_each_email() {
    let recorder: Arc<RecordingEmailSender> = Arc::new(RecordingEmailSender::default());
    let notifier: Notifier = Notifier::new(recorder.clone(), Arc::new(DisabledSmsSender));

    for handle in notifier.dispatch_all(vec![email("a@example.com"), email("b@example.com")]) {
        handle.await.unwrap();
    }

    let mut recipients: Vec<String> = recorder
        .sent
        .lock()
        .unwrap()
        .iter()
        .map(|e| e.to.clone())
        .collect();
    recipients.sort();
    assert_eq!(recipients, vec!["a@example.com", "b@example.com"]);
}

#[tokio::test]
async fn test_email_failure_does_not_propagate() {
    let notifier: Notifier =
        Notifier::new(Arc::new(FailingEmailSender), Arc::new(DisabledSmsSender));

    let joined = notifier.dispatch_email(email("a@example.com")).await;
    assert!(joined.is_ok());
}

#[tokio::test]
async fn test_send_sms_returns_receipt() {
    let sms: Arc<RecordingSmsSender> = Arc::new(RecordingSmsSender::default());
    let notifier: Notifier = Notifier::new(Arc::new(RecordingEmailSender::default()), sms.clone());
    let to: PhoneNumber = PhoneNumber::parse("+15551234567").unwrap();

    let receipt: SmsReceipt = notifier.send_sms(&to, "hello").await.unwrap();

    assert_eq!(receipt.message_sid, "SM123");
    assert_eq!(receipt.status.as_deref(), Some("queued"));
    assert_eq!(
        sms.sent.lock().unwrap().as_slice(),
        &[(String::from("+15551234567"), String::from("hello"))]
    );
}

#[tokio::test]
async fn test_disabled_sms_is_an_error() {
    let notifier: Notifier = Notifier::disabled();
    let to: PhoneNumber = PhoneNumber::parse("+15551234567").unwrap();

    let result: Result<SmsReceipt, NotifyError> = notifier.send_sms(&to, "hello").await;

    assert_eq!(result, Err(NotifyError::Disabled { channel: "SMS" }));
}
