//! Outbound email dispatch. One message per accepted submission, sent
//! through Resend's HTTP API with a single attempt and no retry; a failed
//! send is surfaced to the caller, who may resubmit.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Message handed to the mail provider. Subject and body arrive here with
/// their interpolated fields already escaped; `reply_to` is the raw trimmed
/// address the recipient answers to.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Mail provider rejected the message ({status})")]
    Provider { status: u16, details: Value },

    #[error("Mail provider unreachable")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, envelope: Envelope) -> Result<(), DispatchError>;
}

/// Adapter for <https://resend.com/docs/api-reference/emails/send-email>.
pub struct ResendMailer {
    client: Client,
    api_key: String,
}

impl ResendMailer {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[derive(Serialize)]
struct ResendMessage<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, envelope: Envelope) -> Result<(), DispatchError> {
        let message = ResendMessage {
            from: &envelope.from,
            to: [&envelope.to],
            reply_to: &envelope.reply_to,
            subject: &envelope.subject,
            html: &envelope.html_body,
        };

        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&message)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status().as_u16();
        let details = response.json().await.unwrap_or(Value::Null);

        warn!("Resend rejected the message with status {status}");

        Err(DispatchError::Provider { status, details })
    }
}
