// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Outbound notification boundary.
//!
//! Delivery itself is somebody else's job: mail goes to an HTTP relay that
//! accepts `{to, subject, text}` JSON. Recipient lookup is a separate seam so
//! the reminder scanner never needs to know where addresses live.

use serde::Serialize;
use std::future::Future;

/// Sends a single email.
pub trait Mailer: Send + Sync {
    fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), MailError>> + Send;
}

/// Resolves an owner to an email address.
pub trait RecipientResolver {
    fn resolve_recipient(&self, owner_id: &str) -> Option<String>;
}

#[derive(Serialize)]
struct RelayMessage<'a> {
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Mail relay client.
#[derive(Clone)]
pub struct HttpMailer {
    http: reqwest::Client,
    relay_url: String,
    token: Option<String>,
}

impl HttpMailer {
    pub fn new(relay_url: String, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            relay_url,
            token,
        }
    }
}

impl Mailer for HttpMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let message = RelayMessage {
            to: recipient,
            subject,
            text: body,
        };

        let mut request = self.http.post(&self.relay_url).json(&message);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(MailError::Rejected(status.as_u16(), body))
    }
}

/// Mail transport selected at startup.
#[derive(Clone)]
pub enum MailTransport {
    Http(HttpMailer),
    /// No relay configured; every send fails
    Disabled,
}

impl MailTransport {
    pub fn from_config(relay_url: Option<&str>, token: Option<&str>) -> Self {
        match relay_url {
            Some(url) if !url.is_empty() => MailTransport::Http(HttpMailer::new(
                url.to_string(),
                token.map(str::to_string),
            )),
            _ => MailTransport::Disabled,
        }
    }
}

impl Mailer for MailTransport {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailError> {
        match self {
            MailTransport::Http(mailer) => mailer.send(recipient, subject, body).await,
            MailTransport::Disabled => Err(MailError::NotConfigured),
        }
    }
}

/// Errors from mail delivery.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail relay not configured")]
    NotConfigured,

    #[error("Mail relay request failed: {0}")]
    Transport(String),

    #[error("Mail relay rejected message (HTTP {0}): {1}")]
    Rejected(u16, String),
}
