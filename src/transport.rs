//! Delivery of a [`ProviderMessage`] to the mail API.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde_json::Value;

use crate::error::{Result, TransportError};
use crate::message::ProviderMessage;

const SEND_PATH: &str = "v1.1/email";

/// The one capability the provider needs from a mail API client.
///
/// Responses and errors are opaque to the provider: whatever the
/// implementation returns is handed straight back to the caller.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send_mail(&self, message: &ProviderMessage) -> Result<Value>;
}

/// HTTP client for the ZeptoMail send API.
#[derive(Debug, Clone)]
pub struct ZeptoMailClient {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl ZeptoMailClient {
    /// Creates a client; no request is made and the url is not checked yet.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            token: token.into(),
        }
    }

    /// Resolves the configured API root to the send endpoint.
    ///
    /// `api.zeptomail.com/` becomes `https://api.zeptomail.com/v1.1/email`.
    /// A url that already points at `.../email` is used as-is.
    pub fn endpoint(&self) -> Result<Url> {
        let raw = self.url.trim();
        let raw = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("https://{raw}")
        };

        let invalid = || TransportError::InvalidEndpoint(self.url.clone());
        let mut base = Url::parse(&raw).map_err(|_| invalid())?;
        if base.cannot_be_a_base() || base.host_str().is_none() {
            return Err(invalid());
        }

        if base.path().trim_end_matches('/').ends_with("/email") {
            return Ok(base);
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(SEND_PATH).map_err(|_| invalid())
    }
}

#[async_trait]
impl MailTransport for ZeptoMailClient {
    async fn send_mail(&self, message: &ProviderMessage) -> Result<Value> {
        let endpoint = self.endpoint()?;
        tracing::trace!("Posting message to {endpoint}");

        let response = self
            .client
            .post(endpoint)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.token)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        let body = parse_body(&response.text().await?);

        if !status.is_success() {
            return Err(TransportError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("ZeptoMail responded {status}: {body}");
        Ok(body)
    }
}

/// Empty bodies become `null`; anything that is not JSON is kept as a string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
