//! Entry point the host platform calls: [`init`] once, then
//! [`EmailSender::send`] per message.

use std::sync::Arc;

use serde_json::Value;

use crate::config::{DefaultSettings, ProviderConfig};
use crate::error::Result;
use crate::message::ProviderMessage;
use crate::schema::SendRequest;
use crate::transport::{MailTransport, ZeptoMailClient};

/// Builds a sender backed by the ZeptoMail HTTP client.
///
/// No network call happens here and neither argument is validated; a
/// malformed config surfaces as the transport error of the first send.
pub fn init(config: ProviderConfig, settings: DefaultSettings) -> EmailSender<ZeptoMailClient> {
    EmailSender::with_transport(ZeptoMailClient::new(config.url, config.api_key), settings)
}

/// Sends host requests through a [`MailTransport`].
///
/// Cloning is cheap and clones share the transport; concurrent sends are
/// independent of one another.
pub struct EmailSender<T> {
    transport: Arc<T>,
    settings: Arc<DefaultSettings>,
}

impl<T> Clone for EmailSender<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<T: MailTransport> EmailSender<T> {
    pub fn with_transport(transport: T, settings: DefaultSettings) -> Self {
        Self {
            transport: Arc::new(transport),
            settings: Arc::new(settings),
        }
    }

    /// Maps `request` and hands it to the transport.
    ///
    /// The transport's response is returned untouched. On failure the error
    /// is logged and returned as-is; nothing is retried.
    pub async fn send(&self, request: SendRequest) -> Result<Value> {
        if !request.extra.is_empty() {
            let ignored: Vec<&str> = request.extra.keys().map(String::as_str).collect();
            tracing::debug!("Ignoring unrecognized send options: {}", ignored.join(", "));
        }

        let copied: usize = [&request.cc, &request.bcc]
            .into_iter()
            .flatten()
            .map(|recipients| recipients.mailboxes().len())
            .sum();
        tracing::debug!(
            "Sending to {} with {copied} cc/bcc recipients",
            request.to.mailbox().address
        );

        let message = ProviderMessage::build(&request, &self.settings);
        tracing::trace!("Sending {message:?}");

        self.transport.send_mail(&message).await.map_err(|err| {
            let details =
                serde_json::to_string_pretty(&err.details()).unwrap_or_else(|_| err.to_string());
            tracing::error!("SEND ERROR {details}");
            err
        })
    }
}
