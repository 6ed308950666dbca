use serde_json::{json, Value};
use thiserror::Error;

/// Failure raised by a [`MailTransport`](crate::transport::MailTransport).
///
/// The provider never wraps or reclassifies these; `send` hands back the
/// exact value the transport returned.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint url: {0}")]
    InvalidEndpoint(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("api error {status}: {body}")]
    Api { status: u16, body: Value },
}

impl TransportError {
    /// JSON rendering used for the diagnostic log on failed sends.
    pub fn details(&self) -> Value {
        match self {
            TransportError::InvalidEndpoint(url) => json!({
                "kind": "invalid_endpoint",
                "message": self.to_string(),
                "url": url,
            }),
            TransportError::Http(err) => json!({
                "kind": "http",
                "message": self.to_string(),
                "status": err.status().map(|s| s.as_u16()),
                "timeout": err.is_timeout(),
            }),
            TransportError::Api { status, body } => json!({
                "kind": "api",
                "message": self.to_string(),
                "status": status,
                "body": body,
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
}

pub type Result<T> = std::result::Result<T, TransportError>;
