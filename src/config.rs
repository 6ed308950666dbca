use serde::Deserialize;

use crate::error::ConfigError;
use crate::schema::Mailbox;

/// Connection settings for the ZeptoMail API.
///
/// Nothing here is validated up front; a bad url or key only shows up when
/// the first message is sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// API root, e.g. `api.zeptomail.com/`.
    pub url: String,
    #[serde(rename = "apiKey", alias = "api_key")]
    pub api_key: String,
}

impl ProviderConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Reads `ZEPTOMAIL_URL` and `ZEPTOMAIL_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: std::env::var("ZEPTOMAIL_URL").map_err(|_| ConfigError::Missing("ZEPTOMAIL_URL"))?,
            api_key: std::env::var("ZEPTOMAIL_API_KEY")
                .map_err(|_| ConfigError::Missing("ZEPTOMAIL_API_KEY"))?,
        })
    }
}

/// Sender defaults applied when a request does not name its own.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DefaultSettings {
    #[serde(rename = "defaultFrom", alias = "default_from")]
    pub default_from: String,
    #[serde(default, alias = "senderName")]
    pub sender_name: Option<String>,
    #[serde(default, rename = "replyTo", alias = "reply_to")]
    pub reply_to: Option<String>,
}

impl DefaultSettings {
    pub fn new(default_from: impl Into<String>) -> Self {
        Self {
            default_from: default_from.into(),
            sender_name: None,
            reply_to: None,
        }
    }

    /// Reads `MAIL_DEFAULT_FROM`, plus the optional `MAIL_SENDER_NAME` and
    /// `MAIL_REPLY_TO`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            default_from: std::env::var("MAIL_DEFAULT_FROM")
                .map_err(|_| ConfigError::Missing("MAIL_DEFAULT_FROM"))?,
            sender_name: std::env::var("MAIL_SENDER_NAME").ok(),
            reply_to: std::env::var("MAIL_REPLY_TO").ok(),
        })
    }

    pub fn default_sender(&self) -> Mailbox {
        Mailbox {
            address: self.default_from.clone(),
            name: self.sender_name.clone(),
        }
    }

    /// The settings-level reply-to, signed with the sender name.
    pub fn default_reply_to(&self) -> Option<Mailbox> {
        self.reply_to.as_ref().map(|address| Mailbox {
            address: address.clone(),
            name: self.sender_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_host_json_keys() {
        let config: ProviderConfig =
            serde_json::from_value(json!({"url": "api.zeptomail.com/", "apiKey": "k"})).unwrap();
        assert_eq!(config, ProviderConfig::new("api.zeptomail.com/", "k"));

        let settings: DefaultSettings = serde_json::from_value(json!({
            "defaultFrom": "a@x.com",
            "sender_name": "Acme",
            "replyTo": "support@x.com"
        }))
        .unwrap();
        assert_eq!(settings.default_from, "a@x.com");
        assert_eq!(settings.sender_name.as_deref(), Some("Acme"));
        assert_eq!(settings.reply_to.as_deref(), Some("support@x.com"));
    }

    #[test]
    fn test_optional_settings() {
        let settings: DefaultSettings =
            serde_json::from_value(json!({"defaultFrom": "a@x.com"})).unwrap();
        assert_eq!(settings, DefaultSettings::new("a@x.com"));
        assert_eq!(settings.default_sender(), Mailbox::new("a@x.com"));
        assert!(settings.default_reply_to().is_none());
    }

    #[test]
    fn test_default_reply_to_uses_sender_name() {
        let settings = DefaultSettings {
            sender_name: Some("Acme".into()),
            reply_to: Some("support@x.com".into()),
            ..DefaultSettings::new("a@x.com")
        };
        assert_eq!(
            settings.default_reply_to(),
            Some(Mailbox::named("support@x.com", "Acme"))
        );
    }
}
