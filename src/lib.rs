//! ZeptoMail email provider.
//!
//! Turns the host platform's generic send request into the message shape of
//! the ZeptoMail transactional email API and hands it to a [`MailTransport`].
//!
//! ```ignore
//! let sender = zeptomail_provider::init(
//!     ProviderConfig::new("api.zeptomail.com/", "Zoho-enczapikey ..."),
//!     DefaultSettings::new("noreply@example.com"),
//! );
//! let response = sender.send(request).await?;
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod provider;
pub mod schema;
pub mod transport;

pub use config::{DefaultSettings, ProviderConfig};
pub use error::{ConfigError, Result, TransportError};
pub use message::ProviderMessage;
pub use provider::{init, EmailSender};
pub use schema::{
    Address, Attachment, AttachmentContent, InlineImage, Mailbox, Recipients, SendRequest,
};
pub use transport::{MailTransport, ZeptoMailClient};
