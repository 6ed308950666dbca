use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Mailbox {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
        }
    }

    pub fn named(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: Some(name.into()),
        }
    }
}

/// Either a bare address string or a full mailbox record.
///
/// Serializes back in the shape it was given, so a caller's `"a@x.com"`
/// stays a string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Address {
    Plain(String),
    Mailbox(Mailbox),
}

impl Address {
    /// A blank bare string counts as no address at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Address::Plain(address) if address.is_empty())
    }

    /// Normalizes to a mailbox; a bare string has no name.
    pub fn mailbox(&self) -> Mailbox {
        match self {
            Address::Plain(address) => Mailbox::new(address.clone()),
            Address::Mailbox(mailbox) => mailbox.clone(),
        }
    }
}

impl Default for Address {
    fn default() -> Self {
        Address::Plain(String::new())
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Address::Plain(address.to_string())
    }
}

impl From<String> for Address {
    fn from(address: String) -> Self {
        Address::Plain(address)
    }
}

impl From<Mailbox> for Address {
    fn from(mailbox: Mailbox) -> Self {
        Address::Mailbox(mailbox)
    }
}

/// A recipient field that accepts one address or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(Address),
    Many(Vec<Address>),
}

impl Recipients {
    /// Only a single blank address is empty; an empty list is still a value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Recipients::One(address) if address.is_empty())
    }

    pub fn mailboxes(&self) -> Vec<Mailbox> {
        match self {
            Recipients::One(address) => vec![address.mailbox()],
            Recipients::Many(addresses) => addresses.iter().map(Address::mailbox).collect(),
        }
    }
}

impl From<&str> for Recipients {
    fn from(address: &str) -> Self {
        Recipients::One(address.into())
    }
}

impl From<Address> for Recipients {
    fn from(address: Address) -> Self {
        Recipients::One(address)
    }
}

impl From<Vec<Address>> for Recipients {
    fn from(addresses: Vec<Address>) -> Self {
        Recipients::Many(addresses)
    }
}

/// Attachment payload as handed over by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttachmentContent {
    /// Already encoded by the caller; forwarded untouched.
    Encoded(String),
    Binary(Vec<u8>),
}

impl AttachmentContent {
    pub fn to_base64(&self) -> String {
        match self {
            AttachmentContent::Encoded(content) => content.clone(),
            AttachmentContent::Binary(bytes) => STANDARD.encode(bytes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content: AttachmentContent,
    pub filename: String,
    #[serde(default, alias = "content_type")]
    pub content_type: Option<String>,
}

/// An image referenced from the HTML body by content-id.
///
/// The filename doubles as the content-id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub content: Vec<u8>,
    pub filename: String,
    #[serde(default, alias = "content_type")]
    pub content_type: Option<String>,
}

impl InlineImage {
    pub fn content_base64(&self) -> String {
        STANDARD.encode(&self.content)
    }
}

/// The generic "send email" request the host hands to the provider.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    #[serde(default)]
    pub from: Option<Address>,
    pub to: Address,
    #[serde(default)]
    pub cc: Option<Recipients>,
    #[serde(default)]
    pub bcc: Option<Recipients>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default, alias = "reply_to")]
    pub reply_to: Option<Recipients>,
    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(default, alias = "inline_images")]
    pub inline_images: Option<Vec<InlineImage>>,
    #[serde(default, alias = "mime_headers")]
    pub mime_headers: Option<BTreeMap<String, String>>,
    #[serde(default, alias = "track_clicks")]
    pub track_clicks: Option<bool>,
    #[serde(default, alias = "track_opens")]
    pub track_opens: Option<bool>,
    #[serde(default, alias = "client_reference")]
    pub client_reference: Option<String>,
    /// Options this provider does not recognize. Never forwarded.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_address_shapes() {
        let plain: Address = serde_json::from_value(json!("a@x.com")).unwrap();
        assert_eq!(plain, Address::Plain("a@x.com".into()));
        assert_eq!(plain.mailbox(), Mailbox::new("a@x.com"));

        let named: Address =
            serde_json::from_value(json!({"address": "a@x.com", "name": "A"})).unwrap();
        assert_eq!(named.mailbox(), Mailbox::named("a@x.com", "A"));
        assert_eq!(
            serde_json::to_value(&named).unwrap(),
            json!({"address": "a@x.com", "name": "A"})
        );
    }

    #[test]
    fn test_recipients_keep_their_shape() {
        let one: Recipients = serde_json::from_value(json!("c@x.com")).unwrap();
        assert_eq!(serde_json::to_value(&one).unwrap(), json!("c@x.com"));

        let many: Recipients =
            serde_json::from_value(json!(["c@x.com", {"address": "d@x.com"}])).unwrap();
        assert_eq!(
            many.mailboxes(),
            vec![Mailbox::new("c@x.com"), Mailbox::new("d@x.com")]
        );
        assert_eq!(
            serde_json::to_value(&many).unwrap(),
            json!(["c@x.com", {"address": "d@x.com"}])
        );
    }

    #[test]
    fn test_blank_addresses() {
        assert!(Address::from("").is_empty());
        assert!(!Address::from("a@x.com").is_empty());
        assert!(!Address::from(Mailbox::new("")).is_empty());
        assert!(Recipients::from("").is_empty());
        assert!(!Recipients::Many(vec![]).is_empty());
    }

    #[test]
    fn test_missing_subject_stays_absent() {
        let request: SendRequest = serde_json::from_value(json!({"to": "b@y.com"})).unwrap();
        assert_eq!(request.subject, None);
    }

    #[test]
    fn test_attachment_content_encoding() {
        let binary = AttachmentContent::Binary(b"hello".to_vec());
        assert_eq!(binary.to_base64(), "aGVsbG8=");

        let encoded = AttachmentContent::Encoded("not really base64!".into());
        assert_eq!(encoded.to_base64(), "not really base64!");
    }

    #[test]
    fn test_send_request_field_names() {
        let request: SendRequest = serde_json::from_value(json!({
            "to": "b@y.com",
            "subject": "Hi",
            "replyTo": "r@y.com",
            "track_clicks": false,
            "trackOpens": true,
            "client_reference": "ref-1",
            "mimeHeaders": {"X-Test": "1"},
            "priority": "high"
        }))
        .unwrap();

        assert_eq!(request.to, Address::Plain("b@y.com".into()));
        assert_eq!(request.reply_to, Some(Recipients::from("r@y.com")));
        assert_eq!(request.track_clicks, Some(false));
        assert_eq!(request.track_opens, Some(true));
        assert_eq!(request.client_reference.as_deref(), Some("ref-1"));
        assert_eq!(
            request.mime_headers.unwrap().get("X-Test").map(String::as_str),
            Some("1")
        );
        assert_eq!(request.extra.get("priority"), Some(&json!("high")));
        assert!(!request.extra.contains_key("track_clicks"));
    }

    #[test]
    fn test_attachment_from_json() {
        let attachment: Attachment = serde_json::from_value(json!({
            "content": [104, 105],
            "filename": "hi.bin",
            "contentType": "application/x-test"
        }))
        .unwrap();
        assert_eq!(attachment.content, AttachmentContent::Binary(vec![104, 105]));
        assert_eq!(attachment.content_type.as_deref(), Some("application/x-test"));
    }
}
