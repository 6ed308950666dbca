//! The message shape the ZeptoMail send API expects, and the mapping from a
//! [`SendRequest`] into it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::DefaultSettings;
use crate::schema::{Address, Attachment, InlineImage, Mailbox, Recipients, SendRequest};

const DEFAULT_ATTACHMENT_MIME: &str = "application/octet-stream";
const DEFAULT_INLINE_IMAGE_MIME: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub email_address: Mailbox,
}

/// How an attachment is referenced: by file name or by content-id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentRef {
    Name(String),
    Cid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderAttachment {
    pub content: String,
    pub mime_type: String,
    #[serde(flatten)]
    pub reference: AttachmentRef,
}

impl From<&Attachment> for ProviderAttachment {
    fn from(attachment: &Attachment) -> Self {
        Self {
            content: attachment.content.to_base64(),
            mime_type: attachment
                .content_type
                .clone()
                .unwrap_or_else(|| DEFAULT_ATTACHMENT_MIME.to_string()),
            reference: AttachmentRef::Name(attachment.filename.clone()),
        }
    }
}

impl From<&InlineImage> for ProviderAttachment {
    fn from(image: &InlineImage) -> Self {
        Self {
            content: image.content_base64(),
            mime_type: image
                .content_type
                .clone()
                .unwrap_or_else(|| DEFAULT_INLINE_IMAGE_MIME.to_string()),
            reference: AttachmentRef::Cid(image.filename.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMessage {
    pub to: Vec<Recipient>,
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textbody: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub htmlbody: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Recipients>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Recipients>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Recipients>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<ProviderAttachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_clicks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_opens: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_reference: Option<String>,
}

impl ProviderMessage {
    /// Maps a request onto the API shape, filling sender and reply-to from
    /// `settings` when the request leaves them out.
    ///
    /// Unrecognized options in `request.extra` are not carried over.
    pub fn build(request: &SendRequest, settings: &DefaultSettings) -> Self {
        let from = request
            .from
            .clone()
            .filter(|from| !from.is_empty())
            .unwrap_or_else(|| Address::Mailbox(settings.default_sender()));

        let reply_to = request
            .reply_to
            .clone()
            .filter(|reply_to| !reply_to.is_empty())
            .or_else(|| {
                settings
                    .default_reply_to()
                    .map(|mailbox| Recipients::Many(vec![Address::Mailbox(mailbox)]))
            });

        // Regular attachments first, then inline images.
        let attachments: Vec<ProviderAttachment> = request
            .attachments
            .iter()
            .flatten()
            .map(ProviderAttachment::from)
            .chain(
                request
                    .inline_images
                    .iter()
                    .flatten()
                    .map(ProviderAttachment::from),
            )
            .collect();
        let attachments = (request.attachments.is_some() || request.inline_images.is_some())
            .then_some(attachments);

        Self {
            to: vec![Recipient {
                email_address: request.to.mailbox(),
            }],
            from,
            subject: request.subject.clone(),
            textbody: request.text.clone(),
            htmlbody: request.html.clone(),
            cc: request.cc.clone(),
            bcc: request.bcc.clone(),
            reply_to,
            attachments,
            mime_headers: request.mime_headers.clone(),
            track_clicks: request.track_clicks,
            track_opens: request.track_opens,
            client_reference: request
                .client_reference
                .clone()
                .filter(|reference| !reference.is_empty()),
        }
    }
}
