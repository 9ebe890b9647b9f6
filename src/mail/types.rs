//! Message, schedule and send payload types.

use base64::prelude::*;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// An email participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Email address.
    pub email: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Participant {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

/// Attachment metadata on a received message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentInfo {
    /// Attachment ID.
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
    /// MIME type.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// True when referenced from the message body.
    #[serde(default)]
    pub is_inline: Option<bool>,
}

/// A raw message header, returned with [`Fields::IncludeHeaders`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

/// A message as returned by the API.
///
/// Only `id` is guaranteed; `select` may trim every other field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message ID.
    pub id: String,
    /// Grant the message belongs to.
    #[serde(default)]
    pub grant_id: Option<String>,
    /// Thread the message belongs to.
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from: Vec<Participant>,
    #[serde(default)]
    pub to: Vec<Participant>,
    #[serde(default)]
    pub cc: Vec<Participant>,
    #[serde(default)]
    pub bcc: Vec<Participant>,
    #[serde(default)]
    pub reply_to: Vec<Participant>,
    /// Unix timestamp in seconds.
    #[serde(default)]
    pub date: Option<i64>,
    #[serde(default)]
    pub unread: Option<bool>,
    #[serde(default)]
    pub starred: Option<bool>,
    /// Short plain-text preview.
    #[serde(default)]
    pub snippet: Option<String>,
    /// HTML or plain-text body.
    #[serde(default)]
    pub body: Option<String>,
    /// Folder or label IDs.
    #[serde(default)]
    pub folders: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<AttachmentInfo>,
    #[serde(default)]
    pub headers: Vec<MessageHeader>,
    /// Base64url-encoded MIME, returned with [`Fields::RawMime`].
    #[serde(default)]
    pub raw_mime: Option<String>,
}

impl Message {
    /// Message date as a UTC timestamp.
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        self.date
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    }
}

/// Result of sending a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    #[serde(flatten)]
    pub message: Message,
    /// Set when the message was scheduled with `send_at`.
    #[serde(default)]
    pub schedule_id: Option<String>,
}

/// State of a scheduled send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStatus {
    /// Status code, e.g. `pending` or `success`.
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A message scheduled for later delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMessage {
    /// Schedule ID returned by a scheduled send.
    pub schedule_id: String,
    pub status: ScheduleStatus,
    /// Unix timestamp in seconds at which the schedule closes.
    #[serde(default)]
    pub close_time: Option<i64>,
}

/// Acknowledgement returned by cancel operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// Human-readable result.
    pub message: String,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// Pass as `page_token` to fetch the next page.
    pub next_cursor: Option<String>,
    /// Server-assigned request ID.
    pub request_id: Option<String>,
}

/// Optional field groups the API can include in message responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fields {
    Standard,
    IncludeHeaders,
    IncludeTrackingOptions,
    RawMime,
}

impl Fields {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fields::Standard => "standard",
            Fields::IncludeHeaders => "include_headers",
            Fields::IncludeTrackingOptions => "include_tracking_options",
            Fields::RawMime => "raw_mime",
        }
    }
}

/// Attribute changes applied by [`crate::mail::Mailbox::update_message`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageUpdate {
    /// New starred state; unchanged when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,
    /// New unread state; unchanged when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread: Option<bool>,
}

impl MessageUpdate {
    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = Some(starred);
        self
    }

    pub fn unread(mut self, unread: bool) -> Self {
        self.unread = Some(unread);
        self
    }
}

/// Open and click tracking for outgoing messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackingOptions {
    /// Track message opens.
    pub opens: bool,
    /// Track link clicks.
    pub links: bool,
    /// Track replies in the thread.
    pub thread_replies: bool,
    /// Label attached to tracking events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A file attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingAttachment {
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// Raw bytes, sent base64-encoded.
    #[serde(serialize_with = "serialize_base64")]
    pub content: Vec<u8>,
    /// Length of `content` in bytes.
    pub size: u64,
}

impl OutgoingAttachment {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        let size = content.len() as u64;
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            content,
            size,
        }
    }
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
}

/// A custom header on an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomHeader {
    /// Header name, e.g. `X-Campaign`.
    pub name: String,
    pub value: String,
}

/// Body of a send request. Unset optional fields are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMessageRequest {
    pub subject: String,
    /// HTML or plain-text body.
    pub body: String,
    /// Sender; normally the grant's own address.
    pub from: Vec<Participant>,
    /// Primary recipients.
    pub to: Vec<Participant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<Participant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<Participant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Vec<Participant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_options: Option<TrackingOptions>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub send_at: Option<DateTime<Utc>>,
    /// Message being replied to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<String>,
    /// Keep a draft until the scheduled send completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_draft: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<OutgoingAttachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<Vec<CustomHeader>>,
}

impl SendMessageRequest {
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        from: Vec<Participant>,
        to: Vec<Participant>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            from,
            to,
            cc: None,
            bcc: None,
            reply_to: None,
            tracking_options: None,
            send_at: None,
            reply_to_message_id: None,
            use_draft: None,
            attachments: None,
            custom_headers: None,
        }
    }

    pub fn cc(mut self, cc: Vec<Participant>) -> Self {
        self.cc = Some(cc);
        self
    }

    pub fn bcc(mut self, bcc: Vec<Participant>) -> Self {
        self.bcc = Some(bcc);
        self
    }

    pub fn reply_to(mut self, reply_to: Vec<Participant>) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    pub fn tracking(mut self, options: TrackingOptions) -> Self {
        self.tracking_options = Some(options);
        self
    }

    /// Schedules delivery instead of sending immediately.
    pub fn send_at(mut self, at: DateTime<Utc>) -> Self {
        self.send_at = Some(at);
        self
    }

    pub fn in_reply_to(mut self, message_id: impl Into<String>) -> Self {
        self.reply_to_message_id = Some(message_id.into());
        self
    }

    pub fn use_draft(mut self, use_draft: bool) -> Self {
        self.use_draft = Some(use_draft);
        self
    }

    pub fn attachment(mut self, attachment: OutgoingAttachment) -> Self {
        self.attachments.get_or_insert_with(Vec::new).push(attachment);
        self
    }

    pub fn custom_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers
            .get_or_insert_with(Vec::new)
            .push(CustomHeader {
                name: name.into(),
                value: value.into(),
            });
        self
    }
}
