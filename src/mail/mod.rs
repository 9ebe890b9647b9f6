//! Mailbox access for an authorized grant.
//!
//! This module contains the [`Mailbox`] trait and its two implementations:
//!
//! - [`OnlineMailbox`] - session-token access via `/v3/grants/me`
//! - [`OfflineMailbox`] - grant-bound access via `/v3/grants/{grant_id}`
//!
//! [`MailboxFactory`] picks the variant from the grant's [`GrantType`].
//!
//! # Endpoints
//!
//! | Operation                  | Request                                              |
//! |----------------------------|------------------------------------------------------|
//! | `list_messages`            | `GET    /v3/grants/{scope}/messages`                 |
//! | `get_message`              | `GET    /v3/grants/{scope}/messages/{id}`            |
//! | `update_message`           | `PUT    /v3/grants/{scope}/messages/{id}`            |
//! | `send_message`             | `POST   /v3/grants/{scope}/messages/send`            |
//! | `scheduled_messages`       | `GET    /v3/grants/{scope}/messages/schedules`       |
//! | `scheduled_message`        | `GET    /v3/grants/{scope}/messages/schedules/{id}`  |
//! | `cancel_scheduled_message` | `DELETE /v3/grants/{scope}/messages/schedules/{id}`  |
//!
//! # Example
//!
//! ```ignore
//! use nylas_mail::mail::{Mailbox, MessageQuery};
//!
//! let mailbox = client.mailbox(grant);
//! let page = mailbox.list_messages(&MessageQuery::with_limit(10).unread(true)).await?;
//! for message in page.data {
//!     println!("{}", message.subject.unwrap_or_default());
//! }
//! ```
//!
//! [`GrantType`]: crate::auth::GrantType

mod factory;
mod offline;
mod online;
mod query;
mod session;
mod traits;
mod types;

pub use factory::{AnyMailbox, MailboxFactory};
pub use offline::OfflineMailbox;
pub use online::{OnlineMailbox, ONLINE_SCOPE};
pub use query::{MessageQuery, DEFAULT_LIMIT};
pub use traits::Mailbox;
pub use types::{
    AttachmentInfo, Confirmation, CustomHeader, Fields, Message, MessageHeader, MessageUpdate,
    OutgoingAttachment, Page, Participant, ScheduleStatus, ScheduledMessage, SendMessageRequest,
    SentMessage, TrackingOptions,
};
