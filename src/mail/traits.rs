//! Mailbox capability trait.

use async_trait::async_trait;

use super::{
    Confirmation, Fields, Message, MessageQuery, MessageUpdate, Page, ScheduledMessage,
    SendMessageRequest, SentMessage,
};
use crate::auth::Grant;
use crate::error::Result;

/// Message operations available on a grant.
///
/// Every call issues exactly one authenticated HTTP request using the bound
/// grant's access token.
#[async_trait]
pub trait Mailbox: Send + Sync {
    /// The grant this mailbox acts for.
    fn grant(&self) -> &Grant;

    /// Path segment identifying the mailbox: `me` or a grant ID.
    fn scope(&self) -> &str;

    /// Lists messages matching `query`.
    async fn list_messages(&self, query: &MessageQuery) -> Result<Page<Message>>;

    /// Fetches a single message.
    async fn get_message(
        &self,
        message_id: &str,
        fields: Option<Fields>,
        select: Option<&str>,
    ) -> Result<Message>;

    /// Changes the starred and unread flags of a message.
    async fn update_message(
        &self,
        message_id: &str,
        update: &MessageUpdate,
        select: Option<&str>,
    ) -> Result<Message>;

    /// Sends a message, or schedules it when `send_at` is set.
    async fn send_message(&self, request: &SendMessageRequest) -> Result<SentMessage>;

    /// Lists scheduled sends.
    async fn scheduled_messages(&self) -> Result<Vec<ScheduledMessage>>;

    /// Fetches a scheduled send.
    async fn scheduled_message(&self, schedule_id: &str) -> Result<ScheduledMessage>;

    /// Cancels a scheduled send.
    async fn cancel_scheduled_message(&self, schedule_id: &str) -> Result<Confirmation>;
}
