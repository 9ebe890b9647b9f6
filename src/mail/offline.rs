//! Mailbox bound to a specific grant ID.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use super::session::MailboxSession;
use super::{
    Confirmation, Fields, Mailbox, Message, MessageQuery, MessageUpdate, Page, ScheduledMessage,
    SendMessageRequest, SentMessage,
};
use crate::auth::Grant;
use crate::error::Result;
use crate::transport::HttpTransport;

/// Mailbox for grants from the refresh-token flow.
///
/// Requests are addressed to `/v3/grants/{grant_id}/...`, acting on behalf of
/// the authorized mailbox.
#[derive(Clone)]
pub struct OfflineMailbox {
    session: MailboxSession,
}

impl OfflineMailbox {
    pub fn new(grant: Arc<Grant>, transport: Arc<dyn HttpTransport>, base_url: Url) -> Self {
        let scope = grant.grant_id().to_string();
        Self {
            session: MailboxSession::new(grant, transport, base_url, scope),
        }
    }
}

#[async_trait]
impl Mailbox for OfflineMailbox {
    fn grant(&self) -> &Grant {
        self.session.grant()
    }

    fn scope(&self) -> &str {
        self.session.scope()
    }

    async fn list_messages(&self, query: &MessageQuery) -> Result<Page<Message>> {
        self.session.list_messages(query).await
    }

    async fn get_message(
        &self,
        message_id: &str,
        fields: Option<Fields>,
        select: Option<&str>,
    ) -> Result<Message> {
        self.session.get_message(message_id, fields, select).await
    }

    async fn update_message(
        &self,
        message_id: &str,
        update: &MessageUpdate,
        select: Option<&str>,
    ) -> Result<Message> {
        self.session.update_message(message_id, update, select).await
    }

    async fn send_message(&self, request: &SendMessageRequest) -> Result<SentMessage> {
        self.session.send_message(request).await
    }

    async fn scheduled_messages(&self) -> Result<Vec<ScheduledMessage>> {
        self.session.scheduled_messages().await
    }

    async fn scheduled_message(&self, schedule_id: &str) -> Result<ScheduledMessage> {
        self.session.scheduled_message(schedule_id).await
    }

    async fn cancel_scheduled_message(&self, schedule_id: &str) -> Result<Confirmation> {
        self.session.cancel_scheduled_message(schedule_id).await
    }
}
