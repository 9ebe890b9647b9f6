//! Selection of the mailbox variant for a grant.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use super::{
    Confirmation, Fields, Mailbox, Message, MessageQuery, MessageUpdate, OfflineMailbox,
    OnlineMailbox, Page, ScheduledMessage, SendMessageRequest, SentMessage,
};
use crate::auth::{Grant, GrantType};
use crate::error::Result;
use crate::transport::HttpTransport;

/// A mailbox of either variant, fixed at construction.
#[derive(Clone)]
pub enum AnyMailbox {
    Online(OnlineMailbox),
    Offline(OfflineMailbox),
}

impl AnyMailbox {
    /// Grant type the variant was selected for.
    pub fn grant_type(&self) -> GrantType {
        match self {
            AnyMailbox::Online(_) => GrantType::Online,
            AnyMailbox::Offline(_) => GrantType::Offline,
        }
    }

    pub fn as_mailbox(&self) -> &dyn Mailbox {
        match self {
            AnyMailbox::Online(mailbox) => mailbox,
            AnyMailbox::Offline(mailbox) => mailbox,
        }
    }
}

#[async_trait]
impl Mailbox for AnyMailbox {
    fn grant(&self) -> &Grant {
        self.as_mailbox().grant()
    }

    fn scope(&self) -> &str {
        self.as_mailbox().scope()
    }

    async fn list_messages(&self, query: &MessageQuery) -> Result<Page<Message>> {
        self.as_mailbox().list_messages(query).await
    }

    async fn get_message(
        &self,
        message_id: &str,
        fields: Option<Fields>,
        select: Option<&str>,
    ) -> Result<Message> {
        self.as_mailbox().get_message(message_id, fields, select).await
    }

    async fn update_message(
        &self,
        message_id: &str,
        update: &MessageUpdate,
        select: Option<&str>,
    ) -> Result<Message> {
        self.as_mailbox()
            .update_message(message_id, update, select)
            .await
    }

    async fn send_message(&self, request: &SendMessageRequest) -> Result<SentMessage> {
        self.as_mailbox().send_message(request).await
    }

    async fn scheduled_messages(&self) -> Result<Vec<ScheduledMessage>> {
        self.as_mailbox().scheduled_messages().await
    }

    async fn scheduled_message(&self, schedule_id: &str) -> Result<ScheduledMessage> {
        self.as_mailbox().scheduled_message(schedule_id).await
    }

    async fn cancel_scheduled_message(&self, schedule_id: &str) -> Result<Confirmation> {
        self.as_mailbox().cancel_scheduled_message(schedule_id).await
    }
}

/// Builds mailboxes that share one transport and base URL.
#[derive(Clone)]
pub struct MailboxFactory {
    base_url: Url,
    transport: Arc<dyn HttpTransport>,
}

impl MailboxFactory {
    pub fn new(base_url: Url, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    /// Creates a new mailbox for `grant`: online grants get an
    /// [`OnlineMailbox`], offline grants an [`OfflineMailbox`].
    pub fn create(&self, grant: impl Into<Arc<Grant>>) -> AnyMailbox {
        let grant = grant.into();
        let transport = Arc::clone(&self.transport);
        let base_url = self.base_url.clone();

        tracing::debug!(
            grant_id = %grant.grant_id(),
            grant_type = %grant.grant_type(),
            "creating mailbox"
        );

        match grant.grant_type() {
            GrantType::Online => AnyMailbox::Online(OnlineMailbox::new(grant, transport, base_url)),
            GrantType::Offline => {
                AnyMailbox::Offline(OfflineMailbox::new(grant, transport, base_url))
            }
        }
    }
}
