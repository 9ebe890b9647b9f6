//! Request plumbing shared by both mailbox variants.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::{
    Confirmation, Fields, Message, MessageQuery, MessageUpdate, Page, ScheduledMessage,
    SendMessageRequest, SentMessage,
};
use crate::auth::Grant;
use crate::error::{Error, Result};
use crate::transport::{endpoint, HttpRequest, HttpTransport};

/// Standard response wrapper used by mailbox endpoints.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    request_id: Option<String>,
    data: T,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// Grant, transport and URL scope for one mailbox.
#[derive(Clone)]
pub(crate) struct MailboxSession {
    grant: Arc<Grant>,
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    scope: String,
}

impl MailboxSession {
    pub(crate) fn new(
        grant: Arc<Grant>,
        transport: Arc<dyn HttpTransport>,
        base_url: Url,
        scope: String,
    ) -> Self {
        Self {
            grant,
            transport,
            base_url,
            scope,
        }
    }

    pub(crate) fn grant(&self) -> &Grant {
        &self.grant
    }

    pub(crate) fn scope(&self) -> &str {
        &self.scope
    }

    /// `{base}/v3/grants/{scope}/messages/{rest...}`
    fn messages_url(&self, rest: &[&str]) -> Result<Url> {
        let mut segments = vec!["v3", "grants", self.scope.as_str(), "messages"];
        segments.extend_from_slice(rest);
        endpoint(&self.base_url, &segments)
    }

    async fn call<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<Envelope<T>> {
        tracing::debug!(
            method = ?request.method,
            path = request.url.path(),
            grant_id = %self.grant.grant_id(),
            "mailbox request"
        );

        let response = self
            .transport
            .execute(request.bearer(self.grant.access_token()))
            .await?;

        if !response.is_success() {
            tracing::debug!(status = response.status, "mailbox request failed");
            return Err(response.into_api_error());
        }
        response.json()
    }

    pub(crate) async fn list_messages(&self, query: &MessageQuery) -> Result<Page<Message>> {
        let mut url = self.messages_url(&[])?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());

        let envelope: Envelope<Vec<Message>> = self.call(HttpRequest::get(url)).await?;
        Ok(Page {
            data: envelope.data,
            next_cursor: envelope.next_cursor,
            request_id: envelope.request_id,
        })
    }

    pub(crate) async fn get_message(
        &self,
        message_id: &str,
        fields: Option<Fields>,
        select: Option<&str>,
    ) -> Result<Message> {
        let mut url = self.messages_url(&[message_id])?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(fields) = fields {
                pairs.append_pair("fields", fields.as_str());
            }
            if let Some(select) = select {
                pairs.append_pair("select", select);
            }
        }
        strip_empty_query(&mut url);

        let envelope: Envelope<Message> = self.call(HttpRequest::get(url)).await?;
        Ok(envelope.data)
    }

    pub(crate) async fn update_message(
        &self,
        message_id: &str,
        update: &MessageUpdate,
        select: Option<&str>,
    ) -> Result<Message> {
        let mut url = self.messages_url(&[message_id])?;
        if let Some(select) = select {
            url.query_pairs_mut().append_pair("select", select);
        }
        let body = serde_json::to_value(update).map_err(Error::malformed)?;

        let envelope: Envelope<Message> = self.call(HttpRequest::put(url).json(body)).await?;
        Ok(envelope.data)
    }

    pub(crate) async fn send_message(&self, request: &SendMessageRequest) -> Result<SentMessage> {
        let url = self.messages_url(&["send"])?;
        let body = serde_json::to_value(request).map_err(Error::malformed)?;

        let envelope: Envelope<SentMessage> = self.call(HttpRequest::post(url).json(body)).await?;
        tracing::info!(
            message_id = %envelope.data.message.id,
            scheduled = envelope.data.schedule_id.is_some(),
            "message sent"
        );
        Ok(envelope.data)
    }

    pub(crate) async fn scheduled_messages(&self) -> Result<Vec<ScheduledMessage>> {
        let url = self.messages_url(&["schedules"])?;
        let envelope: Envelope<Vec<ScheduledMessage>> = self.call(HttpRequest::get(url)).await?;
        Ok(envelope.data)
    }

    pub(crate) async fn scheduled_message(&self, schedule_id: &str) -> Result<ScheduledMessage> {
        let url = self.messages_url(&["schedules", schedule_id])?;
        let envelope: Envelope<ScheduledMessage> = self.call(HttpRequest::get(url)).await?;
        Ok(envelope.data)
    }

    pub(crate) async fn cancel_scheduled_message(&self, schedule_id: &str) -> Result<Confirmation> {
        let url = self.messages_url(&["schedules", schedule_id])?;
        let envelope: Envelope<Confirmation> = self.call(HttpRequest::delete(url)).await?;
        tracing::info!(schedule_id, "scheduled message cancelled");
        Ok(envelope.data)
    }
}

// `query_pairs_mut` leaves a bare `?` behind when nothing was appended.
fn strip_empty_query(url: &mut Url) {
    if url.query() == Some("") {
        url.set_query(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::Participant;
    use crate::transport::{HttpResponse, Method, MockHttpTransport, RequestBody};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn grant() -> Arc<Grant> {
        let body = json!({
            "access_token": "tok1",
            "expires_in": 3600,
            "id_token": "idt",
            "email": "a@b.com",
            "scopes": "email",
            "token_type": "Bearer",
            "grant_id": "g1",
        });
        Arc::new(Grant::from_json(&body.to_string(), false).unwrap())
    }

    fn session(transport: MockHttpTransport, scope: &str) -> MailboxSession {
        MailboxSession::new(
            grant(),
            Arc::new(transport),
            Url::parse("https://api.us.nylas.com").unwrap(),
            scope.to_string(),
        )
    }

    fn ok(data: serde_json::Value) -> HttpResponse {
        HttpResponse::new(200, json!({"request_id": "r1", "data": data}).to_string())
    }

    #[tokio::test]
    async fn list_messages_sends_filters_with_bearer_token() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .withf(|req| {
                req.method == Method::Get
                    && req.url.path() == "/v3/grants/me/messages"
                    && req.url.query() == Some("limit=5&subject=hello+world&unread=true")
                    && req.header_value("Authorization") == Some("Bearer tok1")
                    && req.body == RequestBody::Empty
            })
            .times(1)
            .returning(|_| {
                Ok(HttpResponse::new(
                    200,
                    json!({
                        "request_id": "r1",
                        "data": [{"id": "m1"}, {"id": "m2"}],
                        "next_cursor": "c2",
                    })
                    .to_string(),
                ))
            });

        let query = MessageQuery::with_limit(5).subject("hello world").unread(true);
        let page = session(transport, "me").list_messages(&query).await.unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[1].id, "m2");
        assert_eq!(page.next_cursor.as_deref(), Some("c2"));
        assert_eq!(page.request_id.as_deref(), Some("r1"));
    }

    #[tokio::test]
    async fn get_message_without_options_has_no_query() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .withf(|req| {
                req.url.as_str() == "https://api.us.nylas.com/v3/grants/g1/messages/m1"
            })
            .times(1)
            .returning(|_| Ok(ok(json!({"id": "m1", "subject": "Hi"}))));

        let message = session(transport, "g1")
            .get_message("m1", None, None)
            .await
            .unwrap();
        assert_eq!(message.subject.as_deref(), Some("Hi"));
    }

    #[tokio::test]
    async fn get_message_with_fields_and_select() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .withf(|req| req.url.query() == Some("fields=raw_mime&select=id%2Craw_mime"))
            .times(1)
            .returning(|_| Ok(ok(json!({"id": "m1", "raw_mime": "TUlNRQ=="}))));

        let message = session(transport, "g1")
            .get_message("m1", Some(Fields::RawMime), Some("id,raw_mime"))
            .await
            .unwrap();
        assert_eq!(message.raw_mime.as_deref(), Some("TUlNRQ=="));
    }

    #[tokio::test]
    async fn update_message_puts_present_flags() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .withf(|req| {
                req.method == Method::Put
                    && req.url.path() == "/v3/grants/g1/messages/m1"
                    && req.body == RequestBody::Json(json!({"unread": false}))
            })
            .times(1)
            .returning(|_| Ok(ok(json!({"id": "m1", "unread": false}))));

        let update = MessageUpdate::default().unread(false);
        let message = session(transport, "g1")
            .update_message("m1", &update, None)
            .await
            .unwrap();
        assert_eq!(message.unread, Some(false));
    }

    #[tokio::test]
    async fn send_message_posts_json() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .withf(|req| {
                req.method == Method::Post
                    && req.url.path() == "/v3/grants/me/messages/send"
                    && matches!(&req.body, RequestBody::Json(v) if v["subject"] == "Hello")
            })
            .times(1)
            .returning(|_| Ok(ok(json!({"id": "m9", "schedule_id": "s1"}))));

        let request = SendMessageRequest::new(
            "Hello",
            "body",
            vec![Participant::new("me@example.com")],
            vec![Participant::new("you@example.com")],
        );
        let sent = session(transport, "me").send_message(&request).await.unwrap();

        assert_eq!(sent.message.id, "m9");
        assert_eq!(sent.schedule_id.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn schedule_operations_use_schedule_paths() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .withf(|req| req.method == Method::Get && req.url.path() == "/v3/grants/g1/messages/schedules")
            .times(1)
            .returning(|_| {
                Ok(ok(json!([
                    {"schedule_id": "s1", "status": {"code": "pending"}, "close_time": 1700000000}
                ])))
            });
        transport
            .expect_execute()
            .withf(|req| req.method == Method::Get && req.url.path() == "/v3/grants/g1/messages/schedules/s1")
            .times(1)
            .returning(|_| {
                Ok(ok(json!({"schedule_id": "s1", "status": {"code": "success", "description": "sent"}})))
            });
        transport
            .expect_execute()
            .withf(|req| req.method == Method::Delete && req.url.path() == "/v3/grants/g1/messages/schedules/s1")
            .times(1)
            .returning(|_| Ok(ok(json!({"message": "Scheduled message cancelled"}))));

        let session = session(transport, "g1");

        let all = session.scheduled_messages().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status.code, "pending");
        assert_eq!(all[0].close_time, Some(1_700_000_000));

        let one = session.scheduled_message("s1").await.unwrap();
        assert_eq!(one.status.description.as_deref(), Some("sent"));

        let confirmation = session.cancel_scheduled_message("s1").await.unwrap();
        assert_eq!(confirmation.message, "Scheduled message cancelled");
    }

    #[tokio::test]
    async fn error_status_becomes_api_error() {
        let mut transport = MockHttpTransport::new();
        transport.expect_execute().times(1).returning(|_| {
            Ok(HttpResponse::new(
                404,
                r#"{"error":{"type":"not_found","message":"no such message"}}"#,
            ))
        });

        let err = session(transport, "g1")
            .get_message("missing", None, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Api { status: 404, ref message } if message == "no such message"
        ));
    }

    #[tokio::test]
    async fn response_without_data_is_malformed() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, r#"{"request_id":"r1"}"#)));

        let err = session(transport, "g1").scheduled_messages().await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let mut transport = MockHttpTransport::new();
        transport.expect_execute().times(1).returning(|_| {
            Err(Error::Transport {
                message: "connection reset".to_string(),
                source: None,
            })
        });

        let err = session(transport, "me")
            .list_messages(&MessageQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }
}
