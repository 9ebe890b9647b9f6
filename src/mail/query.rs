//! Filters for message listings.

use chrono::{DateTime, Utc};

use super::Fields;

/// Page size used when none is given.
pub const DEFAULT_LIMIT: u32 = 50;

/// Filters for [`crate::mail::Mailbox::list_messages`].
///
/// All filters are optional and combined server side with AND. Only set
/// filters are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageQuery {
    /// Maximum number of messages per page.
    pub limit: u32,
    /// Cursor from a previous [`crate::mail::Page::next_cursor`].
    pub page_token: Option<String>,
    /// Comma-separated list of fields to return.
    pub select: Option<String>,
    /// Exact subject match.
    pub subject: Option<String>,
    /// Comma-separated addresses matched against any participant.
    pub any_email: Option<String>,
    /// Recipient address.
    pub to: Option<String>,
    /// Sender address.
    pub from: Option<String>,
    /// CC address.
    pub cc: Option<String>,
    /// BCC address.
    pub bcc: Option<String>,
    /// Folder or label ID.
    pub in_folder: Option<String>,
    /// Unread state.
    pub unread: Option<bool>,
    /// Starred state.
    pub starred: Option<bool>,
    /// Restricts results to one thread.
    pub thread_id: Option<String>,
    /// Received strictly before this time.
    pub received_before: Option<DateTime<Utc>>,
    /// Received strictly after this time.
    pub received_after: Option<DateTime<Utc>>,
    /// Extra field groups to include.
    pub fields: Option<Fields>,
    /// Provider-native search expression, e.g. Gmail search syntax.
    pub search_query_native: Option<String>,
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page_token: None,
            select: None,
            subject: None,
            any_email: None,
            to: None,
            from: None,
            cc: None,
            bcc: None,
            in_folder: None,
            unread: None,
            starred: None,
            thread_id: None,
            received_before: None,
            received_after: None,
            fields: None,
            search_query_native: None,
        }
    }
}

impl MessageQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Query for the page after the one that returned `cursor`.
    pub fn next_page(mut self, cursor: impl Into<String>) -> Self {
        self.page_token = Some(cursor.into());
        self
    }

    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn any_email(mut self, email: impl Into<String>) -> Self {
        self.any_email = Some(email.into());
        self
    }

    pub fn to(mut self, email: impl Into<String>) -> Self {
        self.to = Some(email.into());
        self
    }

    pub fn from(mut self, email: impl Into<String>) -> Self {
        self.from = Some(email.into());
        self
    }

    pub fn cc(mut self, email: impl Into<String>) -> Self {
        self.cc = Some(email.into());
        self
    }

    pub fn bcc(mut self, email: impl Into<String>) -> Self {
        self.bcc = Some(email.into());
        self
    }

    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.in_folder = Some(folder.into());
        self
    }

    pub fn unread(mut self, unread: bool) -> Self {
        self.unread = Some(unread);
        self
    }

    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = Some(starred);
        self
    }

    pub fn thread(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn received_before(mut self, at: DateTime<Utc>) -> Self {
        self.received_before = Some(at);
        self
    }

    pub fn received_after(mut self, at: DateTime<Utc>) -> Self {
        self.received_after = Some(at);
        self
    }

    pub fn fields(mut self, fields: Fields) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn search_native(mut self, query: impl Into<String>) -> Self {
        self.search_query_native = Some(query.into());
        self
    }

    /// Query-string pairs for the set filters, `limit` first.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("limit", self.limit.to_string())];

        let strings = [
            ("page_token", &self.page_token),
            ("select", &self.select),
            ("subject", &self.subject),
            ("any_email", &self.any_email),
            ("to", &self.to),
            ("from", &self.from),
            ("cc", &self.cc),
            ("bcc", &self.bcc),
            ("in", &self.in_folder),
        ];
        pairs.extend(
            strings
                .into_iter()
                .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone()))),
        );

        if let Some(unread) = self.unread {
            pairs.push(("unread", unread.to_string()));
        }
        if let Some(starred) = self.starred {
            pairs.push(("starred", starred.to_string()));
        }
        if let Some(thread_id) = &self.thread_id {
            pairs.push(("thread_id", thread_id.clone()));
        }
        if let Some(before) = self.received_before {
            pairs.push(("received_before", before.timestamp().to_string()));
        }
        if let Some(after) = self.received_after {
            pairs.push(("received_after", after.timestamp().to_string()));
        }
        if let Some(fields) = self.fields {
            pairs.push(("fields", fields.as_str().to_string()));
        }
        if let Some(query) = &self.search_query_native {
            pairs.push(("search_query_native", query.clone()));
        }

        pairs
    }
}
