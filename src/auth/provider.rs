//! Identity provider and grant type enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identity provider behind a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Workspace and Gmail.
    Google,
    /// Microsoft 365 and Outlook.
    Microsoft,
    /// Apple iCloud.
    Icloud,
    /// Generic IMAP account.
    Imap,
    /// Yahoo Mail.
    Yahoo,
    /// Exchange Web Services.
    Ews,
    /// Zoom.
    Zoom,
}

impl Provider {
    /// Every known provider, in declaration order.
    pub const ALL: [Provider; 7] = [
        Provider::Google,
        Provider::Microsoft,
        Provider::Icloud,
        Provider::Imap,
        Provider::Yahoo,
        Provider::Ews,
        Provider::Zoom,
    ];

    /// Returns the wire name of the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Microsoft => "microsoft",
            Provider::Icloud => "icloud",
            Provider::Imap => "imap",
            Provider::Yahoo => "yahoo",
            Provider::Ews => "ews",
            Provider::Zoom => "zoom",
        }
    }

    /// Parses a provider name.
    ///
    /// Unknown names return `None` rather than an error so that providers added
    /// upstream do not break existing clients.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth flow that produced a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantType {
    /// Authorization-code exchange; session scoped.
    Online,
    /// Refresh-token exchange; bound to a specific grant.
    Offline,
}

impl GrantType {
    /// Maps the token exchange flag to a grant type.
    pub fn from_online(online: bool) -> Self {
        if online {
            GrantType::Online
        } else {
            GrantType::Offline
        }
    }

    /// Returns true for [`GrantType::Online`].
    pub fn is_online(&self) -> bool {
        matches!(self, GrantType::Online)
    }

    /// Returns the wire name, also used as the OAuth `access_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::Online => "online",
            GrantType::Offline => "offline",
        }
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrantType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(GrantType::Online),
            "offline" => Ok(GrantType::Offline),
            other => Err(Error::InvalidGrantType(other.to_string())),
        }
    }
}
