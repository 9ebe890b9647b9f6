//! The [`Grant`] entity produced by a token exchange.

use std::fmt;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{GrantType, Provider};
use crate::error::{Error, Result};

/// Decoded body of a successful token exchange.
///
/// Missing required fields fail deserialization, which callers surface as
/// [`Error::MalformedResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct GrantResponse {
    /// Bearer access token.
    pub access_token: String,
    /// Remaining token lifetime in seconds.
    pub expires_in: u64,
    /// OIDC identity token.
    pub id_token: String,
    /// Authenticated mailbox address.
    pub email: String,
    /// Present only for offline access requests.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Space-delimited scope list.
    pub scopes: String,
    /// Token scheme, currently always `Bearer`.
    pub token_type: String,
    /// Identifier of the authorization.
    pub grant_id: String,
    /// Provider name, parsed tolerantly.
    #[serde(default)]
    pub provider: Option<String>,
}

/// Immutable result of a completed OAuth2 authorization.
#[derive(Clone, PartialEq, Eq)]
pub struct Grant {
    access_token: String,
    expires_in: u64,
    id_token: String,
    email: String,
    refresh_token: Option<String>,
    scopes: Vec<String>,
    token_type: String,
    grant_id: String,
    provider: Option<Provider>,
    grant_type: GrantType,
}

impl Grant {
    /// Builds a grant from a token response.
    ///
    /// `online` selects the grant type: `true` for the authorization-code
    /// flow, `false` for the refresh-token flow. The response content has no
    /// say in it, so a flag that does not match the flow actually used yields
    /// a mislabeled grant.
    pub fn from_response(response: GrantResponse, online: bool) -> Result<Self> {
        if response.access_token.is_empty() {
            return Err(Error::MalformedResponse(
                "access_token must not be empty".to_string(),
            ));
        }

        Ok(Self {
            access_token: response.access_token,
            expires_in: response.expires_in,
            id_token: response.id_token,
            email: response.email,
            refresh_token: response.refresh_token,
            scopes: response.scopes.split(' ').map(str::to_owned).collect(),
            token_type: response.token_type,
            grant_id: response.grant_id,
            provider: response.provider.as_deref().and_then(Provider::parse),
            grant_type: GrantType::from_online(online),
        })
    }

    /// Decodes a token response body and builds a grant from it.
    pub fn from_json(body: &str, online: bool) -> Result<Self> {
        let response: GrantResponse = serde_json::from_str(body).map_err(Error::malformed)?;
        Self::from_response(response, online)
    }

    /// Returns true when the provider reported no remaining lifetime.
    ///
    /// This compares the `expires_in` value received at exchange time against
    /// zero. It does not track elapsed time since the exchange.
    pub fn is_token_expired(&self) -> bool {
        self.expires_in == 0
    }

    /// Bearer token for API calls.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Token lifetime in seconds, as reported at exchange time.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    /// OIDC identity token.
    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    /// Email address of the authorized account.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Refresh token, present only for offline access.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Granted scopes, in response order.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Token scheme, normally `Bearer`.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Identifier of the authorization.
    pub fn grant_id(&self) -> &str {
        &self.grant_id
    }

    /// Identity provider, `None` when absent or unrecognized.
    pub fn provider(&self) -> Option<Provider> {
        self.provider
    }

    /// Flow that produced the grant.
    pub fn grant_type(&self) -> GrantType {
        self.grant_type
    }

    /// Serializes every field into a JSON object.
    ///
    /// Absent `refresh_token` and `provider` are written as `null`.
    pub fn to_record(&self) -> Value {
        json!({
            "access_token": self.access_token,
            "expires_in": self.expires_in,
            "id_token": self.id_token,
            "email": self.email,
            "refresh_token": self.refresh_token,
            "scopes": self.scopes,
            "token_type": self.token_type,
            "grant_id": self.grant_id,
            "provider": self.provider.map(|p| p.as_str()),
            "grant_type": self.grant_type.as_str(),
        })
    }

    /// Text encoding of [`Grant::to_record`].
    pub fn to_json(&self) -> String {
        self.to_record().to_string()
    }
}

// Tokens stay out of logs and panic messages.
impl fmt::Debug for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grant")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("email", &self.email)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("scopes", &self.scopes)
            .field("token_type", &self.token_type)
            .field("grant_id", &self.grant_id)
            .field("provider", &self.provider)
            .field("grant_type", &self.grant_type)
            .finish_non_exhaustive()
    }
}
