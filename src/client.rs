//! Top-level API client: OAuth URLs and token exchange.
//!
//! # Flows
//!
//! - **Online**: the user is redirected to [`NylasClient::oauth_url`] with
//!   `access_type=online`; the returned authorization code is exchanged with
//!   `grant_type=authorization_code`.
//! - **Offline**: a stored refresh token is exchanged with
//!   `grant_type=refresh_token`.
//!
//! Both flows post a form to `{base}/v3/connect/token` and produce a
//! [`Grant`] whose [`GrantType`] is taken from the flow, not from the response.

use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::auth::{Grant, GrantType};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::mail::{AnyMailbox, MailboxFactory};
use crate::transport::{endpoint, HttpRequest, HttpTransport, ReqwestTransport};

/// PKCE verifier sent with authorization-code exchanges.
const CODE_VERIFIER: &str = "nylas";

/// Reads `error_code` and `error_description` from a token endpoint error
/// body. Each field is read independently; a missing or mistyped field
/// yields `None` for that field only.
fn token_error(body: &str) -> (Option<i64>, Option<String>) {
    let value: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let code = value.get("error_code").and_then(Value::as_i64);
    let description = value
        .get("error_description")
        .and_then(Value::as_str)
        .map(str::to_owned);
    (code, description)
}

/// Nylas API client.
///
/// # Example
///
/// ```ignore
/// use nylas_mail::{ClientConfig, NylasClient};
///
/// let client = NylasClient::new(ClientConfig::from_env()?)?;
/// println!("{}", client.oauth_url(true)?);
///
/// let grant = client.exchange_token(&code, true).await?;
/// let mailbox = client.mailbox(grant);
/// ```
#[derive(Clone)]
pub struct NylasClient {
    config: ClientConfig,
    base_url: Url,
    transport: Arc<dyn HttpTransport>,
}

impl NylasClient {
    /// Creates a client using [`ReqwestTransport`] with the configured timeout.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.request_timeout())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client that sends every request through `transport`.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;
        Ok(Self {
            config,
            base_url,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Authorization URL the user should be redirected to.
    ///
    /// `online` selects `access_type=online`, otherwise `offline`.
    pub fn oauth_url(&self, online: bool) -> Result<String> {
        let mut url = endpoint(&self.base_url, &["v3", "connect", "auth"])?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.callback_url)
            .append_pair("response_type", "code")
            .append_pair("access_type", GrantType::from_online(online).as_str());
        Ok(url.to_string())
    }

    /// Exchanges an authorization code (`online == true`) or a refresh token
    /// (`online == false`) for a [`Grant`].
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if no response was received
    /// - [`Error::UnsuccessfulTokenExchange`] for any status other than 200
    /// - [`Error::MalformedResponse`] if the body lacks a required field
    pub async fn exchange_token(&self, token: &str, online: bool) -> Result<Grant> {
        let url = endpoint(&self.base_url, &["v3", "connect", "token"])?;
        let request = if online {
            HttpRequest::post(url).form([
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("grant_type", "authorization_code"),
                ("code", token),
                ("redirect_uri", self.config.callback_url.as_str()),
                ("code_verifier", CODE_VERIFIER),
            ])
        } else {
            HttpRequest::post(url).form([
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", token),
            ])
        };

        tracing::debug!(grant_type = %GrantType::from_online(online), "exchanging token");
        let response = self.transport.execute(request).await?;

        if response.status != 200 {
            let (code, description) = token_error(&response.body);
            tracing::warn!(
                status = response.status,
                error_code = ?code,
                "token exchange rejected"
            );
            return Err(Error::UnsuccessfulTokenExchange {
                code,
                description: description.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        let grant = Grant::from_json(&response.body, online)?;
        tracing::info!(
            grant_id = %grant.grant_id(),
            grant_type = %grant.grant_type(),
            provider = ?grant.provider(),
            "token exchange succeeded"
        );
        Ok(grant)
    }

    /// Factory sharing this client's transport and base URL.
    pub fn mailbox_factory(&self) -> MailboxFactory {
        MailboxFactory::new(self.base_url.clone(), Arc::clone(&self.transport))
    }

    /// Mailbox for `grant`, selected by its grant type.
    pub fn mailbox(&self, grant: impl Into<Arc<Grant>>) -> AnyMailbox {
        self.mailbox_factory().create(grant)
    }
}
