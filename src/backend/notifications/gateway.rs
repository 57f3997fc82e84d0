/**
 * Push Gateways
 *
 * A gateway delivers one payload to one device token. Pushy is used in
 * production; when no API key is configured the server falls back to a
 * gateway that only logs what would have been sent.
 *
 * # Pushy Request
 *
 * ```text
 * POST https://api.pushy.me/push?api_key=SECRET
 * {"to": "<device token>", "data": {"type": "msg", ...}}
 * ```
 */

use std::future::Future;

use serde::Serialize;
use thiserror::Error;

use crate::backend::server::config::ServerConfig;
use crate::shared::PushPayload;

/// Errors from delivering a notification
///
/// These are logged by the dispatcher and never reach an HTTP caller.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("push request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("push gateway answered {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("push token lookup failed: {0}")]
    Store(#[from] sqlx::Error),
}

/// Delivery of a payload to a single device
pub trait PushGateway: Send + Sync + 'static {
    fn send(
        &self,
        token: &str,
        payload: &PushPayload,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

#[derive(Serialize)]
struct PushyRequest<'a> {
    to: &'a str,
    data: &'a PushPayload,
}

/// Pushy REST API client
#[derive(Debug, Clone)]
pub struct PushyGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl PushyGateway {
    /// Create a client for `endpoint` authenticated with `api_key`
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

impl PushGateway for PushyGateway {
    async fn send(&self, token: &str, payload: &PushPayload) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("api_key", self.api_key.as_str())])
            .json(&PushyRequest { to: token, data: payload })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Gateway that logs payloads instead of sending them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogGateway;

impl PushGateway for LogGateway {
    async fn send(&self, token: &str, payload: &PushPayload) -> Result<(), NotifyError> {
        tracing::debug!(token, payload = ?payload, "Push (not sent, no gateway configured)");
        Ok(())
    }
}

/// Gateway selected from configuration
#[derive(Debug, Clone)]
pub enum Gateway {
    Pushy(PushyGateway),
    Log(LogGateway),
}

impl Gateway {
    /// Pushy when an API key is configured, logging otherwise
    pub fn from_config(config: &ServerConfig) -> Self {
        match &config.pushy_api_key {
            Some(key) => Self::Pushy(PushyGateway::new(config.pushy_endpoint.clone(), key.clone())),
            None => {
                tracing::warn!("PUSHY_API_KEY not set, push notifications will only be logged");
                Self::Log(LogGateway)
            }
        }
    }
}

impl PushGateway for Gateway {
    async fn send(&self, token: &str, payload: &PushPayload) -> Result<(), NotifyError> {
        match self {
            Self::Pushy(gateway) => gateway.send(token, payload).await,
            Self::Log(gateway) => gateway.send(token, payload).await,
        }
    }
}
