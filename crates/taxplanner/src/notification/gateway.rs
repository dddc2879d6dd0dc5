use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

/// Fully addressed email handed to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Provider acknowledgment for an accepted email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("email provider unreachable: {0}")]
    Transport(String),
    #[error("email provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("email provider returned an unreadable response: {0}")]
    MalformedResponse(String),
}

/// Outbound hook to a transactional email provider.
#[async_trait]
pub trait EmailGateway: Debug + Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, DeliveryError>;
}

/// Client for a Resend-compatible `POST /emails` API.
pub struct ResendClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ResendClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;
        Ok(Self::with_client(http, base_url, api_key))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Debug for ResendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EmailGateway for ResendClient {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, DeliveryError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(email)
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<DeliveryReceipt>(&body)
            .map_err(|err| DeliveryError::MalformedResponse(err.to_string()))
    }
}
