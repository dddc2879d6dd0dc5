use async_trait::async_trait;
use serde::Deserialize;

use crate::notification::{DeliveryReceipt, EmailGateway, NotificationRelay, NotificationRequest};

/// Why a submission did not reach the administrator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionFailure {
    #[error("relay unreachable: {0}")]
    Unreachable(String),
    #[error("relay reported failure ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("notification not delivered: {0}")]
    Undelivered(String),
    #[error("relay returned an unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Destination for a serialized intake submission.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(
        &self,
        request: &NotificationRequest,
    ) -> Result<DeliveryReceipt, SubmissionFailure>;
}

#[async_trait]
impl<G> SubmissionSink for NotificationRelay<G>
where
    G: EmailGateway + ?Sized,
{
    async fn submit(
        &self,
        request: &NotificationRequest,
    ) -> Result<DeliveryReceipt, SubmissionFailure> {
        self.relay(request)
            .await
            .map_err(|err| SubmissionFailure::Undelivered(err.to_string()))
    }
}

/// HTTP client for a deployed relay endpoint.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RelayAck {
    #[serde(default)]
    success: bool,
    id: Option<String>,
    error: Option<String>,
}

impl RelayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SubmissionSink for RelayClient {
    async fn submit(
        &self,
        request: &NotificationRequest,
    ) -> Result<DeliveryReceipt, SubmissionFailure> {
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|err| SubmissionFailure::Unreachable(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SubmissionFailure::Unreachable(err.to_string()))?;
        let ack = serde_json::from_str::<RelayAck>(&body).ok();

        if !status.is_success() {
            let message = ack.and_then(|ack| ack.error).unwrap_or(body);
            return Err(SubmissionFailure::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        match ack {
            Some(RelayAck {
                success: true,
                id: Some(id),
                ..
            }) => Ok(DeliveryReceipt { id }),
            _ => Err(SubmissionFailure::UnexpectedResponse(body)),
        }
    }
}
