use std::sync::Arc;

use tracing::{error, info};

use super::gateway::{DeliveryError, DeliveryReceipt, EmailGateway, OutboundEmail};
use super::request::NotificationRequest;
use super::template::render;

/// Fixed addressing for every notification the relay emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    pub sender: String,
    pub recipient: String,
}

/// Stateless translator from a submission to one provider call.
#[derive(Debug)]
pub struct NotificationRelay<G: ?Sized> {
    gateway: Arc<G>,
    settings: RelaySettings,
}

impl<G> NotificationRelay<G>
where
    G: EmailGateway + ?Sized,
{
    pub fn new(gateway: Arc<G>, settings: RelaySettings) -> Self {
        Self { gateway, settings }
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    pub fn compose(&self, request: &NotificationRequest) -> OutboundEmail {
        let rendered = render(request);
        OutboundEmail {
            from: self.settings.sender.clone(),
            to: vec![self.settings.recipient.clone()],
            subject: rendered.subject,
            html: rendered.html,
        }
    }

    /// Render and forward a submission. No retry: a failed call is final.
    pub async fn relay(
        &self,
        request: &NotificationRequest,
    ) -> Result<DeliveryReceipt, RelayError> {
        let email = self.compose(request);
        match self.gateway.send(&email).await {
            Ok(receipt) => {
                info!(kind = request.kind(), id = %receipt.id, "notification email sent");
                Ok(receipt)
            }
            Err(err) => {
                error!(kind = request.kind(), error = %err, "notification email failed");
                Err(RelayError::Delivery(err))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
