use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use taxplanner::notification::{DeliveryError, DeliveryReceipt, EmailGateway, OutboundEmail};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Gateway used with `--dry-run`: logs the email instead of sending it.
#[derive(Debug, Default)]
pub(crate) struct DryRunGateway {
    sequence: AtomicU64,
    #[cfg(test)]
    outbox: std::sync::Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl EmailGateway for DryRunGateway {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, DeliveryError> {
        let id = format!("dry-run-{:06}", self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        info!(%id, to = ?email.to, subject = %email.subject, "dry run: email not sent");
        #[cfg(test)]
        self.outbox
            .lock()
            .expect("outbox mutex poisoned")
            .push(email.clone());
        Ok(DeliveryReceipt { id })
    }
}

impl DryRunGateway {
    #[cfg(test)]
    pub(crate) fn outbox(&self) -> Vec<OutboundEmail> {
        self.outbox.lock().expect("outbox mutex poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dry_run_ids_are_sequential() {
        let gateway = DryRunGateway::default();
        let email = OutboundEmail {
            from: "MyTaxPlanners <onboarding@resend.dev>".to_string(),
            to: vec!["filings@example.com".to_string()],
            subject: "New Contact Form: General Inquiry".to_string(),
            html: "<h1>New Contact Form Submission</h1>".to_string(),
        };

        let first = gateway.send(&email).await.expect("dry run accepts");
        let second = gateway.send(&email).await.expect("dry run accepts");

        assert_eq!(first.id, "dry-run-000001");
        assert_eq!(second.id, "dry-run-000002");
        assert_eq!(gateway.outbox().len(), 2);
    }
}
