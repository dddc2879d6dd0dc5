use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use taxplanner::catalog::{IncomeType, VisaType};
use taxplanner::intake::{
    DraftField, FormStep, IntakeFormController, RelayClient, SubmissionFailure, SubmissionStatus,
    SubmitError,
};
use taxplanner::notification::{
    notification_router, DeliveryError, DeliveryReceipt, EmailGateway, NotificationRelay,
    OutboundEmail, RelaySettings, NOTIFICATIONS_PATH,
};

#[derive(Debug, Default)]
struct CapturingGateway {
    sent: Mutex<Vec<OutboundEmail>>,
    fail_with: Option<u16>,
}

#[async_trait]
impl EmailGateway for CapturingGateway {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, DeliveryError> {
        if let Some(status) = self.fail_with {
            return Err(DeliveryError::Rejected {
                status,
                body: "domain not verified".to_string(),
            });
        }
        let mut sent = self.sent.lock().expect("gateway mutex poisoned");
        sent.push(email.clone());
        Ok(DeliveryReceipt {
            id: format!("email_{}", sent.len()),
        })
    }
}

fn settings() -> RelaySettings {
    RelaySettings {
        sender: "MyTaxPlanners <onboarding@resend.dev>".to_string(),
        recipient: "filings@mytaxplanners.com".to_string(),
    }
}

fn completed_form() -> IntakeFormController {
    let mut controller = IntakeFormController::new();
    controller.set_field(DraftField::FirstName, "Wei");
    controller.set_field(DraftField::LastName, "Zhang");
    controller.set_field(DraftField::Email, "wei.zhang@example.edu");
    controller.set_field(DraftField::Phone, "+1 (617) 555-0134");
    controller.advance();

    controller.set_visa_type(Some(VisaType::F1));
    controller.set_field(DraftField::ArrivalDate, "2023-08-15");
    controller.set_field(DraftField::University, "Boston University");
    controller.advance();

    controller.toggle_income_type(IncomeType::Scholarship);
    controller.toggle_income_type(IncomeType::Wages);
    controller.advance();

    controller.set_agreement(true);
    controller
}

#[tokio::test]
async fn in_process_relay_delivers_filing_email() {
    let gateway = Arc::new(CapturingGateway::default());
    let relay = NotificationRelay::new(gateway.clone(), settings());
    let mut controller = completed_form();
    assert_eq!(controller.step(), FormStep::Review);

    let receipt = controller.submit(&relay).await.expect("submission delivered");
    assert_eq!(receipt.id, "email_1");
    assert!(matches!(
        controller.status(),
        SubmissionStatus::Succeeded { .. }
    ));
    assert_eq!(controller.step(), FormStep::PersonalInfo);

    let sent = gateway.sent.lock().expect("gateway mutex poisoned");
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    assert_eq!(email.to, vec!["filings@mytaxplanners.com".to_string()]);
    assert_eq!(email.subject, "New Tax Filing Request: Wei Zhang");
    assert!(email.html.contains("F-1 Student Visa"));
    assert!(email.html.contains("Wages/Salary (W-2), Scholarship/Fellowship (1042-S)"));
    assert!(email.html.contains("2023-08-15"));
}

#[tokio::test]
async fn provider_rejection_keeps_the_draft() {
    let gateway = Arc::new(CapturingGateway {
        fail_with: Some(403),
        ..CapturingGateway::default()
    });
    let relay = NotificationRelay::new(gateway, settings());
    let mut controller = completed_form();
    let draft_before = controller.draft().clone();

    let err = controller.submit(&relay).await.expect_err("provider rejects");
    assert!(matches!(
        err,
        SubmitError::Delivery(SubmissionFailure::Undelivered(_))
    ));
    assert_eq!(controller.step(), FormStep::Review);
    assert_eq!(controller.draft(), &draft_before);
    assert!(controller
        .status()
        .message()
        .expect("failure banner")
        .starts_with("Submission failed"));
}

#[tokio::test]
async fn relay_client_submits_over_http() {
    let gateway = Arc::new(CapturingGateway::default());
    let relay = Arc::new(NotificationRelay::new(gateway.clone(), settings()));
    let app = notification_router(relay);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });

    let client = RelayClient::new(format!("http://{addr}{NOTIFICATIONS_PATH}"));
    let mut controller = completed_form();
    let receipt = controller
        .submit(&client)
        .await
        .expect("relay accepts over http");

    assert_eq!(receipt.id, "email_1");
    assert!(controller.draft().is_empty());
    assert_eq!(
        gateway.sent.lock().expect("gateway mutex poisoned")[0].subject,
        "New Tax Filing Request: Wei Zhang"
    );
}

#[tokio::test]
async fn relay_client_reports_provider_failure_over_http() {
    let gateway = Arc::new(CapturingGateway {
        fail_with: Some(422),
        ..CapturingGateway::default()
    });
    let app = notification_router(Arc::new(NotificationRelay::new(gateway, settings())));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });

    let client = RelayClient::new(format!("http://{addr}{NOTIFICATIONS_PATH}"));
    let mut controller = completed_form();
    match controller.submit(&client).await {
        Err(SubmitError::Delivery(SubmissionFailure::Rejected { status, message })) => {
            assert_eq!(status, 500);
            assert!(message.contains("domain not verified"));
        }
        other => panic!("expected relay rejection, got {other:?}"),
    }
    assert_eq!(controller.step(), FormStep::Review);
}
