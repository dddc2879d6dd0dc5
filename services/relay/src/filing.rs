use clap::Args;
use std::sync::Arc;
use taxplanner::catalog::{IncomeType, VisaType};
use taxplanner::config::AppConfig;
use taxplanner::error::AppError;
use taxplanner::intake::{
    DraftField, FormStep, IntakeFormController, RelayClient, SubmissionSink, ValidationMode,
};
use taxplanner::notification::NotificationRelay;

use crate::infra::DryRunGateway;

#[derive(Args, Debug, Default)]
pub(crate) struct FilingArgs {
    #[arg(long)]
    pub(crate) first_name: String,
    #[arg(long)]
    pub(crate) last_name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    /// Visa code (f1, j1, m1, h1b, other)
    #[arg(long)]
    pub(crate) visa: Option<VisaType>,
    /// Date of arrival in the US (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) arrival_date: Option<String>,
    #[arg(long)]
    pub(crate) university: Option<String>,
    /// Income code, repeatable (wages, scholarship, freelance, stipend, interest, other)
    #[arg(long = "income")]
    pub(crate) incomes: Vec<IncomeType>,
    /// Accept the terms of service and privacy policy
    #[arg(long)]
    pub(crate) agree: bool,
    /// Check email, phone and date formats before submitting
    #[arg(long)]
    pub(crate) strict: bool,
    /// Submit to a running relay instead of rendering in-process
    #[arg(long)]
    pub(crate) relay_url: Option<String>,
}

pub(crate) async fn run_filing(args: FilingArgs) -> Result<(), AppError> {
    let mut controller = fill_controller(&args);
    println!(
        "Step {} of {}: {}",
        controller.position(),
        FormStep::ordered().len(),
        controller.step().title()
    );
    println!("{}", controller.review());
    println!();

    let sink: Box<dyn SubmissionSink> = match &args.relay_url {
        Some(url) => Box::new(RelayClient::new(url.clone())),
        None => {
            let settings = AppConfig::load()?.notification.relay_settings();
            Box::new(NotificationRelay::new(
                Arc::new(DryRunGateway::default()),
                settings,
            ))
        }
    };

    let outcome = controller.submit(sink.as_ref()).await;
    if let Some(message) = controller.status().message() {
        println!("{message}");
    }
    outcome?;
    Ok(())
}

/// Enter every answer step by step and stop on the review step.
fn fill_controller(args: &FilingArgs) -> IntakeFormController {
    let validation = if args.strict {
        ValidationMode::Strict
    } else {
        ValidationMode::Lenient
    };
    let mut controller = IntakeFormController::with_validation(validation);

    controller.set_field(DraftField::FirstName, args.first_name.as_str());
    controller.set_field(DraftField::LastName, args.last_name.as_str());
    controller.set_field(DraftField::Email, args.email.as_str());
    if let Some(phone) = &args.phone {
        controller.set_field(DraftField::Phone, phone.as_str());
    }
    controller.advance();

    controller.set_visa_type(args.visa);
    if let Some(arrival) = &args.arrival_date {
        controller.set_field(DraftField::ArrivalDate, arrival.as_str());
    }
    if let Some(university) = &args.university {
        controller.set_field(DraftField::University, university.as_str());
    }
    controller.advance();

    for income in &args.incomes {
        if !controller.draft().selected_income_types.contains(income) {
            controller.toggle_income_type(*income);
        }
    }
    controller.advance();

    controller.set_agreement(args.agree);
    controller
}
