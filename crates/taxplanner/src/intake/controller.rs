use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::draft::{DraftField, FilingDraft};
use super::sink::{SubmissionFailure, SubmissionSink};
use super::step::FormStep;
use super::summary::ReviewSummary;
use crate::catalog::{IncomeType, VisaType};
use crate::notification::{DeliveryReceipt, NotificationRequest};

const REQUIRED_FIELDS: [DraftField; 3] = [
    DraftField::FirstName,
    DraftField::LastName,
    DraftField::Email,
];

/// How much the controller checks before letting a draft leave the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Required fields must be non-blank; formats are not checked.
    #[default]
    Lenient,
    /// Adds email, phone and arrival-date format checks.
    Strict,
}

/// Outcome of the latest submission attempt, as shown to the filer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        receipt: DeliveryReceipt,
    },
    Failed {
        reason: String,
    },
}

impl SubmissionStatus {
    /// Banner text for the current status, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Idle => None,
            Self::Submitting => Some("Submitting...".to_string()),
            Self::Succeeded { .. } => Some(
                "Application Submitted! We'll review your information and contact you within 24 hours."
                    .to_string(),
            ),
            Self::Failed { reason } => Some(format!(
                "Submission failed, please retry. Your answers have been kept. ({reason})"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("submission is only available on the review step (currently on {})", .0.title())]
    NotOnReviewStep(FormStep),
    #[error("the privacy policy and terms must be accepted before submitting")]
    TermsNotAccepted,
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("no submission is in flight")]
    NoSubmissionInFlight,
    #[error("{0} is required")]
    MissingField(DraftField),
    #[error("{field} is invalid: {reason}")]
    InvalidField {
        field: DraftField,
        reason: &'static str,
    },
    #[error("submission failed, please retry: {0}")]
    Delivery(#[from] SubmissionFailure),
}

/// State machine behind the four-step filing form.
///
/// The controller is cyclic: a confirmed submission returns it to the first
/// step with an empty draft. A failed one keeps every answer.
#[derive(Debug, Default)]
pub struct IntakeFormController {
    step: FormStep,
    draft: FilingDraft,
    status: SubmissionStatus,
    validation: ValidationMode,
}

impl IntakeFormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validation(validation: ValidationMode) -> Self {
        Self {
            validation,
            ..Self::default()
        }
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn position(&self) -> u8 {
        self.step.position()
    }

    pub fn draft(&self) -> &FilingDraft {
        &self.draft
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    pub fn validation(&self) -> ValidationMode {
        self.validation
    }

    pub fn advance(&mut self) -> FormStep {
        self.step = self.step.next();
        debug!(step = self.step.position(), "intake step advanced");
        self.step
    }

    pub fn retreat(&mut self) -> FormStep {
        self.step = self.step.previous();
        debug!(step = self.step.position(), "intake step retreated");
        self.step
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set_field(field, value);
    }

    pub fn set_visa_type(&mut self, visa: Option<VisaType>) {
        self.draft.visa_type = visa;
    }

    pub fn toggle_income_type(&mut self, income: IncomeType) -> bool {
        self.draft.toggle_income_type(income)
    }

    pub fn set_agreement(&mut self, agreed: bool) {
        self.draft.agreed_to_terms = agreed;
    }

    /// Whether the submit affordance should be enabled.
    pub fn can_submit(&self) -> bool {
        self.step == FormStep::Review && self.draft.agreed_to_terms && !self.is_submitting()
    }

    pub fn review(&self) -> ReviewSummary {
        ReviewSummary::from_draft(&self.draft)
    }

    /// Check every gate and, if all pass, mark the controller as submitting
    /// and return the payload to send. A failed gate changes nothing.
    pub fn begin_submission(&mut self) -> Result<NotificationRequest, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::AlreadySubmitting);
        }
        if self.step != FormStep::Review {
            return Err(SubmitError::NotOnReviewStep(self.step));
        }
        if !self.draft.agreed_to_terms {
            return Err(SubmitError::TermsNotAccepted);
        }
        self.validate()?;

        self.status = SubmissionStatus::Submitting;
        Ok(NotificationRequest::Filing(self.draft.to_notification()))
    }

    /// Apply the result of the outbound call started by `begin_submission`.
    pub fn finish_submission(
        &mut self,
        result: Result<DeliveryReceipt, SubmissionFailure>,
    ) -> Result<DeliveryReceipt, SubmitError> {
        if !self.is_submitting() {
            return Err(SubmitError::NoSubmissionInFlight);
        }

        match result {
            Ok(receipt) => {
                info!(id = %receipt.id, "filing submission delivered");
                self.step = FormStep::FIRST;
                self.draft = FilingDraft::default();
                self.status = SubmissionStatus::Succeeded {
                    receipt: receipt.clone(),
                };
                Ok(receipt)
            }
            Err(failure) => {
                warn!(error = %failure, "filing submission failed");
                self.status = SubmissionStatus::Failed {
                    reason: failure.to_string(),
                };
                Err(SubmitError::Delivery(failure))
            }
        }
    }

    /// Gate, send once through `sink`, and apply the outcome.
    pub async fn submit<S>(&mut self, sink: &S) -> Result<DeliveryReceipt, SubmitError>
    where
        S: SubmissionSink + ?Sized,
    {
        let request = self.begin_submission()?;
        let mut in_flight = InFlight {
            controller: self,
            settled: false,
        };
        let result = sink.submit(&request).await;
        in_flight.settled = true;
        in_flight.controller.finish_submission(result)
    }

    /// Give up on the submission in flight without touching the draft.
    /// Returns whether one was in flight.
    pub fn abandon_submission(&mut self) -> bool {
        if !self.is_submitting() {
            return false;
        }
        warn!("filing submission abandoned before the relay answered");
        self.status = SubmissionStatus::Failed {
            reason: INTERRUPTED_REASON.to_string(),
        };
        true
    }

    pub fn reset(&mut self) {
        self.step = FormStep::FIRST;
        self.draft = FilingDraft::default();
        self.status = SubmissionStatus::Idle;
    }

    fn validate(&self) -> Result<(), SubmitError> {
        for field in REQUIRED_FIELDS {
            if self.draft.field(field).trim().is_empty() {
                return Err(SubmitError::MissingField(field));
            }
        }

        if self.validation == ValidationMode::Strict {
            validate_formats(&self.draft)?;
        }

        Ok(())
    }
}

const INTERRUPTED_REASON: &str = "submission was interrupted before the relay answered";

/// Settles the controller if a `submit` future is dropped mid-flight.
struct InFlight<'a> {
    controller: &'a mut IntakeFormController,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.controller.abandon_submission();
        }
    }
}

fn validate_formats(draft: &FilingDraft) -> Result<(), SubmitError> {
    if !looks_like_email(draft.email.trim()) {
        return Err(SubmitError::InvalidField {
            field: DraftField::Email,
            reason: "expected an address like name@university.edu",
        });
    }

    let phone = draft.phone.trim();
    if !phone.is_empty() && !looks_like_phone(phone) {
        return Err(SubmitError::InvalidField {
            field: DraftField::Phone,
            reason: "expected at least 7 digits",
        });
    }

    let arrival = draft.arrival_date.trim();
    if !arrival.is_empty() && NaiveDate::parse_from_str(arrival, "%Y-%m-%d").is_err() {
        return Err(SubmitError::InvalidField {
            field: DraftField::ArrivalDate,
            reason: "expected YYYY-MM-DD",
        });
    }

    Ok(())
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

fn looks_like_phone(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    allowed && digits >= 7
}
