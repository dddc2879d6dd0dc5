//! Four-step filing intake: draft state, step sequencing, review projection and
//! the submission hand-off to the notification relay.

pub mod controller;
pub mod draft;
pub mod sink;
pub mod step;
pub mod summary;

pub use controller::{IntakeFormController, SubmissionStatus, SubmitError, ValidationMode};
pub use draft::{DraftField, FilingDraft};
pub use sink::{RelayClient, SubmissionFailure, SubmissionSink};
pub use step::FormStep;
pub use summary::ReviewSummary;
