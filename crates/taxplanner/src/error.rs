use crate::config::ConfigError;
use crate::intake::SubmitError;
use crate::notification::{DeliveryError, RelayError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Payload(serde_json::Error),
    Delivery(DeliveryError),
    Submission(SubmitError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Payload(err) => write!(f, "invalid notification payload: {}", err),
            AppError::Delivery(err) => write!(f, "delivery error: {}", err),
            AppError::Submission(err) => write!(f, "submission error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Payload(err) => Some(err),
            AppError::Delivery(err) => Some(err),
            AppError::Submission(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Payload(_) | AppError::Submission(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value)
    }
}

impl From<DeliveryError> for AppError {
    fn from(value: DeliveryError) -> Self {
        Self::Delivery(value)
    }
}

impl From<RelayError> for AppError {
    fn from(value: RelayError) -> Self {
        match value {
            RelayError::Delivery(err) => Self::Delivery(err),
        }
    }
}

impl From<SubmitError> for AppError {
    fn from(value: SubmitError) -> Self {
        Self::Submission(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_prefixes_the_failing_layer() {
        let err = AppError::from(ConfigError::MissingApiKey);
        assert_eq!(
            err.to_string(),
            "configuration error: RESEND_API_KEY must be set unless running with --dry-run"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn submission_errors_keep_their_reason() {
        let err = AppError::from(SubmitError::TermsNotAccepted);
        assert!(err.to_string().starts_with("submission error: "));
        assert!(err.to_string().contains("terms must be accepted"));
    }

    #[test]
    fn payload_errors_map_to_bad_request() {
        let parse = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated json");
        let response = AppError::from(parse).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let delivery = AppError::from(DeliveryError::Transport("timed out".to_string()));
        assert_eq!(
            delivery.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
