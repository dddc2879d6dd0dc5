use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use taxplanner::error::AppError;
use taxplanner::notification::{render, NotificationRequest};

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// JSON file holding a contact or filing notification request
    pub(crate) path: PathBuf,
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.path)?;
    print!("{}", preview_request(&raw)?);
    Ok(())
}

fn preview_request(raw: &str) -> Result<String, AppError> {
    let request: NotificationRequest = serde_json::from_str(raw)?;
    let email = render(&request);

    let mut output = String::new();
    writeln!(output, "Kind: {}", request.kind()).expect("write to string");
    writeln!(output, "Subject: {}", email.subject).expect("write to string");
    writeln!(output).expect("write to string");
    writeln!(output, "{}", email.html).expect("write to string");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_preview_shows_subject_and_body() {
        let output = preview_request(
            r#"{"type":"contact","name":"Ana","email":"ana@example.edu","message":"Hi"}"#,
        )
        .expect("valid request");

        assert!(output.starts_with("Kind: contact\n"));
        assert!(output.contains("Subject: New Contact Form: General Inquiry"));
        assert!(output.contains("ana@example.edu"));
    }

    #[test]
    fn unknown_kind_is_a_payload_error() {
        let err = preview_request(r#"{"type":"newsletter"}"#).expect_err("unknown type");
        assert!(matches!(err, AppError::Payload(_)));
    }
}
