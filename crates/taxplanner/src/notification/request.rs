use serde::{Deserialize, Serialize};

/// Submission accepted by the relay, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NotificationRequest {
    Contact(ContactNotification),
    Filing(FilingNotification),
}

impl NotificationRequest {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Contact(_) => "contact",
            Self::Filing(_) => "filing",
        }
    }
}

/// General inquiry from the contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactNotification {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

/// Completed tax-filing intake.
///
/// `visa_type` and `income_types` carry catalog codes (`f1`, `wages`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingNotification {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub visa_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default)]
    pub income_types: Vec<String>,
    #[serde(default)]
    pub has_scholarship: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contact_payload_parses_without_subject() {
        let payload = json!({
            "type": "contact",
            "name": "Ana Lima",
            "email": "ana@example.edu",
            "message": "Do you handle 8843 forms?"
        });

        let request: NotificationRequest = serde_json::from_value(payload).expect("parses");
        match request {
            NotificationRequest::Contact(contact) => {
                assert_eq!(contact.name, "Ana Lima");
                assert!(contact.subject.is_none());
            }
            other => panic!("expected contact request, got {other:?}"),
        }
    }

    #[test]
    fn filing_payload_uses_camel_case_keys() {
        let payload = json!({
            "type": "filing",
            "firstName": "Wei",
            "lastName": "Zhang",
            "email": "wei@example.edu",
            "visaType": "f1",
            "incomeTypes": ["wages", "scholarship"],
            "hasScholarship": true
        });

        let request: NotificationRequest = serde_json::from_value(payload).expect("parses");
        assert_eq!(request.kind(), "filing");
        let NotificationRequest::Filing(filing) = request else {
            panic!("expected filing request");
        };
        assert_eq!(filing.first_name, "Wei");
        assert_eq!(filing.income_types, vec!["wages", "scholarship"]);
        assert!(filing.has_scholarship);
        assert!(filing.phone.is_none());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let payload = json!({ "type": "newsletter", "email": "x@example.com" });
        assert!(serde_json::from_value::<NotificationRequest>(payload).is_err());
    }

    #[test]
    fn serialized_filing_carries_tag_and_omits_absent_optionals() {
        let request = NotificationRequest::Filing(FilingNotification {
            first_name: "Wei".to_string(),
            last_name: "Zhang".to_string(),
            email: "wei@example.edu".to_string(),
            phone: None,
            visa_type: "j1".to_string(),
            arrival_date: None,
            university: Some("Columbia University".to_string()),
            income_types: vec!["stipend".to_string()],
            has_scholarship: false,
            additional_notes: None,
        });

        let value = serde_json::to_value(&request).expect("serializes");
        assert_eq!(value["type"], "filing");
        assert_eq!(value["visaType"], "j1");
        assert_eq!(value["university"], "Columbia University");
        assert!(value.get("phone").is_none());
    }
}
