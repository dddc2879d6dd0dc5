use std::fmt;

use super::draft::FilingDraft;

/// Read-only projection of a draft shown on the review step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub visa: String,
    pub arrival: String,
    pub university: String,
    pub income: String,
}

impl ReviewSummary {
    pub fn from_draft(draft: &FilingDraft) -> Self {
        let full_name = format!("{} {}", draft.first_name.trim(), draft.last_name.trim())
            .trim()
            .to_string();

        let income = if draft.selected_income_types.is_empty() {
            "None selected".to_string()
        } else {
            draft
                .selected_income_types
                .iter()
                .map(|income| income.label())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            full_name,
            email: draft.email.trim().to_string(),
            phone: or_fallback(&draft.phone, "No phone provided"),
            visa: draft
                .visa_type
                .map(|visa| visa.label().to_string())
                .unwrap_or_else(|| "Not specified".to_string()),
            arrival: format!(
                "Arrival: {}",
                or_fallback(&draft.arrival_date, "Not specified")
            ),
            university: or_fallback(&draft.university, "No university specified"),
            income,
        }
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

impl fmt::Display for ReviewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Personal Info")?;
        writeln!(f, "  {}", self.full_name)?;
        writeln!(f, "  {}", self.email)?;
        writeln!(f, "  {}", self.phone)?;
        writeln!(f, "Visa Status")?;
        writeln!(f, "  {}", self.visa)?;
        writeln!(f, "  {}", self.arrival)?;
        writeln!(f, "  {}", self.university)?;
        writeln!(f, "Income Types")?;
        write!(f, "  {}", self.income)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{IncomeType, VisaType};

    #[test]
    fn visa_label_comes_from_catalog() {
        let mut draft = FilingDraft::default();
        draft.visa_type = Some(VisaType::F1);
        assert_eq!(ReviewSummary::from_draft(&draft).visa, "F-1 Student Visa");
    }

    #[test]
    fn unset_values_render_fallbacks() {
        let summary = ReviewSummary::from_draft(&FilingDraft::default());
        assert_eq!(summary.visa, "Not specified");
        assert_eq!(summary.arrival, "Arrival: Not specified");
        assert_eq!(summary.phone, "No phone provided");
        assert_eq!(summary.university, "No university specified");
        assert_eq!(summary.income, "None selected");
    }

    #[test]
    fn income_labels_follow_catalog_order() {
        let mut draft = FilingDraft::default();
        draft.toggle_income_type(IncomeType::Stipend);
        draft.toggle_income_type(IncomeType::Wages);

        assert_eq!(
            ReviewSummary::from_draft(&draft).income,
            "Wages/Salary (W-2), Stipend/Assistantship"
        );
    }

    #[test]
    fn display_lists_every_section() {
        let mut draft = FilingDraft::default();
        draft.first_name = "Wei".to_string();
        draft.last_name = "Zhang".to_string();
        draft.arrival_date = "2023-08-15".to_string();

        let rendered = ReviewSummary::from_draft(&draft).to_string();
        assert!(rendered.contains("  Wei Zhang"));
        assert!(rendered.contains("Arrival: 2023-08-15"));
        assert!(rendered.ends_with("  None selected"));
    }
}
