use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::{IncomeType, VisaType};
use crate::notification::FilingNotification;

/// Free-text inputs of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    FirstName,
    LastName,
    Email,
    Phone,
    ArrivalDate,
    University,
}

impl DraftField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::ArrivalDate => "Date of Arrival in US",
            Self::University => "University/Institution",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the filer has entered so far.
///
/// `selected_income_types` can only hold catalog entries, and iterates in
/// catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub visa_type: Option<VisaType>,
    pub arrival_date: String,
    pub university: String,
    pub selected_income_types: BTreeSet<IncomeType>,
    pub agreed_to_terms: bool,
}

impl FilingDraft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::FirstName => &self.first_name,
            DraftField::LastName => &self.last_name,
            DraftField::Email => &self.email,
            DraftField::Phone => &self.phone,
            DraftField::ArrivalDate => &self.arrival_date,
            DraftField::University => &self.university,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::FirstName => &mut self.first_name,
            DraftField::LastName => &mut self.last_name,
            DraftField::Email => &mut self.email,
            DraftField::Phone => &mut self.phone,
            DraftField::ArrivalDate => &mut self.arrival_date,
            DraftField::University => &mut self.university,
        };
        *slot = value.into();
    }

    /// Flip membership of an income type. Returns whether it is now selected.
    pub fn toggle_income_type(&mut self, income: IncomeType) -> bool {
        if self.selected_income_types.remove(&income) {
            false
        } else {
            self.selected_income_types.insert(income);
            true
        }
    }

    pub fn has_scholarship(&self) -> bool {
        self.selected_income_types
            .contains(&IncomeType::Scholarship)
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Wire form sent to the relay. Blank optional inputs become absent.
    pub fn to_notification(&self) -> FilingNotification {
        FilingNotification {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            visa_type: self
                .visa_type
                .map(|visa| visa.code().to_string())
                .unwrap_or_default(),
            arrival_date: optional(&self.arrival_date),
            university: optional(&self.university),
            income_types: self
                .selected_income_types
                .iter()
                .map(|income| income.code().to_string())
                .collect(),
            has_scholarship: self.has_scholarship(),
            additional_notes: None,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_selection() {
        let mut draft = FilingDraft::default();
        draft.toggle_income_type(IncomeType::Wages);
        let before = draft.selected_income_types.clone();

        for income in IncomeType::ordered() {
            assert_eq!(draft.toggle_income_type(income), !before.contains(&income));
            draft.toggle_income_type(income);
            assert_eq!(draft.selected_income_types, before);
        }
    }

    #[test]
    fn set_field_overwrites_only_the_named_field() {
        let mut draft = FilingDraft::default();
        draft.set_field(DraftField::FirstName, "Priya");
        draft.set_field(DraftField::FirstName, "Priyanka");
        draft.set_field(DraftField::University, "MIT");

        assert_eq!(draft.field(DraftField::FirstName), "Priyanka");
        assert_eq!(draft.field(DraftField::University), "MIT");
        assert_eq!(draft.field(DraftField::LastName), "");
    }

    #[test]
    fn notification_lists_income_in_catalog_order_and_derives_scholarship() {
        let mut draft = FilingDraft::default();
        draft.toggle_income_type(IncomeType::Stipend);
        draft.toggle_income_type(IncomeType::Scholarship);
        draft.toggle_income_type(IncomeType::Wages);

        let notification = draft.to_notification();
        assert_eq!(
            notification.income_types,
            vec!["wages", "scholarship", "stipend"]
        );
        assert!(notification.has_scholarship);

        draft.toggle_income_type(IncomeType::Scholarship);
        assert!(!draft.to_notification().has_scholarship);
    }

    #[test]
    fn notification_drops_blank_optionals() {
        let mut draft = FilingDraft::default();
        draft.set_field(DraftField::FirstName, " Wei ");
        draft.set_field(DraftField::Phone, "   ");
        draft.set_field(DraftField::University, "Columbia University");
        draft.visa_type = Some(VisaType::J1);

        let notification = draft.to_notification();
        assert_eq!(notification.first_name, "Wei");
        assert_eq!(notification.phone, None);
        assert_eq!(notification.arrival_date, None);
        assert_eq!(notification.university.as_deref(), Some("Columbia University"));
        assert_eq!(notification.visa_type, "j1");
    }

    #[test]
    fn default_draft_is_empty() {
        let mut draft = FilingDraft::default();
        assert!(draft.is_empty());
        draft.agreed_to_terms = true;
        assert!(!draft.is_empty());
    }
}
