use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visa categories offered by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisaType {
    F1,
    J1,
    M1,
    H1b,
    Other,
}

impl VisaType {
    pub const fn ordered() -> [Self; 5] {
        [Self::F1, Self::J1, Self::M1, Self::H1b, Self::Other]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::F1 => "f1",
            Self::J1 => "j1",
            Self::M1 => "m1",
            Self::H1b => "h1b",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::F1 => "F-1 Student Visa",
            Self::J1 => "J-1 Exchange Visitor",
            Self::M1 => "M-1 Vocational Student",
            Self::H1b => "H-1B Work Visa",
            Self::Other => "Other",
        }
    }
}

impl FromStr for VisaType {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Self::ordered()
            .into_iter()
            .find(|visa| visa.code().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CatalogError::UnknownVisaType(value.to_string()))
    }
}

impl fmt::Display for VisaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Income sources a filer can declare. Declaration order is catalog order,
/// which is also the `Ord` used when the selection is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeType {
    Wages,
    Scholarship,
    Freelance,
    Stipend,
    Interest,
    Other,
}

impl IncomeType {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Wages,
            Self::Scholarship,
            Self::Freelance,
            Self::Stipend,
            Self::Interest,
            Self::Other,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Wages => "wages",
            Self::Scholarship => "scholarship",
            Self::Freelance => "freelance",
            Self::Stipend => "stipend",
            Self::Interest => "interest",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Wages => "Wages/Salary (W-2)",
            Self::Scholarship => "Scholarship/Fellowship (1042-S)",
            Self::Freelance => "Freelance/Self-Employment (1099)",
            Self::Stipend => "Stipend/Assistantship",
            Self::Interest => "Bank Interest",
            Self::Other => "Other Income",
        }
    }
}

impl FromStr for IncomeType {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Self::ordered()
            .into_iter()
            .find(|income| income.code().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CatalogError::UnknownIncomeType(value.to_string()))
    }
}

impl fmt::Display for IncomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown visa type '{0}'")]
    UnknownVisaType(String),
    #[error("unknown income type '{0}'")]
    UnknownIncomeType(String),
}

/// Label for a visa code as sent over the wire, falling back to the raw code.
pub fn visa_label_for_code(code: &str) -> String {
    code.parse::<VisaType>()
        .map(|visa| visa.label().to_string())
        .unwrap_or_else(|_| code.to_string())
}

/// Label for an income code as sent over the wire, falling back to the raw code.
pub fn income_label_for_code(code: &str) -> String {
    code.parse::<IncomeType>()
        .map(|income| income.label().to_string())
        .unwrap_or_else(|_| code.to_string())
}
