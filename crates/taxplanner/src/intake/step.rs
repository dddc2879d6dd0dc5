/// Visible page of the intake form. Positions run 1..=4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormStep {
    #[default]
    PersonalInfo,
    VisaStatus,
    IncomeDetails,
    Review,
}

impl FormStep {
    pub const FIRST: Self = Self::PersonalInfo;
    pub const LAST: Self = Self::Review;

    pub const fn ordered() -> [Self; 4] {
        [
            Self::PersonalInfo,
            Self::VisaStatus,
            Self::IncomeDetails,
            Self::Review,
        ]
    }

    pub const fn position(self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::VisaStatus => 2,
            Self::IncomeDetails => 3,
            Self::Review => 4,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Info",
            Self::VisaStatus => "Visa Status",
            Self::IncomeDetails => "Income Details",
            Self::Review => "Review",
        }
    }

    /// Following step, saturating at `Review`.
    pub const fn next(self) -> Self {
        match self {
            Self::PersonalInfo => Self::VisaStatus,
            Self::VisaStatus => Self::IncomeDetails,
            Self::IncomeDetails | Self::Review => Self::Review,
        }
    }

    /// Preceding step, saturating at `PersonalInfo`.
    pub const fn previous(self) -> Self {
        match self {
            Self::PersonalInfo | Self::VisaStatus => Self::PersonalInfo,
            Self::IncomeDetails => Self::VisaStatus,
            Self::Review => Self::IncomeDetails,
        }
    }
}
