/// Step in the filing wizard. A strictly linear sequence: forward and
/// back transitions only, terminal at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStep {
    #[default]
    Personal,
    Income,
    Deductions,
    Review,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::Personal,
        FormStep::Income,
        FormStep::Deductions,
        FormStep::Review,
    ];

    /// 1-based position in the sequence
    pub fn number(&self) -> u8 {
        match self {
            FormStep::Personal => 1,
            FormStep::Income => 2,
            FormStep::Deductions => 3,
            FormStep::Review => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormStep::Personal => "Personal Info",
            FormStep::Income => "Income",
            FormStep::Deductions => "Deductions",
            FormStep::Review => "Review",
        }
    }

    /// Next step, None at the end of the sequence
    pub fn next(&self) -> Option<FormStep> {
        match self {
            FormStep::Personal => Some(FormStep::Income),
            FormStep::Income => Some(FormStep::Deductions),
            FormStep::Deductions => Some(FormStep::Review),
            FormStep::Review => None,
        }
    }

    /// Previous step, None at the start of the sequence
    pub fn back(&self) -> Option<FormStep> {
        match self {
            FormStep::Personal => None,
            FormStep::Income => Some(FormStep::Personal),
            FormStep::Deductions => Some(FormStep::Income),
            FormStep::Review => Some(FormStep::Deductions),
        }
    }
}

impl std::fmt::Display for FormStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
