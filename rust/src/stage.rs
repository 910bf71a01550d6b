use std::fmt;

/// Progress of one generator invocation.
///
/// `Idle → HeaderMatched → BodyValidated → PrimaryEdited → SecondaryLocated
/// → SecondaryEdited → Persisted`. A failure before `PrimaryEdited` ends in
/// `Aborted` with both files untouched; a failure after it leaves the
/// primary buffer edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    HeaderMatched,
    BodyValidated,
    PrimaryEdited,
    SecondaryLocated,
    SecondaryEdited,
    Persisted,
    Aborted,
}

impl Stage {
    /// Whether the primary buffer has been modified once this stage is reached.
    pub fn primary_edited(self) -> bool {
        matches!(
            self,
            Self::PrimaryEdited | Self::SecondaryLocated | Self::SecondaryEdited | Self::Persisted
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::HeaderMatched => "header-matched",
            Self::BodyValidated => "body-validated",
            Self::PrimaryEdited => "primary-edited",
            Self::SecondaryLocated => "secondary-located",
            Self::SecondaryEdited => "secondary-edited",
            Self::Persisted => "persisted",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}
