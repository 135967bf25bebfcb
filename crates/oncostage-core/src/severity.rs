//! Severity classification of a stage, used to tint presentation.

use crate::staging::{Stage, StagingResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation severity of a staging result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Stage unknown.
    Muted,
    Success,
    Info,
    Warning,
    Destructive,
}

impl Severity {
    /// Map a numeric stage (1-4) to a severity. Anything else is muted.
    #[must_use]
    pub const fn from_stage_numeric(stage_numeric: u8) -> Self {
        match stage_numeric {
            1 => Self::Success,
            2 => Self::Info,
            3 => Self::Warning,
            4 => Self::Destructive,
            _ => Self::Muted,
        }
    }

    #[must_use]
    pub const fn from_stage(stage: Stage) -> Self {
        Self::from_stage_numeric(stage.numeric())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Muted => "muted",
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Destructive => "destructive",
        }
    }
}

impl From<&StagingResult> for Severity {
    fn from(result: &StagingResult) -> Self {
        Self::from_stage_numeric(result.stage_numeric)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_mapping() {
        assert_eq!(Severity::from_stage_numeric(0), Severity::Muted);
        assert_eq!(Severity::from_stage_numeric(1), Severity::Success);
        assert_eq!(Severity::from_stage_numeric(2), Severity::Info);
        assert_eq!(Severity::from_stage_numeric(3), Severity::Warning);
        assert_eq!(Severity::from_stage_numeric(4), Severity::Destructive);
        assert_eq!(Severity::from_stage_numeric(200), Severity::Muted);
    }

    #[test]
    fn agrees_with_stage() {
        assert_eq!(Severity::from_stage(Stage::Unknown), Severity::Muted);
        assert_eq!(Severity::from_stage(Stage::IV), Severity::Destructive);
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
