//! # Stage and Staging Result
//!
//! | Stage | Numeric | Meaning |
//! |-------|---------|---------|
//! | Unknown | 0 | Input could not be matched by any rule |
//! | I | 1 | Small tumor limited to the kidney |
//! | II | 2 | Large tumor limited to the kidney |
//! | III | 3 | Venous/perinephric extension or regional nodes |
//! | IV | 4 | Beyond Gerota fascia or distant metastasis |

use super::rules::RuleId;
use serde::{Deserialize, Serialize};

// =============================================================================
// STAGE ENUM
// =============================================================================

/// Anatomic stage group.
///
/// Ordering follows severity: `Unknown < I < II < III < IV`.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Unknown,
    I,
    II,
    III,
    IV,
}

impl Stage {
    /// Numeric form, 0 for Unknown and 1..=4 for I..=IV.
    #[must_use]
    pub const fn numeric(self) -> u8 {
        match self {
            Stage::Unknown => 0,
            Stage::I => 1,
            Stage::II => 2,
            Stage::III => 3,
            Stage::IV => 4,
        }
    }

    /// Inverse of [`Stage::numeric`]; out-of-range values map to Unknown.
    #[must_use]
    pub const fn from_numeric(value: u8) -> Stage {
        match value {
            1 => Stage::I,
            2 => Stage::II,
            3 => Stage::III,
            4 => Stage::IV,
            _ => Stage::Unknown,
        }
    }

    /// Roman numeral label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Stage::Unknown => "Unknown",
            Stage::I => "I",
            Stage::II => "II",
            Stage::III => "III",
            Stage::IV => "IV",
        }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Stage::Unknown)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// STAGING RESULT
// =============================================================================

/// Outcome of a staging classification.
///
/// `stage_numeric` always agrees with `stage`, and `factors` always holds at
/// least one entry with the decisive criterion first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagingResult {
    pub stage: Stage,
    pub stage_numeric: u8,
    pub explanation: String,
    pub factors: Vec<String>,
    /// Rule-table row that produced this result.
    pub rule: RuleId,
}

impl StagingResult {
    pub(crate) fn new(
        rule: RuleId,
        stage: Stage,
        explanation: impl Into<String>,
        mut factors: Vec<String>,
    ) -> Self {
        let explanation = explanation.into();
        if factors.is_empty() {
            factors.push(explanation.clone());
        }
        Self {
            stage,
            stage_numeric: stage.numeric(),
            explanation,
            factors,
            rule,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        self.stage.is_known()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ordering() {
        assert!(Stage::Unknown < Stage::I);
        assert!(Stage::I < Stage::II);
        assert!(Stage::II < Stage::III);
        assert!(Stage::III < Stage::IV);
    }

    #[test]
    fn numeric_round_trip() {
        for stage in [Stage::Unknown, Stage::I, Stage::II, Stage::III, Stage::IV] {
            assert_eq!(Stage::from_numeric(stage.numeric()), stage);
        }
        assert_eq!(Stage::from_numeric(9), Stage::Unknown);
    }

    #[test]
    fn stage_display() {
        assert_eq!(format!("{}", Stage::III), "III");
        assert_eq!(format!("{}", Stage::Unknown), "Unknown");
    }

    #[test]
    fn result_never_has_empty_factors() {
        let result = StagingResult::new(RuleId::Unclassified, Stage::Unknown, "why", Vec::new());
        assert_eq!(result.factors, vec!["why".to_string()]);
        assert_eq!(result.stage_numeric, 0);
    }
}
