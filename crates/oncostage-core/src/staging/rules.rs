//! # Rule Tables
//!
//! Staging is a fixed-priority cascade: rows are evaluated top-down and the
//! first matching row decides the stage. The order is data, not control
//! flow, so it can be listed, asserted in tests and reported in results.
//!
//! Two tables exist:
//! - [`RCC_TABLE`]: AJCC 8th edition anatomic stage groups for renal cell
//!   carcinoma, shared by the clinical and pathological paths.
//! - [`WILMS_TABLE`]: SIOP-RTSG local stage for post-operative Wilms tumor.
//!
//! A row only inspects [`RuleInput`]; pathology flags that do not appear in
//! the input can never move the stage.

use super::stage::Stage;
use crate::types::{MCategory, NCategory, TCategory};
use serde::{Deserialize, Serialize};

// =============================================================================
// RULE IDENTIFIERS
// =============================================================================

/// Rows of the renal cell carcinoma table, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RccRule {
    /// Any T, any N, M1.
    DistantMetastasis,
    /// T4, any N, M0.
    BeyondGerotaFascia,
    /// Any T, N1, M0.
    RegionalNodes,
    /// T3, N0, M0.
    MajorVeinExtension,
    /// T2, N0, M0.
    LargeLocalized,
    /// T1, N0, M0.
    SmallLocalized,
}

/// Rows of the Wilms tumor table, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WilmsRule {
    /// Haematogenous metastasis (pM1).
    Metastasis,
    /// Abdominal lymph node involvement (pN1).
    NodeInvolvement,
    /// Pre- or intra-operative tumor rupture.
    Rupture,
    /// Tumor present at the resection margin.
    IncompleteResection,
    /// Extends beyond the kidney, completely resected.
    BeyondKidney,
    /// Limited to the kidney, completely resected.
    LimitedToKidney,
}

/// The rule that produced a [`StagingResult`](super::StagingResult).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleId {
    Rcc(RccRule),
    Wilms(WilmsRule),
    /// No row matched.
    Unclassified,
}

// =============================================================================
// RULE INPUT
// =============================================================================

/// Typed view of a staging input.
///
/// `None` on an axis means the raw code was not recognised. Absent pM has
/// already been defaulted to M0 by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleInput {
    pub t: Option<TCategory>,
    pub n: Option<NCategory>,
    pub m: Option<MCategory>,
    pub margin_positive: bool,
    pub ruptured: bool,
}

impl RuleInput {
    /// Build from typed axes with no pathology flags.
    #[must_use]
    pub fn tnm(t: Option<TCategory>, n: Option<NCategory>, m: Option<MCategory>) -> Self {
        Self {
            t,
            n,
            m,
            ..Self::default()
        }
    }

    fn m0(&self) -> bool {
        self.m == Some(MCategory::M0)
    }

    fn n0_m0(&self) -> bool {
        self.n == Some(NCategory::N0) && self.m0()
    }

    fn t_is(&self, family: fn(TCategory) -> bool) -> bool {
        self.t.is_some_and(family)
    }
}

// =============================================================================
// RULES & TABLES
// =============================================================================

/// One row: identifier, resulting stage, predicate.
pub struct Rule<R: 'static> {
    pub id: R,
    pub stage: Stage,
    predicate: fn(&RuleInput) -> bool,
}

impl<R> Rule<R> {
    #[must_use]
    pub fn matches(&self, input: &RuleInput) -> bool {
        (self.predicate)(input)
    }
}

/// An ordered rule table. First match wins.
pub struct RuleTable<R: 'static> {
    pub name: &'static str,
    rules: &'static [Rule<R>],
}

impl<R: Copy> RuleTable<R> {
    /// First row whose predicate holds, or `None` for the fallback.
    #[must_use]
    pub fn first_match(&self, input: &RuleInput) -> Option<&'static Rule<R>> {
        self.rules.iter().find(|rule| rule.matches(input))
    }

    /// Rows in priority order.
    #[must_use]
    pub fn rules(&self) -> &'static [Rule<R>] {
        self.rules
    }

    /// Row identifiers in priority order.
    #[must_use]
    pub fn ids(&self) -> Vec<R> {
        self.rules.iter().map(|rule| rule.id).collect()
    }
}

static RCC_RULES: [Rule<RccRule>; 6] = [
    Rule {
        id: RccRule::DistantMetastasis,
        stage: Stage::IV,
        predicate: |i| i.m == Some(MCategory::M1),
    },
    Rule {
        id: RccRule::BeyondGerotaFascia,
        stage: Stage::IV,
        predicate: |i| i.t == Some(TCategory::T4) && i.m0(),
    },
    Rule {
        id: RccRule::RegionalNodes,
        stage: Stage::III,
        predicate: |i| i.n == Some(NCategory::N1) && i.m0(),
    },
    Rule {
        id: RccRule::MajorVeinExtension,
        stage: Stage::III,
        predicate: |i| i.t_is(TCategory::is_t3) && i.n0_m0(),
    },
    Rule {
        id: RccRule::LargeLocalized,
        stage: Stage::II,
        predicate: |i| i.t_is(TCategory::is_t2) && i.n0_m0(),
    },
    Rule {
        id: RccRule::SmallLocalized,
        stage: Stage::I,
        predicate: |i| i.t_is(TCategory::is_t1) && i.n0_m0(),
    },
];

/// AJCC 8th edition renal cell carcinoma stage groups.
pub static RCC_TABLE: RuleTable<RccRule> = RuleTable {
    name: "AJCC 8th edition - renal cell carcinoma",
    rules: &RCC_RULES,
};

static WILMS_RULES: [Rule<WilmsRule>; 6] = [
    Rule {
        id: WilmsRule::Metastasis,
        stage: Stage::IV,
        predicate: |i| i.m == Some(MCategory::M1),
    },
    Rule {
        id: WilmsRule::NodeInvolvement,
        stage: Stage::III,
        predicate: |i| i.n == Some(NCategory::N1) && i.m0(),
    },
    Rule {
        id: WilmsRule::Rupture,
        stage: Stage::III,
        predicate: |i| i.ruptured && i.m0(),
    },
    Rule {
        id: WilmsRule::IncompleteResection,
        stage: Stage::III,
        predicate: |i| i.margin_positive && i.m0(),
    },
    Rule {
        id: WilmsRule::BeyondKidney,
        stage: Stage::II,
        predicate: |i| {
            (i.t_is(TCategory::is_t3) || i.t == Some(TCategory::T4)) && i.n0_m0()
        },
    },
    Rule {
        id: WilmsRule::LimitedToKidney,
        stage: Stage::I,
        predicate: |i| i.t_is(TCategory::is_organ_confined) && i.n0_m0(),
    },
];

/// SIOP-RTSG post-operative local stage for Wilms tumor.
pub static WILMS_TABLE: RuleTable<WilmsRule> = RuleTable {
    name: "SIOP-RTSG 2016 - Wilms tumor local stage",
    rules: &WILMS_RULES,
};

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(t: TCategory, n: NCategory, m: MCategory) -> RuleInput {
        RuleInput::tnm(Some(t), Some(n), Some(m))
    }

    #[test]
    fn rcc_priority_order() {
        assert_eq!(
            RCC_TABLE.ids(),
            vec![
                RccRule::DistantMetastasis,
                RccRule::BeyondGerotaFascia,
                RccRule::RegionalNodes,
                RccRule::MajorVeinExtension,
                RccRule::LargeLocalized,
                RccRule::SmallLocalized,
            ]
        );
    }

    #[test]
    fn wilms_priority_order() {
        assert_eq!(
            WILMS_TABLE.ids(),
            vec![
                WilmsRule::Metastasis,
                WilmsRule::NodeInvolvement,
                WilmsRule::Rupture,
                WilmsRule::IncompleteResection,
                WilmsRule::BeyondKidney,
                WilmsRule::LimitedToKidney,
            ]
        );
    }

    #[test]
    fn t4_n1_hits_gerota_row_before_nodes() {
        let rule = RCC_TABLE.first_match(&input(TCategory::T4, NCategory::N1, MCategory::M0));
        assert_eq!(rule.map(|r| r.id), Some(RccRule::BeyondGerotaFascia));
    }

    #[test]
    fn m1_with_unrecognised_t_still_matches() {
        let rule = RCC_TABLE.first_match(&RuleInput::tnm(None, Some(NCategory::N0), Some(MCategory::M1)));
        assert_eq!(rule.map(|r| r.stage), Some(Stage::IV));
    }

    #[test]
    fn tx_falls_through() {
        let rule = RCC_TABLE.first_match(&input(TCategory::Tx, NCategory::N0, MCategory::M0));
        assert!(rule.is_none());
    }

    #[test]
    fn mx_blocks_every_row_but_none_fire() {
        let rule = RCC_TABLE.first_match(&input(TCategory::T1a, NCategory::N0, MCategory::Mx));
        assert!(rule.is_none());
    }

    #[test]
    fn wilms_rupture_outranks_extent() {
        let mut i = input(TCategory::T1a, NCategory::N0, MCategory::M0);
        i.ruptured = true;
        let rule = WILMS_TABLE.first_match(&i);
        assert_eq!(rule.map(|r| r.id), Some(WilmsRule::Rupture));
    }
}
