//! Post-operative staging for pediatric Wilms tumor (nephroblastoma).
//!
//! Local stage follows the SIOP-RTSG convention after pre-operative
//! chemotherapy: extent of resection, rupture and nodal status drive the
//! stage, not tumor size. The histologic risk group is reported alongside
//! the stage because it selects the post-operative regimen.
//!
//! Bilateral disease (SIOP stage V) has no slot in the I–IV scale; it is
//! reported as a factor and each side keeps its own local stage.

use super::pathological::pathology_factors;
use super::rules::{RuleId, RuleInput, WILMS_TABLE, WilmsRule};
use super::stage::{Stage, StagingResult};
use crate::types::{MCategory, NCategory, PathologyData, PostOpTnmData, TCategory};

/// Classify a Wilms tumor from pTNM-equivalent codes and pathology.
///
/// Returns `None` when pT or pN is missing. A missing pM is read as pM0.
#[must_use]
pub fn classify_wilms(
    post_op: &PostOpTnmData,
    pathology: Option<&PathologyData>,
) -> Option<StagingResult> {
    let p_t = post_op.p_t.as_deref()?;
    let p_n = post_op.p_n.as_deref()?;
    let p_m = post_op.p_m.as_deref();

    let input = RuleInput {
        t: TCategory::parse_pathological(p_t),
        n: NCategory::parse_pathological(p_n),
        m: p_m.map_or(Some(MCategory::M0), MCategory::parse_pathological),
        margin_positive: pathology.is_some_and(PathologyData::has_positive_margin),
        ruptured: pathology.is_some_and(|p| p.is_ruptured),
    };

    let Some(rule) = WILMS_TABLE.first_match(&input) else {
        let mut factors = vec![
            format!("pT: {p_t}"),
            format!("pN: {p_n}"),
            format!("pM: {}", p_m.unwrap_or("Not specified")),
        ];
        factors.extend(pathology.map(wilms_factors).unwrap_or_default());
        return Some(StagingResult::new(
            RuleId::Unclassified,
            Stage::Unknown,
            "Unable to determine SIOP stage",
            factors,
        ));
    };

    let (explanation, mut factors): (&str, Vec<String>) = match rule.id {
        WilmsRule::Metastasis => (
            "Stage IV (SIOP) due to haematogenous metastasis",
            vec![
                "Distant (lung, liver, bone or brain) metastasis".to_string(),
                format!("Lymph nodes: {p_n}"),
            ],
        ),
        WilmsRule::NodeInvolvement => (
            "Stage III (SIOP) due to abdominal lymph node involvement",
            vec![
                "Abdominal lymph node metastasis confirmed".to_string(),
                format!("Primary tumor: {p_t}"),
            ],
        ),
        WilmsRule::Rupture => (
            "Stage III (SIOP) due to tumor rupture",
            vec![
                "⚠️ Pre- or intra-operative tumor rupture".to_string(),
                format!("Primary tumor: {p_t}"),
            ],
        ),
        WilmsRule::IncompleteResection => (
            "Stage III (SIOP) due to incomplete resection",
            vec![
                "⚠️ Tumor present at resection margin".to_string(),
                format!("Primary tumor: {p_t}"),
            ],
        ),
        WilmsRule::BeyondKidney => (
            "Stage II (SIOP): tumor beyond the kidney, completely resected",
            vec![
                "Tumor extends beyond the kidney or into vessels".to_string(),
                "Complete resection, margins clear".to_string(),
                "No lymph node metastasis".to_string(),
            ],
        ),
        WilmsRule::LimitedToKidney => (
            "Stage I (SIOP): tumor limited to the kidney, completely resected",
            vec![
                "Tumor limited to kidney".to_string(),
                "Complete resection, margins clear".to_string(),
                "No lymph node metastasis".to_string(),
            ],
        ),
    };
    factors.extend(pathology.map(wilms_factors).unwrap_or_default());

    Some(StagingResult::new(RuleId::Wilms(rule.id), rule.stage, explanation, factors))
}

fn wilms_factors(pathology: &PathologyData) -> Vec<String> {
    let mut factors = pathology_factors(pathology);
    if let Some(risk) = pathology.wilms_risk() {
        factors.push(format!("Histologic risk group: {} (SIOP-RTSG)", risk.name()));
    }
    if let Some(subtype) = pathology.wilms_type {
        factors.push(format!("Histologic subtype: {}", subtype.name()));
    }
    if pathology.is_bilateral {
        factors.push(
            "Bilateral disease (SIOP stage V): each kidney staged separately".to_string(),
        );
    }
    factors
}

// =============================================================================
// TESTS
// =============================================================================
