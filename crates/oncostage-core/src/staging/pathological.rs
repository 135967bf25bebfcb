//! Pathological (post-operative) staging from pTNM.
//!
//! Uses the same renal cell carcinoma table as the clinical path on the
//! p-stripped codes. Pathology attributes are reported as factors after the
//! stage-defining ones; they never change the stage.

use super::clinical::{t1_factor, t2_factor};
use super::rules::{RCC_TABLE, RccRule, RuleId, RuleInput};
use super::stage::{Stage, StagingResult};
use crate::types::{MCategory, NCategory, PathologyData, PostOpTnmData, TCategory};

/// Classify a pathological pTNM with optional pathology attributes.
///
/// Returns `None` when pT or pN is missing. A missing pM is read as pM0.
#[must_use]
pub fn classify_pathological(
    post_op: &PostOpTnmData,
    pathology: Option<&PathologyData>,
) -> Option<StagingResult> {
    let p_t = post_op.p_t.as_deref()?;
    let p_n = post_op.p_n.as_deref()?;
    let p_m = post_op.p_m.as_deref();

    let input = RuleInput::tnm(
        TCategory::parse_pathological(p_t),
        NCategory::parse_pathological(p_n),
        p_m.map_or(Some(MCategory::M0), MCategory::parse_pathological),
    );
    let pathology_factors = pathology.map(pathology_factors).unwrap_or_default();

    let Some(rule) = RCC_TABLE.first_match(&input) else {
        let mut factors = vec![
            format!("pT: {p_t}"),
            format!("pN: {p_n}"),
            format!("pM: {}", p_m.unwrap_or("Not specified")),
        ];
        factors.extend(pathology_factors);
        return Some(StagingResult::new(
            RuleId::Unclassified,
            Stage::Unknown,
            "Unable to determine pathological stage",
            factors,
        ));
    };

    let (explanation, mut factors) = match rule.id {
        RccRule::DistantMetastasis => (
            "Stage IV (Pathological) due to distant metastasis (pM1)".to_string(),
            vec![
                "Distant metastasis confirmed pathologically".to_string(),
                format!("Primary tumor: {p_t}"),
                format!("Lymph nodes: {p_n}"),
            ],
        ),
        RccRule::BeyondGerotaFascia => (
            "Stage IV (Pathological) due to tumor beyond Gerota fascia (pT4)".to_string(),
            vec![
                "Tumor extends beyond Gerota fascia".to_string(),
                format!("Lymph nodes: {p_n}"),
            ],
        ),
        RccRule::RegionalNodes => (
            "Stage III (Pathological) due to lymph node metastasis (pN1)".to_string(),
            vec![
                "Regional lymph node metastasis confirmed".to_string(),
                format!("Primary tumor: {p_t}"),
            ],
        ),
        RccRule::MajorVeinExtension => (
            format!("Stage III (Pathological) - {p_t}"),
            vec![
                pt3_factor(input.t).to_string(),
                "No lymph node metastasis".to_string(),
                "No distant metastasis".to_string(),
            ],
        ),
        RccRule::LargeLocalized => (
            format!("Stage II (Pathological) - Large tumor >7cm ({p_t})"),
            vec![
                t2_factor(input.t).to_string(),
                "Tumor limited to kidney".to_string(),
                "No lymph node metastasis".to_string(),
            ],
        ),
        RccRule::SmallLocalized => (
            format!("Stage I (Pathological) - Small tumor ≤7cm ({p_t})"),
            vec![
                t1_factor(input.t).to_string(),
                "Tumor limited to kidney".to_string(),
                "No lymph node metastasis".to_string(),
            ],
        ),
    };
    factors.extend(pathology_factors);

    Some(StagingResult::new(RuleId::Rcc(rule.id), rule.stage, explanation, factors))
}

fn pt3_factor(t: Option<TCategory>) -> &'static str {
    match t {
        Some(TCategory::T3a) => "Tumor in renal vein or perinephric fat (pT3a)",
        Some(TCategory::T3b) => "Tumor in vena cava below diaphragm (pT3b)",
        Some(TCategory::T3c) => "Tumor in vena cava above diaphragm (pT3c)",
        _ => "Tumor in major veins or perinephric tissues (pT3)",
    }
}

/// Explanatory factors contributed by the pathology report, in report order.
pub(crate) fn pathology_factors(pathology: &PathologyData) -> Vec<String> {
    let mut factors = Vec::new();
    if let Some(histology) = pathology.histology {
        factors.push(format!("Histology: {}", histology.name()));
    }
    if let Some(grade) = pathology.grade {
        factors.push(format!("Grade: {grade} (ISUP/WHO)"));
    }
    if let Some(size) = pathology.tumor_size_mm {
        factors.push(format!("Measured tumor size: {size} mm"));
    }
    if pathology.has_positive_margin() {
        factors.push("⚠️ Positive surgical margins".to_string());
    }
    if pathology.vascular_invasion {
        factors.push("⚠️ Vascular invasion present".to_string());
    }
    if pathology.lymph_node_invasion {
        factors.push("⚠️ Lymphovascular invasion".to_string());
    }
    if pathology.sarcomatoid_features {
        factors.push("⚠️ Sarcomatoid features present".to_string());
    }
    if pathology.necrosis {
        factors.push("Tumor necrosis present".to_string());
    }
    factors
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Grade, Histology, MarginStatus};

    fn flagged_pathology() -> PathologyData {
        PathologyData {
            histology: Some(Histology::ClearCell),
            grade: Grade::new(4).ok(),
            margin_status: Some(MarginStatus::Positive),
            vascular_invasion: true,
            lymph_node_invasion: true,
            sarcomatoid_features: true,
            necrosis: true,
            ..PathologyData::default()
        }
    }

    #[test]
    fn absent_pm_defaults_to_m0() {
        let result = classify_pathological(&PostOpTnmData::new("pT1a", "pN0"), None)
            .expect("complete");
        assert_eq!(result.stage, Stage::I);
        assert_eq!(result.rule, RuleId::Rcc(RccRule::SmallLocalized));
    }

    #[test]
    fn pathology_never_moves_the_stage() {
        let tnm = PostOpTnmData::new("pT1a", "pN0");
        let plain = classify_pathological(&tnm, None).expect("plain");
        let flagged = classify_pathological(&tnm, Some(&flagged_pathology())).expect("flagged");
        assert_eq!(plain.stage, flagged.stage);
        assert_eq!(plain.explanation, flagged.explanation);
        assert!(flagged.factors.len() > plain.factors.len());
        assert_eq!(plain.factors[0], flagged.factors[0]);
    }

    #[test]
    fn pathology_factor_order() {
        let factors = pathology_factors(&flagged_pathology());
        assert_eq!(factors[0], "Histology: Clear cell RCC");
        assert_eq!(factors[1], "Grade: 4/4 (ISUP/WHO)");
        assert_eq!(factors[2], "⚠️ Positive surgical margins");
        assert_eq!(factors.last().map(String::as_str), Some("Tumor necrosis present"));
    }

    #[test]
    fn pm1_is_stage_iv() {
        let tnm = PostOpTnmData::new("pT1b", "pN0").with_p_m("pM1");
        let result = classify_pathological(&tnm, None).expect("complete");
        assert_eq!(result.stage, Stage::IV);
    }

    #[test]
    fn pmx_is_unknown() {
        let tnm = PostOpTnmData::new("pT2a", "pN0").with_p_m("pMX");
        let result = classify_pathological(&tnm, None).expect("complete");
        assert_eq!(result.stage, Stage::Unknown);
        assert_eq!(result.factors[2], "pM: pMX");
    }

    #[test]
    fn unknown_lists_unspecified_pm() {
        let result = classify_pathological(&PostOpTnmData::new("pTX", "pN0"), None)
            .expect("complete");
        assert_eq!(result.stage, Stage::Unknown);
        assert_eq!(
            result.factors,
            vec!["pT: pTX", "pN: pN0", "pM: Not specified"]
        );
    }

    #[test]
    fn missing_pt_or_pn_is_none() {
        let missing_n = PostOpTnmData {
            p_t: Some("pT1a".into()),
            ..PostOpTnmData::default()
        };
        assert!(classify_pathological(&missing_n, None).is_none());
    }
}
