//! Clinical (pre-operative) staging from cTNM.

use super::rules::{RCC_TABLE, RccRule, RuleId, RuleInput};
use super::stage::{Stage, StagingResult};
use crate::types::{MCategory, NCategory, TCategory, TnmData};

/// Classify a clinical TNM triple against the renal cell carcinoma table.
///
/// Returns `None` when any of T, N or M is missing; the caller must treat
/// that as "incomplete, cannot stage". Unrecognised or unmatched codes give
/// a `Stage::Unknown` result listing the raw codes.
#[must_use]
pub fn classify_clinical(tnm: &TnmData) -> Option<StagingResult> {
    let t = tnm.t.as_deref()?;
    let n = tnm.n.as_deref()?;
    let m = tnm.m.as_deref()?;

    let input = RuleInput::tnm(TCategory::parse(t), NCategory::parse(n), MCategory::parse(m));

    let Some(rule) = RCC_TABLE.first_match(&input) else {
        return Some(StagingResult::new(
            RuleId::Unclassified,
            Stage::Unknown,
            "Unable to determine stage with provided TNM values",
            vec![
                format!("T: {t}"),
                format!("N: {n}"),
                format!("M: {m}"),
                "Please verify TNM classification".to_string(),
            ],
        ));
    };

    let t_label = input.t.map_or_else(|| t.to_string(), |c| c.code().to_string());

    let (explanation, factors) = match rule.id {
        RccRule::DistantMetastasis => (
            "Stage IV due to presence of distant metastasis (M1)".to_string(),
            vec![
                "Distant metastasis present",
                "Regardless of primary tumor size",
                "Regardless of lymph node involvement",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        ),
        RccRule::BeyondGerotaFascia => (
            "Stage IV due to tumor invasion beyond Gerota fascia (T4)".to_string(),
            vec![
                "Tumor extends beyond Gerota fascia",
                "May involve adjacent organs",
                "Ipsilateral adrenal gland involvement via contiguous extension",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        ),
        RccRule::RegionalNodes => (
            "Stage III due to regional lymph node metastasis (N1)".to_string(),
            vec![
                "Regional lymph node metastasis present".to_string(),
                "No distant metastasis".to_string(),
                format!("Primary tumor classification: {t_label}"),
            ],
        ),
        RccRule::MajorVeinExtension => (
            format!("Stage III due to tumor extension beyond kidney ({t_label})"),
            vec![
                t3_factor(input.t).to_string(),
                "No regional lymph node metastasis".to_string(),
                "No distant metastasis".to_string(),
            ],
        ),
        RccRule::LargeLocalized => (
            format!("Stage II: Large tumor (>7 cm) limited to kidney ({t_label})"),
            vec![
                t2_factor(input.t).to_string(),
                "Tumor limited to kidney".to_string(),
                "No regional lymph node metastasis".to_string(),
                "No distant metastasis".to_string(),
            ],
        ),
        RccRule::SmallLocalized => (
            format!("Stage I: Small tumor (≤7 cm) limited to kidney ({t_label})"),
            vec![
                t1_factor(input.t).to_string(),
                "Tumor limited to kidney".to_string(),
                "No regional lymph node metastasis".to_string(),
                "No distant metastasis".to_string(),
            ],
        ),
    };

    Some(StagingResult::new(RuleId::Rcc(rule.id), rule.stage, explanation, factors))
}

/// Size/extent factor for the T1 family.
pub(crate) fn t1_factor(t: Option<TCategory>) -> &'static str {
    match t {
        Some(TCategory::T1a) => "Tumor ≤4 cm",
        Some(TCategory::T1b) => "Tumor >4 cm and ≤7 cm",
        _ => "Tumor ≤7 cm",
    }
}

/// Size/extent factor for the T2 family.
pub(crate) fn t2_factor(t: Option<TCategory>) -> &'static str {
    match t {
        Some(TCategory::T2a) => "Tumor >7 cm and ≤10 cm",
        Some(TCategory::T2b) => "Tumor >10 cm",
        _ => "Tumor >7 cm",
    }
}

fn t3_factor(t: Option<TCategory>) -> &'static str {
    match t {
        Some(TCategory::T3a) => "Tumor extends into renal vein or perinephric fat",
        Some(TCategory::T3b) => "Tumor extends into vena cava below diaphragm",
        Some(TCategory::T3c) => {
            "Tumor extends into vena cava above diaphragm or invades vena cava wall"
        }
        _ => "Tumor extends into major veins or perinephric tissues",
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_of(t: &str, n: &str, m: &str) -> Stage {
        classify_clinical(&TnmData::new(t, n, m))
            .map(|r| r.stage)
            .unwrap_or(Stage::Unknown)
    }

    #[test]
    fn metastasis_is_stage_iv() {
        assert_eq!(stage_of("T1a", "N0", "M1"), Stage::IV);
    }

    #[test]
    fn t4_beats_nodes() {
        let result = classify_clinical(&TnmData::new("T4", "N1", "M0")).expect("complete");
        assert_eq!(result.stage, Stage::IV);
        assert_eq!(result.rule, RuleId::Rcc(RccRule::BeyondGerotaFascia));
    }

    #[test]
    fn nodes_beat_t3_subrule() {
        let result = classify_clinical(&TnmData::new("T3b", "N1", "M0")).expect("complete");
        assert_eq!(result.stage, Stage::III);
        assert_eq!(result.rule, RuleId::Rcc(RccRule::RegionalNodes));
        assert_eq!(result.factors[2], "Primary tumor classification: T3b");
    }

    #[test]
    fn t3_subcodes_have_distinct_factors() {
        let a = classify_clinical(&TnmData::new("T3a", "N0", "M0")).expect("a");
        let b = classify_clinical(&TnmData::new("T3b", "N0", "M0")).expect("b");
        let c = classify_clinical(&TnmData::new("T3c", "N0", "M0")).expect("c");
        let bare = classify_clinical(&TnmData::new("T3", "N0", "M0")).expect("bare");
        assert_eq!(a.stage, Stage::III);
        assert_ne!(a.factors[0], b.factors[0]);
        assert_ne!(b.factors[0], c.factors[0]);
        assert_eq!(bare.factors[0], "Tumor extends into major veins or perinephric tissues");
    }

    #[test]
    fn organ_confined_stages() {
        assert_eq!(stage_of("T2b", "N0", "M0"), Stage::II);
        assert_eq!(stage_of("T1a", "N0", "M0"), Stage::I);
        assert_eq!(stage_of("T1b", "N0", "M0"), Stage::I);
        assert_eq!(stage_of("t1b", "n0", "m0"), Stage::I);
    }

    #[test]
    fn t1_size_factor() {
        let a = classify_clinical(&TnmData::new("T1a", "N0", "M0")).expect("a");
        let b = classify_clinical(&TnmData::new("T1b", "N0", "M0")).expect("b");
        assert_eq!(a.factors[0], "Tumor ≤4 cm");
        assert_eq!(b.factors[0], "Tumor >4 cm and ≤7 cm");
    }

    #[test]
    fn tx_is_unknown_with_raw_codes() {
        let result = classify_clinical(&TnmData::new("TX", "N0", "M0")).expect("complete");
        assert_eq!(result.stage, Stage::Unknown);
        assert_eq!(result.stage_numeric, 0);
        assert_eq!(result.factors[0], "T: TX");
        assert_eq!(result.factors[1], "N: N0");
        assert_eq!(result.factors[2], "M: M0");
    }

    #[test]
    fn malformed_code_is_unknown_not_error() {
        let result = classify_clinical(&TnmData::new("T9z", "N0", "M0")).expect("complete");
        assert_eq!(result.stage, Stage::Unknown);
        assert_eq!(result.factors[0], "T: T9z");
    }

    #[test]
    fn missing_axis_is_none() {
        let tnm = TnmData {
            t: Some("T1a".into()),
            n: None,
            m: Some("M0".into()),
        };
        assert!(classify_clinical(&tnm).is_none());
        assert!(classify_clinical(&TnmData::default()).is_none());
    }

    #[test]
    fn input_is_not_mutated() {
        let tnm = TnmData::new("t2a", "n0", "m0");
        let before = tnm.clone();
        let _ = classify_clinical(&tnm);
        assert_eq!(tnm, before);
    }
}
