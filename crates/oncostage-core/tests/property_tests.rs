//! # Property-Based Tests
//!
//! Determinism and precedence invariants of the staging and recommendation
//! engine, checked with proptest over every typed TNM code.

use oncostage_core::{
    Bucket, CancerType, CaseData, CaseType, GuidelineCatalog, MCategory, NCategory,
    PostOpTnmData, Stage, TCategory, TnmData, catalog_from_bytes, catalog_to_bytes,
    classify_clinical, classify_wilms, evaluate, fingerprint,
};
use proptest::prelude::*;
use proptest::sample::select;
use std::collections::BTreeSet;

fn t_code() -> impl Strategy<Value = TCategory> {
    select(TCategory::ALL.to_vec())
}

fn n_code() -> impl Strategy<Value = NCategory> {
    select(NCategory::ALL.to_vec())
}

fn m_code() -> impl Strategy<Value = MCategory> {
    select(MCategory::ALL.to_vec())
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// M1 is stage IV whatever T and N are.
    #[test]
    fn m1_is_always_stage_iv(t in t_code(), n in n_code()) {
        let tnm = TnmData::new(t.code(), n.code(), "M1");
        let result = classify_clinical(&tnm).expect("complete");
        prop_assert_eq!(result.stage, Stage::IV);
    }

    /// M1 is stage IV even when T is not a recognised code.
    #[test]
    fn m1_beats_malformed_t(raw in "[A-Za-z0-9 ]{0,6}", n in n_code()) {
        let tnm = TnmData::new(raw, n.code(), "M1");
        prop_assert_eq!(classify_clinical(&tnm).map(|r| r.stage), Some(Stage::IV));
    }

    /// Repeated classification is identical and serialises identically.
    #[test]
    fn classification_is_idempotent(t in t_code(), n in n_code(), m in m_code()) {
        let tnm = TnmData::new(t.code(), n.code(), m.code());
        let first = classify_clinical(&tnm);
        let second = classify_clinical(&tnm);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_vec(&first).expect("json"),
            serde_json::to_vec(&second).expect("json")
        );
    }

    /// stageNumeric always agrees with stage and factors are never empty.
    #[test]
    fn result_is_consistent(t in t_code(), n in n_code(), m in m_code()) {
        let result = classify_clinical(&TnmData::new(t.code(), n.code(), m.code()))
            .expect("complete");
        prop_assert_eq!(Stage::from_numeric(result.stage_numeric), result.stage);
        prop_assert!(!result.factors.is_empty());
    }

    /// Lowercasing the codes never changes the stage.
    #[test]
    fn case_insensitive(t in t_code(), n in n_code(), m in m_code()) {
        let upper = TnmData::new(t.code(), n.code(), m.code());
        let lower = TnmData::new(
            t.code().to_lowercase(),
            n.code().to_lowercase(),
            m.code().to_lowercase(),
        );
        prop_assert_eq!(
            classify_clinical(&upper).map(|r| r.stage),
            classify_clinical(&lower).map(|r| r.stage)
        );
    }

    /// No bucket ever holds the same option twice.
    #[test]
    fn buckets_have_no_duplicates(
        t in t_code(),
        n in n_code(),
        m in m_code(),
        wilms in any::<bool>(),
    ) {
        let mut case = if wilms {
            CaseData::new("P", CancerType::Wilms, CaseType::PostOp)
        } else {
            CaseData::new("P", CancerType::Kidney, CaseType::Primary)
        };
        case.tnm = TnmData::new(t.code(), n.code(), m.code());
        case.post_op_tnm = Some(
            PostOpTnmData::new(format!("p{}", t.code()), format!("p{}", n.code()))
                .with_p_m(format!("p{}", m.code())),
        );
        let assessment = evaluate(&case, &GuidelineCatalog::standard()).expect("evaluate");
        if let Some(rec) = assessment.recommendation {
            for bucket in Bucket::ALL {
                let ids = rec.bucket(bucket);
                let unique: BTreeSet<_> = ids.iter().collect();
                prop_assert_eq!(unique.len(), ids.len());
            }
        }
    }

    /// Wilms pM1 is stage IV for every pT and pN.
    #[test]
    fn wilms_m1_is_stage_iv(t in t_code(), n in n_code()) {
        let tnm = PostOpTnmData::new(t.code(), n.code()).with_p_m("pM1");
        prop_assert_eq!(classify_wilms(&tnm, None).map(|r| r.stage), Some(Stage::IV));
    }
}

/// Snapshot encode/decode keeps the fingerprint.
#[test]
fn snapshot_preserves_fingerprint() {
    let catalog = GuidelineCatalog::standard();
    let bytes = catalog_to_bytes(&catalog).expect("encode");
    let restored = catalog_from_bytes(&bytes).expect("decode");
    assert_eq!(
        fingerprint(&catalog).expect("fp"),
        fingerprint(&restored).expect("fp")
    );
}
