//! Unit tests for report types: construction, localization and JSON shape.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use oncostage::report::{
    AssessmentReport, CatalogStamp, ReferenceReport, StagingReport, catalog_entries,
};
use oncostage_core::{
    Bucket, CancerType, CaseData, CaseType, GuidelineCatalog, Histology, Locale, PathologyData,
    PostOpTnmData, Severity, TextCatalog, TnmData, TumorData, classify_clinical, evaluate,
};

fn report_for(case: &CaseData, locale: Locale) -> AssessmentReport {
    let catalog = GuidelineCatalog::standard();
    let assessment = evaluate(case, &catalog).unwrap();
    AssessmentReport::new(&assessment, &catalog, &TextCatalog::standard(), locale).unwrap()
}

fn stage_i_case() -> CaseData {
    let mut case = CaseData::new("RPT-1", CancerType::Kidney, CaseType::Primary);
    case.tnm = TnmData::new("T1a", "N0", "M0");
    case.tumor = TumorData {
        histology: Some(Histology::ClearCell),
        ..TumorData::default()
    };
    case
}

// =============================================================================
// STAGING REPORT TESTS
// =============================================================================

#[test]
fn test_staging_report_fields() {
    let result = classify_clinical(&TnmData::new("T3a", "N0", "M0")).unwrap();
    let report = StagingReport::new(&result, Locale::En);

    assert_eq!(report.stage, "III");
    assert_eq!(report.stage_numeric, 3);
    assert_eq!(report.severity, Severity::Warning);
    assert_eq!(report.factors, result.factors);
}

#[test]
fn test_staging_report_arabic_label() {
    let result = classify_clinical(&TnmData::new("T1a", "N0", "M0")).unwrap();
    let en = StagingReport::new(&result, Locale::En);
    let ar = StagingReport::new(&result, Locale::Ar);

    assert_eq!(en.stage, ar.stage);
    assert_ne!(en.stage_label, ar.stage_label);
}

#[test]
fn test_staging_report_roundtrip() {
    let result = classify_clinical(&TnmData::new("T2a", "N0", "M1")).unwrap();
    let report = StagingReport::new(&result, Locale::En);

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"severity\":\"destructive\""));
    let parsed: StagingReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

// =============================================================================
// ASSESSMENT REPORT TESTS
// =============================================================================

#[test]
fn test_assessment_report_buckets_in_order() {
    let report = report_for(&stage_i_case(), Locale::En);
    let rec = report.recommendation.unwrap();

    let buckets: Vec<Bucket> = rec.buckets.iter().map(|b| b.bucket).collect();
    assert_eq!(buckets, vec![Bucket::Primary, Bucket::Alternative]);
    assert_eq!(rec.buckets[0].options[0].id, "partial-nephrectomy");
    assert!(!rec.buckets[0].options[0].citations.is_empty());
    assert!(!rec.buckets[0].options[0].reason.is_empty());
}

#[test]
fn test_assessment_report_localized_option_text() {
    let en = report_for(&stage_i_case(), Locale::En);
    let ar = report_for(&stage_i_case(), Locale::Ar);

    let en_name = &en.recommendation.unwrap().buckets[0].options[0].name;
    let ar_name = &ar.recommendation.unwrap().buckets[0].options[0].name;
    assert_ne!(en_name, ar_name);
    assert_eq!(ar.locale, Locale::Ar);
}

#[test]
fn test_assessment_report_type_and_tier_names() {
    let report = report_for(&stage_i_case(), Locale::En);
    assert_eq!(report.cancer_type, "kidney");
    assert_eq!(report.case_type, "primary");

    let rec = report.recommendation.unwrap();
    assert_eq!(rec.buckets[0].options[0].tier, "mandatory");
    assert_eq!(rec.buckets[1].options[0].tier, "optional");
}

#[test]
fn test_assessment_report_reasons_are_english_in_every_locale() {
    let en = report_for(&stage_i_case(), Locale::En).recommendation.unwrap();
    let ar = report_for(&stage_i_case(), Locale::Ar).recommendation.unwrap();

    for (en_bucket, ar_bucket) in en.buckets.iter().zip(&ar.buckets) {
        assert_ne!(en_bucket.title, ar_bucket.title);
        for (en_option, ar_option) in en_bucket.options.iter().zip(&ar_bucket.options) {
            assert_eq!(en_option.id, ar_option.id);
            assert_eq!(en_option.tier, ar_option.tier);
            assert_eq!(en_option.reason, ar_option.reason);
            assert!(ar_option.reason.is_ascii());
        }
    }
}

#[test]
fn test_assessment_report_incomplete_staging() {
    let mut case = CaseData::new("RPT-2", CancerType::Kidney, CaseType::PostOp);
    case.post_op_tnm = Some(PostOpTnmData {
        p_n: None,
        ..PostOpTnmData::new("pT1a", "pN0")
    });
    let report = report_for(&case, Locale::En);

    assert!(report.staging.is_none());
    assert!(report.recommendation.is_none());
    assert!(report.to_text().contains("incomplete"));
}

#[test]
fn test_assessment_report_carries_fingerprint() {
    let report = report_for(&stage_i_case(), Locale::En);
    let stamp = CatalogStamp::new(&GuidelineCatalog::standard()).unwrap();

    assert_eq!(report.catalog, stamp);
    assert_eq!(stamp.fingerprint.len(), 16);
    assert!(report.to_text().contains(&stamp.fingerprint));
}

#[test]
fn test_assessment_report_text_lists_options() {
    let mut case = CaseData::new("RPT-3", CancerType::Kidney, CaseType::PostOp);
    case.post_op_tnm = Some(PostOpTnmData::new("pT3a", "pN0"));
    case.pathology = Some(PathologyData {
        histology: Some(Histology::ClearCell),
        vascular_invasion: true,
        ..PathologyData::default()
    });
    let report = report_for(&case, Locale::En);
    let text = report.to_text();

    assert!(text.starts_with("Case RPT-3 (kidney / postOp)"));
    for bucket in &report.recommendation.unwrap().buckets {
        assert!(text.contains(&bucket.title));
        for option in &bucket.options {
            assert!(text.contains(&option.name));
        }
    }
}

#[test]
fn test_assessment_report_json_roundtrip() {
    let report = report_for(&stage_i_case(), Locale::En);
    let json = serde_json::to_string(&report).unwrap();
    let parsed: AssessmentReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

// =============================================================================
// CATALOG LISTING TESTS
// =============================================================================

#[test]
fn test_catalog_entries_cover_catalog() {
    let catalog = GuidelineCatalog::standard();
    let entries = catalog_entries(&catalog, &TextCatalog::standard(), Locale::En);

    assert_eq!(entries.len(), catalog.len());
    assert!(entries.iter().all(|e| !e.name.is_empty()));
    assert!(entries.iter().any(|e| e.id == "pre-op-va"));
}

#[test]
fn test_reference_report() {
    let catalog = GuidelineCatalog::standard();
    let reports: Vec<ReferenceReport> = catalog
        .references()
        .iter()
        .map(|r| ReferenceReport::new(r, Locale::En))
        .collect();

    assert_eq!(reports.len(), catalog.references().len());
    assert!(reports.iter().all(|r| r.url.starts_with("https://")));
    assert!(reports.iter().any(|r| r.source == "NCCN"));
}
