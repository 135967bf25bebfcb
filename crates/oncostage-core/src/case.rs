//! # Case Evaluation
//!
//! [`CaseData`] is the record the case store keeps for one patient; its
//! serialized form uses the store's camelCase field names so an exported
//! case file can be read as-is.
//!
//! [`evaluate`] routes a case to the matching classifier and recommender:
//!
//! | Cancer type | Case type | Classifier | Recommender |
//! |-------------|-----------|------------|-------------|
//! | kidney | primary | clinical | kidney pre-op |
//! | kidney | postOp | pathological | kidney post-op |
//! | wilms | postOp | Wilms (pTNM) | Wilms |
//! | wilms | primary | Wilms (pTNM, else clinical TNM) | Wilms |
//! | unset | any | `CancerTypeMissing` | - |

use crate::catalog::GuidelineCatalog;
use crate::recommend::{Recommender, TreatmentRecommendation};
use crate::severity::Severity;
use crate::staging::{StagingResult, classify_clinical, classify_pathological, classify_wilms};
use crate::types::{OncoError, PathologyData, PostOpTnmData, TnmData, TumorData};
use serde::{Deserialize, Serialize};

// =============================================================================
// CASE RECORD
// =============================================================================

/// Primary work-up or post-operative follow-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseType {
    #[default]
    Primary,
    PostOp,
}

impl CaseType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CaseType::Primary => "primary",
            CaseType::PostOp => "postOp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancerType {
    /// Adult renal cell carcinoma.
    Kidney,
    /// Pediatric nephroblastoma.
    Wilms,
}

impl CancerType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CancerType::Kidney => "kidney",
            CancerType::Wilms => "wilms",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurgeryType {
    Partial,
    Radical,
    Cytoreductive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientData {
    pub case_id: String,
    pub age: Option<u16>,
    pub gender: Option<Gender>,
    pub comorbidities: Vec<String>,
}

/// Pre-operative summary recorded on a post-operative case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreOpData {
    pub clinical_stage: Option<String>,
    /// Millimetres; `tumorSize` in centimetres on the wire.
    #[serde(rename = "tumorSize", with = "crate::types::size_cm")]
    pub tumor_size_mm: Option<u32>,
    #[serde(rename = "cT")]
    pub c_t: Option<String>,
    pub surgery_type: Option<SurgeryType>,
}

/// One case as held by the case store.
///
/// Timestamps are carried as opaque strings; the engine never reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseData {
    pub id: String,
    pub case_type: CaseType,
    pub cancer_type: Option<CancerType>,
    pub patient: PatientData,
    pub tumor: TumorData,
    pub tnm: TnmData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathology: Option<PathologyData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_op: Option<PreOpData>,
    #[serde(rename = "postOpTNM", skip_serializing_if = "Option::is_none")]
    pub post_op_tnm: Option<PostOpTnmData>,
    /// Last stage label recorded by the caller.
    pub stage: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl CaseData {
    /// An empty case of the given kind.
    #[must_use]
    pub fn new(id: impl Into<String>, cancer_type: CancerType, case_type: CaseType) -> Self {
        Self {
            id: id.into(),
            cancer_type: Some(cancer_type),
            case_type,
            ..Self::default()
        }
    }

    /// Stage the case with the classifier its type selects.
    ///
    /// `Ok(None)` means the staging input is incomplete.
    pub fn classify(&self) -> Result<Option<StagingResult>, OncoError> {
        let cancer_type = self.cancer_type.ok_or(OncoError::CancerTypeMissing)?;
        let pathology = self.pathology.as_ref();
        Ok(match (cancer_type, self.case_type) {
            (CancerType::Kidney, CaseType::Primary) => classify_clinical(&self.tnm),
            (CancerType::Kidney, CaseType::PostOp) => self
                .post_op_tnm
                .as_ref()
                .and_then(|tnm| classify_pathological(tnm, pathology)),
            (CancerType::Wilms, CaseType::PostOp) => self
                .post_op_tnm
                .as_ref()
                .and_then(|tnm| classify_wilms(tnm, pathology)),
            (CancerType::Wilms, CaseType::Primary) => match &self.post_op_tnm {
                Some(tnm) => classify_wilms(tnm, pathology),
                None => classify_wilms(&self.clinical_as_post_op(), pathology),
            },
        })
    }

    /// Clinical TNM read through the pathological parser, for pre-operative
    /// Wilms cases that have no pTNM yet.
    fn clinical_as_post_op(&self) -> PostOpTnmData {
        PostOpTnmData {
            p_t: self.tnm.t.clone(),
            p_n: self.tnm.n.clone(),
            p_m: self.tnm.m.clone(),
        }
    }
}

// =============================================================================
// ASSESSMENT
// =============================================================================

/// Staging and recommendation for one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub case_id: String,
    pub cancer_type: CancerType,
    pub case_type: CaseType,
    /// `None` when the staging input is incomplete.
    pub staging: Option<StagingResult>,
    pub severity: Severity,
    /// Present whenever `staging` is.
    pub recommendation: Option<TreatmentRecommendation>,
}

/// Stage a case and derive its recommendation from `catalog`.
pub fn evaluate(case: &CaseData, catalog: &GuidelineCatalog) -> Result<Assessment, OncoError> {
    let cancer_type = case.cancer_type.ok_or(OncoError::CancerTypeMissing)?;
    let staging = case.classify()?;
    let recommendation = staging
        .as_ref()
        .map(|result| Recommender::new(catalog).recommend(case, result))
        .transpose()?;

    Ok(Assessment {
        case_id: case.id.clone(),
        cancer_type,
        case_type: case.case_type,
        severity: staging.as_ref().map_or(Severity::Muted, Severity::from),
        staging,
        recommendation,
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OptionId;
    use crate::staging::Stage;

    #[test]
    fn unset_cancer_type_is_error() {
        let case = CaseData::default();
        let catalog = GuidelineCatalog::standard();
        assert!(matches!(
            evaluate(&case, &catalog),
            Err(OncoError::CancerTypeMissing)
        ));
    }

    #[test]
    fn kidney_primary_uses_clinical_path() {
        let mut case = CaseData::new("CASE-1", CancerType::Kidney, CaseType::Primary);
        case.tnm = TnmData::new("T1a", "N0", "M0");
        let assessment = evaluate(&case, &GuidelineCatalog::standard()).expect("evaluate");
        let staging = assessment.staging.expect("staged");
        assert_eq!(staging.stage, Stage::I);
        assert_eq!(assessment.severity, Severity::Success);
        let rec = assessment.recommendation.expect("recommended");
        assert_eq!(rec.primary_treatment, vec![OptionId::PartialNephrectomy]);
    }

    #[test]
    fn incomplete_input_is_not_an_error() {
        let case = CaseData::new("CASE-2", CancerType::Kidney, CaseType::PostOp);
        let assessment = evaluate(&case, &GuidelineCatalog::standard()).expect("evaluate");
        assert!(assessment.staging.is_none());
        assert!(assessment.recommendation.is_none());
        assert_eq!(assessment.severity, Severity::Muted);
    }

    #[test]
    fn wilms_primary_stages_from_pathological_tnm() {
        let mut case = CaseData::new("CASE-3", CancerType::Wilms, CaseType::Primary);
        case.post_op_tnm = Some(PostOpTnmData::new("pT3a", "pN0"));
        let assessment = evaluate(&case, &GuidelineCatalog::standard()).expect("evaluate");
        assert_eq!(assessment.staging.map(|s| s.stage), Some(Stage::II));
        let rec = assessment.recommendation.expect("recommended");
        assert_eq!(rec.neoadjuvant, vec![OptionId::PreOpVa]);
    }

    #[test]
    fn wilms_pre_op_stages_from_clinical_tnm() {
        let mut case = CaseData::new("CASE-4", CancerType::Wilms, CaseType::Primary);
        case.tnm = TnmData::new("T2a", "N0", "M0");
        let assessment = evaluate(&case, &GuidelineCatalog::standard()).expect("evaluate");
        assert_eq!(assessment.staging.map(|s| s.stage), Some(Stage::I));
        let rec = assessment.recommendation.expect("recommended");
        assert_eq!(rec.neoadjuvant, vec![OptionId::PreOpVa]);

        case.tnm = TnmData { n: None, ..TnmData::new("T2a", "N0", "M0") };
        let incomplete = evaluate(&case, &GuidelineCatalog::standard()).expect("evaluate");
        assert!(incomplete.staging.is_none());
    }

    #[test]
    fn wilms_post_op_needs_pathological_tnm() {
        let mut case = CaseData::new("CASE-6", CancerType::Wilms, CaseType::PostOp);
        case.tnm = TnmData::new("T1", "N0", "M0");
        assert!(case.classify().expect("classify").is_none());
    }

    #[test]
    fn case_store_sizes_survive_round_trip() {
        let json = r#"{
            "id": "CASE-SZ",
            "caseType": "postOp",
            "cancerType": "kidney",
            "tumor": {"size": 4.5, "grade": 3, "histology": "clearCell"},
            "pathology": {"histology": "clearCell", "tumorSize": 3.2},
            "preOp": {"tumorSize": 4.5, "cT": "T1b"},
            "postOpTNM": {"pT": "pT1b", "pN": "pN0"}
        }"#;
        let case: CaseData = serde_json::from_str(json).expect("parse");
        assert_eq!(case.tumor.size_mm, Some(45));
        assert_eq!(case.pathology.as_ref().and_then(|p| p.tumor_size_mm), Some(32));
        assert_eq!(case.pre_op.as_ref().and_then(|p| p.tumor_size_mm), Some(45));

        let saved = serde_json::to_value(&case).expect("json");
        assert_eq!(saved["tumor"]["size"], serde_json::json!(4.5));
        assert_eq!(saved["pathology"]["tumorSize"], serde_json::json!(3.2));
        assert_eq!(saved["preOp"]["tumorSize"], serde_json::json!(4.5));
        assert!(saved["tumor"].get("sizeMm").is_none());

        let reloaded: CaseData = serde_json::from_value(saved).expect("reload");
        assert_eq!(reloaded, case);
    }

    #[test]
    fn type_names_match_case_store() {
        assert_eq!(CancerType::Wilms.as_str(), "wilms");
        assert_eq!(CaseType::PostOp.as_str(), "postOp");
        assert_eq!(
            serde_json::to_value(CaseType::PostOp).expect("json"),
            serde_json::json!(CaseType::PostOp.as_str())
        );
    }

    #[test]
    fn reads_case_store_record() {
        let json = r#"{
            "id": "CASE-LX2",
            "caseType": "postOp",
            "cancerType": "kidney",
            "patient": {"caseId": "A-17", "age": 61, "gender": "male", "comorbidities": ["diabetes"]},
            "tumor": {"histology": "clearCell", "grade": 4},
            "tnm": {"t": null, "n": null, "m": null},
            "pathology": {"histology": "clearCell", "grade": 4, "sarcomatoidFeatures": true},
            "preOp": {"cT": "T2a", "surgeryType": "radical"},
            "postOpTNM": {"pT": "pT2a", "pN": "pN0", "pM": null},
            "stage": null,
            "createdAt": "2024-05-02T10:00:00Z"
        }"#;
        let case: CaseData = serde_json::from_str(json).expect("parse");
        assert_eq!(case.case_type, CaseType::PostOp);
        assert_eq!(
            case.pre_op.as_ref().and_then(|p| p.surgery_type),
            Some(SurgeryType::Radical)
        );

        let assessment = evaluate(&case, &GuidelineCatalog::standard()).expect("evaluate");
        assert_eq!(assessment.staging.as_ref().map(|s| s.stage), Some(Stage::II));
        let rec = assessment.recommendation.expect("recommended");
        assert_eq!(rec.adjuvant, vec![OptionId::PembrolizumabAdjuvant]);
    }
}
