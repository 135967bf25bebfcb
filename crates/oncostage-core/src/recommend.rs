//! # Treatment Recommender
//!
//! Maps a case and its [`StagingResult`] to a [`TreatmentRecommendation`]:
//! four ordered buckets of [`OptionId`]s plus a rationale entry for every
//! id added.
//!
//! Three rule sets exist, selected by cancer type and case type:
//!
//! | Path | Decisive inputs |
//! |------|-----------------|
//! | Kidney, pre-operative | stage, cT1a, tumor histology and grade |
//! | Kidney, post-operative | stage, pathology histology, grade and adverse features |
//! | Wilms tumor | stage, histologic risk group |
//!
//! The recommender borrows a [`GuidelineCatalog`] and checks every selected
//! id against it before returning.

use crate::case::{CancerType, CaseData, CaseType};
use crate::catalog::{GuidelineCatalog, OptionId, TreatmentOption};
use crate::primitives::MAX_GRADE;
use crate::staging::{Stage, StagingResult};
use crate::types::{Grade, OncoError, PathologyData, TCategory, TnmData, TumorData, WilmsRisk};
use serde::{Deserialize, Serialize};

// =============================================================================
// RECOMMENDATION
// =============================================================================

/// Recommendation bucket, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Neoadjuvant,
    Primary,
    Adjuvant,
    Alternative,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Neoadjuvant,
        Bucket::Primary,
        Bucket::Adjuvant,
        Bucket::Alternative,
    ];
}

/// Strength of a recommendation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    /// Standard of care for this presentation.
    Mandatory,
    /// To be considered; depends on patient and team judgement.
    Optional,
}

impl Tier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Tier::Mandatory => "mandatory",
            Tier::Optional => "optional",
        }
    }
}

/// Why an option was added to a bucket.
///
/// `reason` is English clinical text and is not translated; localized
/// display text comes from the option and bucket labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rationale {
    pub bucket: Bucket,
    pub option: OptionId,
    pub tier: Tier,
    pub reason: String,
}

/// Ordered treatment options, most preferred first within each bucket.
///
/// A bucket never holds the same id twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRecommendation {
    pub neoadjuvant: Vec<OptionId>,
    pub primary_treatment: Vec<OptionId>,
    pub adjuvant: Vec<OptionId>,
    pub alternative_options: Vec<OptionId>,
    pub rationale: Vec<Rationale>,
}

impl TreatmentRecommendation {
    /// Ids in one bucket.
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &[OptionId] {
        match bucket {
            Bucket::Neoadjuvant => &self.neoadjuvant,
            Bucket::Primary => &self.primary_treatment,
            Bucket::Adjuvant => &self.adjuvant,
            Bucket::Alternative => &self.alternative_options,
        }
    }

    #[must_use]
    pub fn contains(&self, bucket: Bucket, id: OptionId) -> bool {
        self.bucket(bucket).contains(&id)
    }

    /// Tier recorded for `id` in `bucket`.
    #[must_use]
    pub fn tier(&self, bucket: Bucket, id: OptionId) -> Option<Tier> {
        self.rationale
            .iter()
            .find(|r| r.bucket == bucket && r.option == id)
            .map(|r| r.tier)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        Bucket::ALL.iter().all(|b| self.bucket(*b).is_empty())
    }

    /// Every `(bucket, id)` pair in display order.
    pub fn entries(&self) -> impl Iterator<Item = (Bucket, OptionId)> + '_ {
        Bucket::ALL
            .into_iter()
            .flat_map(move |b| self.bucket(b).iter().map(move |id| (b, *id)))
    }

    /// Resolve every entry against `catalog`.
    pub fn resolve<'c>(
        &self,
        catalog: &'c GuidelineCatalog,
    ) -> Result<Vec<(Bucket, &'c TreatmentOption)>, OncoError> {
        self.entries()
            .map(|(bucket, id)| {
                catalog
                    .get(id)
                    .map(|option| (bucket, option))
                    .ok_or(OncoError::OptionMissing(id))
            })
            .collect()
    }

    fn add(&mut self, bucket: Bucket, option: OptionId, tier: Tier, reason: &str) {
        let ids = match bucket {
            Bucket::Neoadjuvant => &mut self.neoadjuvant,
            Bucket::Primary => &mut self.primary_treatment,
            Bucket::Adjuvant => &mut self.adjuvant,
            Bucket::Alternative => &mut self.alternative_options,
        };
        if ids.contains(&option) {
            return;
        }
        ids.push(option);
        self.rationale.push(Rationale {
            bucket,
            option,
            tier,
            reason: reason.to_string(),
        });
    }
}

// =============================================================================
// RECOMMENDER
// =============================================================================

/// Treatment recommender bound to one catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'c> {
    catalog: &'c GuidelineCatalog,
}

impl<'c> Recommender<'c> {
    #[must_use]
    pub fn new(catalog: &'c GuidelineCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &'c GuidelineCatalog {
        self.catalog
    }

    /// Recommend for a case, routing on cancer type and case type.
    pub fn recommend(
        &self,
        case: &CaseData,
        staging: &StagingResult,
    ) -> Result<TreatmentRecommendation, OncoError> {
        let cancer_type = case.cancer_type.ok_or(OncoError::CancerTypeMissing)?;
        match (cancer_type, case.case_type) {
            (CancerType::Kidney, CaseType::Primary) => {
                self.kidney_pre_op(&case.tumor, &case.tnm, staging)
            }
            (CancerType::Kidney, CaseType::PostOp) => {
                self.kidney_post_op(case.pathology.as_ref(), staging)
            }
            (CancerType::Wilms, _) => self.wilms(case.pathology.as_ref(), staging),
        }
    }

    /// Adult RCC before surgery.
    pub fn kidney_pre_op(
        &self,
        tumor: &TumorData,
        tnm: &TnmData,
        staging: &StagingResult,
    ) -> Result<TreatmentRecommendation, OncoError> {
        let mut rec = TreatmentRecommendation::default();
        let clear_cell = tumor.histology.is_some_and(|h| h.is_clear_cell());
        let high_grade = tumor.grade.is_some_and(Grade::is_high);

        match staging.stage {
            Stage::I => {
                rec.add(
                    Bucket::Primary,
                    OptionId::PartialNephrectomy,
                    Tier::Mandatory,
                    "Stage I: nephron-sparing surgery preferred when technically feasible",
                );
                if tnm.t_category() == Some(TCategory::T1a) {
                    rec.add(
                        Bucket::Alternative,
                        OptionId::ActiveSurveillance,
                        Tier::Optional,
                        "cT1a small renal mass: surveillance is an option",
                    );
                } else {
                    rec.add(
                        Bucket::Alternative,
                        OptionId::RadicalNephrectomy,
                        Tier::Optional,
                        "Radical nephrectomy when partial nephrectomy is not feasible",
                    );
                }
            }
            Stage::II => {
                rec.add(
                    Bucket::Primary,
                    OptionId::RadicalNephrectomy,
                    Tier::Mandatory,
                    "Stage II: tumor >7 cm limited to kidney",
                );
                rec.add(
                    Bucket::Alternative,
                    OptionId::PartialNephrectomy,
                    Tier::Optional,
                    "Partial nephrectomy in selected cases",
                );
                if clear_cell && high_grade {
                    rec.add(
                        Bucket::Adjuvant,
                        OptionId::PembrolizumabAdjuvant,
                        Tier::Optional,
                        "High-grade clear cell RCC: adjuvant immunotherapy to be confirmed on pathology",
                    );
                }
            }
            Stage::III => {
                rec.add(
                    Bucket::Primary,
                    OptionId::RadicalNephrectomy,
                    Tier::Mandatory,
                    "Stage III: radical nephrectomy with thrombectomy or node dissection as needed",
                );
                if clear_cell {
                    rec.add(
                        Bucket::Adjuvant,
                        OptionId::PembrolizumabAdjuvant,
                        Tier::Mandatory,
                        "Clear cell RCC stage III: adjuvant pembrolizumab (KEYNOTE-564)",
                    );
                }
            }
            Stage::IV => {
                rec.add(
                    Bucket::Primary,
                    OptionId::SystemicTherapyAdvanced,
                    Tier::Mandatory,
                    "Stage IV: first-line systemic therapy",
                );
                rec.add(
                    Bucket::Alternative,
                    OptionId::RadicalNephrectomy,
                    Tier::Optional,
                    "Cytoreductive nephrectomy in selected patients",
                );
            }
            Stage::Unknown => {}
        }

        self.verified(rec)
    }

    /// Adult RCC after nephrectomy, driven by the pathology report.
    pub fn kidney_post_op(
        &self,
        pathology: Option<&PathologyData>,
        staging: &StagingResult,
    ) -> Result<TreatmentRecommendation, OncoError> {
        let mut rec = TreatmentRecommendation::default();
        let clear_cell = pathology.is_some_and(PathologyData::is_clear_cell);
        let high_risk = pathology.is_some_and(PathologyData::is_high_risk);
        let sarcomatoid = pathology.is_some_and(|p| p.sarcomatoid_features);
        let grade = pathology.and_then(|p| p.grade);

        match staging.stage {
            Stage::I => {
                if high_risk && clear_cell {
                    rec.add(
                        Bucket::Adjuvant,
                        OptionId::PembrolizumabAdjuvant,
                        Tier::Optional,
                        "pT1 clear cell RCC with adverse features: consider adjuvant immunotherapy",
                    );
                    rec.add(
                        Bucket::Alternative,
                        OptionId::ActiveSurveillance,
                        Tier::Optional,
                        "Surveillance if adjuvant therapy is declined",
                    );
                } else {
                    rec.add(
                        Bucket::Primary,
                        OptionId::ActiveSurveillance,
                        Tier::Mandatory,
                        "Low-risk pT1: post-operative surveillance",
                    );
                }
            }
            Stage::II => {
                if !clear_cell {
                    rec.add(
                        Bucket::Primary,
                        OptionId::ActiveSurveillance,
                        Tier::Mandatory,
                        "Non-clear cell histology: surveillance preferred",
                    );
                } else if grade.map(Grade::value) == Some(MAX_GRADE) || sarcomatoid {
                    rec.add(
                        Bucket::Adjuvant,
                        OptionId::PembrolizumabAdjuvant,
                        Tier::Mandatory,
                        "pT2 grade 4 or sarcomatoid clear cell RCC (KEYNOTE-564)",
                    );
                } else if grade.is_some_and(Grade::is_high) {
                    rec.add(
                        Bucket::Adjuvant,
                        OptionId::PembrolizumabAdjuvant,
                        Tier::Optional,
                        "pT2 grade 3 clear cell RCC: consider adjuvant immunotherapy",
                    );
                    rec.add(
                        Bucket::Alternative,
                        OptionId::ActiveSurveillance,
                        Tier::Optional,
                        "Surveillance if adjuvant therapy is declined",
                    );
                } else {
                    rec.add(
                        Bucket::Primary,
                        OptionId::ActiveSurveillance,
                        Tier::Mandatory,
                        "Low-grade pT2 clear cell RCC: surveillance",
                    );
                }
            }
            Stage::III => {
                if clear_cell {
                    rec.add(
                        Bucket::Adjuvant,
                        OptionId::PembrolizumabAdjuvant,
                        Tier::Mandatory,
                        "pT3 or pN+ clear cell RCC: adjuvant pembrolizumab (KEYNOTE-564)",
                    );
                } else {
                    rec.add(
                        Bucket::Primary,
                        OptionId::ActiveSurveillance,
                        Tier::Mandatory,
                        "Non-clear cell histology: surveillance or clinical trial",
                    );
                }
            }
            Stage::IV => {
                if clear_cell {
                    rec.add(
                        Bucket::Adjuvant,
                        OptionId::PembrolizumabAdjuvant,
                        Tier::Mandatory,
                        "M1 NED after metastasectomy, clear cell RCC",
                    );
                    rec.add(
                        Bucket::Alternative,
                        OptionId::SystemicTherapyAdvanced,
                        Tier::Optional,
                        "Systemic therapy for residual or recurrent disease",
                    );
                } else {
                    rec.add(
                        Bucket::Primary,
                        OptionId::SystemicTherapyAdvanced,
                        Tier::Mandatory,
                        "Metastatic non-clear cell RCC: systemic therapy",
                    );
                }
            }
            Stage::Unknown => {}
        }

        self.verified(rec)
    }

    /// Pediatric Wilms tumor on SIOP-RTSG protocols.
    ///
    /// Pulmonary radiotherapy for stage IV lung metastases is not part of
    /// the catalog and is never recommended.
    pub fn wilms(
        &self,
        pathology: Option<&PathologyData>,
        staging: &StagingResult,
    ) -> Result<TreatmentRecommendation, OncoError> {
        let mut rec = TreatmentRecommendation::default();
        let risk = pathology.and_then(PathologyData::wilms_risk);

        rec.add(
            Bucket::Neoadjuvant,
            OptionId::PreOpVa,
            Tier::Mandatory,
            "SIOP protocols: 4 weeks of pre-operative VA for localized tumors",
        );

        match staging.stage {
            Stage::I if risk == Some(WilmsRisk::Low) => {
                rec.add(
                    Bucket::Primary,
                    OptionId::ObservationOrShortVa,
                    Tier::Mandatory,
                    "Stage I low risk: observation or short VA",
                );
            }
            Stage::I => {
                rec.add(
                    Bucket::Adjuvant,
                    OptionId::PostOpVa9w,
                    Tier::Mandatory,
                    "Stage I intermediate or high risk: 9 weeks of post-operative VA",
                );
            }
            Stage::II if risk == Some(WilmsRisk::High) => {
                rec.add(
                    Bucket::Adjuvant,
                    OptionId::PostOpVad28w,
                    Tier::Mandatory,
                    "Stage II high risk: 28 weeks of VAD",
                );
                rec.add(
                    Bucket::Adjuvant,
                    OptionId::RadiotherapyAbdominal,
                    Tier::Mandatory,
                    "Stage II high risk: flank radiotherapy",
                );
            }
            Stage::II => {
                rec.add(
                    Bucket::Adjuvant,
                    OptionId::PostOpVa9w,
                    Tier::Mandatory,
                    "Stage II: post-operative VA",
                );
            }
            Stage::III => {
                rec.add(
                    Bucket::Adjuvant,
                    OptionId::PostOpVad28w,
                    Tier::Mandatory,
                    "Stage III: 28 weeks of VAD",
                );
                rec.add(
                    Bucket::Adjuvant,
                    OptionId::RadiotherapyAbdominal,
                    Tier::Mandatory,
                    "Stage III: abdominal radiotherapy",
                );
            }
            Stage::IV => {
                rec.add(
                    Bucket::Adjuvant,
                    OptionId::PostOpVad28w,
                    Tier::Mandatory,
                    "Stage IV: 28 weeks of VAD",
                );
            }
            Stage::Unknown => {}
        }

        self.verified(rec)
    }

    fn verified(&self, rec: TreatmentRecommendation) -> Result<TreatmentRecommendation, OncoError> {
        if let Some((_, missing)) = rec.entries().find(|(_, id)| !self.catalog.contains(*id)) {
            return Err(OncoError::OptionMissing(missing));
        }
        Ok(rec)
    }
}

// =============================================================================
// TESTS
// =============================================================================
