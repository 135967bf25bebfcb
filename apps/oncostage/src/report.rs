//! # Report Types
//!
//! Display-ready structures built from engine output. Identifiers are
//! resolved to localized text here; `--json-mode` prints these as JSON and
//! text mode renders them with [`AssessmentReport::to_text`].
//!
//! Option names, bucket titles and stage labels follow the locale. Staging
//! explanations, factors and selection reasons are English only.

use oncostage_core::locale::{bucket_label, category_label, reference_title, stage_label};
use oncostage_core::{
    Assessment, Bucket, GuidelineCatalog, GuidelineReference, Locale, OncoError, Severity,
    StagingResult, TextCatalog, TreatmentRecommendation,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// CATALOG STAMP
// =============================================================================

/// Identifies the guideline snapshot a recommendation was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStamp {
    pub name: String,
    pub version: String,
    pub effective_year: u16,
    pub fingerprint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blake3: Option<String>,
}

impl CatalogStamp {
    pub fn new(catalog: &GuidelineCatalog) -> Result<Self, OncoError> {
        Ok(Self {
            name: catalog.name.clone(),
            version: catalog.version.clone(),
            effective_year: catalog.effective_year,
            fingerprint: oncostage_core::formats::fingerprint_hex(catalog)?,
            blake3: Some(oncostage_core::formats::crypto_hash(catalog)?),
        })
    }
}

// =============================================================================
// STAGING REPORT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingReport {
    pub stage: String,
    pub stage_label: String,
    pub stage_numeric: u8,
    pub severity: Severity,
    pub explanation: String,
    pub factors: Vec<String>,
}

impl StagingReport {
    #[must_use]
    pub fn new(result: &StagingResult, locale: Locale) -> Self {
        Self {
            stage: result.stage.label().to_string(),
            stage_label: stage_label(result.stage, locale).to_string(),
            stage_numeric: result.stage_numeric,
            severity: Severity::from(result),
            explanation: result.explanation.clone(),
            factors: result.factors.clone(),
        }
    }
}

// =============================================================================
// RECOMMENDATION REPORT
// =============================================================================

/// One option with its localized text and why it was selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionReport {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub tier: String,
    pub reason: String,
    pub indications: Vec<String>,
    pub contraindications: Vec<String>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
    pub citations: Vec<String>,
}

/// A titled bucket of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketReport {
    pub bucket: Bucket,
    pub title: String,
    pub options: Vec<OptionReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationReport {
    /// Non-empty buckets in display order.
    pub buckets: Vec<BucketReport>,
}

impl RecommendationReport {
    pub fn new(
        rec: &TreatmentRecommendation,
        catalog: &GuidelineCatalog,
        text: &TextCatalog,
        locale: Locale,
    ) -> Result<Self, OncoError> {
        let mut buckets: Vec<BucketReport> = Vec::new();

        for (bucket, option) in rec.resolve(catalog)? {
            let option_text = text.option(option.id, locale);
            let rationale = rec
                .rationale
                .iter()
                .find(|r| r.bucket == bucket && r.option == option.id);

            let report = OptionReport {
                id: option.id.to_string(),
                name: option_text.map_or_else(|| option.id.to_string(), |t| t.name.to_string()),
                description: option_text.map(|t| t.description.to_string()).unwrap_or_default(),
                category: category_label(option.category, locale).to_string(),
                tier: rationale.map(|r| r.tier.as_str().to_string()).unwrap_or_default(),
                reason: rationale.map(|r| r.reason.clone()).unwrap_or_default(),
                indications: option_text.map(|t| to_strings(t.indications)).unwrap_or_default(),
                contraindications: option_text
                    .map(|t| to_strings(t.contraindications))
                    .unwrap_or_default(),
                warnings: option_text.map(|t| to_strings(t.warnings)).unwrap_or_default(),
                notes: option_text.map(|t| to_strings(t.notes)).unwrap_or_default(),
                citations: option.citations.iter().map(ToString::to_string).collect(),
            };

            match buckets.last_mut() {
                Some(last) if last.bucket == bucket => last.options.push(report),
                _ => buckets.push(BucketReport {
                    bucket,
                    title: bucket_label(bucket, locale).to_string(),
                    options: vec![report],
                }),
            }
        }

        Ok(Self { buckets })
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// =============================================================================
// ASSESSMENT REPORT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub case_id: String,
    pub cancer_type: String,
    pub case_type: String,
    pub locale: Locale,
    /// `None` when staging input was incomplete.
    pub staging: Option<StagingReport>,
    pub recommendation: Option<RecommendationReport>,
    pub catalog: CatalogStamp,
}

impl AssessmentReport {
    pub fn new(
        assessment: &Assessment,
        catalog: &GuidelineCatalog,
        text: &TextCatalog,
        locale: Locale,
    ) -> Result<Self, OncoError> {
        let recommendation = assessment
            .recommendation
            .as_ref()
            .map(|rec| RecommendationReport::new(rec, catalog, text, locale))
            .transpose()?;

        Ok(Self {
            case_id: assessment.case_id.clone(),
            cancer_type: assessment.cancer_type.as_str().to_string(),
            case_type: assessment.case_type.as_str().to_string(),
            locale,
            staging: assessment
                .staging
                .as_ref()
                .map(|s| StagingReport::new(s, locale)),
            recommendation,
            catalog: CatalogStamp::new(catalog)?,
        })
    }

    /// Plain-text rendering for the terminal.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Case {} ({} / {})\n", self.case_id, self.cancer_type, self.case_type));
        out.push_str("==================\n");

        let Some(staging) = &self.staging else {
            out.push_str("Staging input incomplete: no stage computed.\n");
            return out;
        };

        out.push_str(&format!(
            "{} [{}]\n{}\n",
            staging.stage_label, staging.severity, staging.explanation
        ));
        for factor in &staging.factors {
            out.push_str(&format!("  - {factor}\n"));
        }

        if let Some(rec) = &self.recommendation {
            if rec.buckets.is_empty() {
                out.push_str("\nNo treatment options for this stage.\n");
            }
            for bucket in &rec.buckets {
                out.push_str(&format!("\n{}\n", bucket.title));
                for option in &bucket.options {
                    out.push_str(&format!("  * {} [{}] ({})\n", option.name, option.tier, option.category));
                    if !option.reason.is_empty() {
                        out.push_str(&format!("    {}\n", option.reason));
                    }
                    if !option.citations.is_empty() {
                        out.push_str(&format!("    Sources: {}\n", option.citations.join("; ")));
                    }
                }
            }
        }

        out.push_str(&format!(
            "\nGuidelines: {} v{} (fingerprint {})\n",
            self.catalog.name, self.catalog.version, self.catalog.fingerprint
        ));
        out
    }
}

// =============================================================================
// CATALOG LISTINGS
// =============================================================================

/// One row of the `catalog` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntryReport {
    pub id: String,
    pub name: String,
    pub category: String,
    pub citations: Vec<String>,
}

/// Every option of `catalog` in id order.
#[must_use]
pub fn catalog_entries(
    catalog: &GuidelineCatalog,
    text: &TextCatalog,
    locale: Locale,
) -> Vec<CatalogEntryReport> {
    catalog
        .options()
        .map(|option| CatalogEntryReport {
            id: option.id.to_string(),
            name: text
                .option(option.id, locale)
                .map_or_else(|| option.id.to_string(), |t| t.name.to_string()),
            category: category_label(option.category, locale).to_string(),
            citations: option.citations.iter().map(ToString::to_string).collect(),
        })
        .collect()
}

/// One row of the `references` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceReport {
    pub source: String,
    pub title: String,
    pub version: String,
    pub year: u16,
    pub url: String,
}

impl ReferenceReport {
    #[must_use]
    pub fn new(reference: &GuidelineReference, locale: Locale) -> Self {
        Self {
            source: reference.source.to_string(),
            title: reference_title(reference.source, locale).to_string(),
            version: reference.version.clone(),
            year: reference.year,
            url: reference.url.clone(),
        }
    }
}
