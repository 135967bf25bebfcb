//! # Guideline Catalog
//!
//! Immutable, versioned reference data: the treatment options the
//! recommender can select, each with its category and citations, plus the
//! guideline references the snapshot was compiled from.
//!
//! The catalog holds no display text. Names, descriptions, indications and
//! warnings live in [`crate::locale`] keyed by [`OptionId`], so the same
//! catalog serves every locale.
//!
//! A catalog is a plain value. The recommender borrows it, so an alternate
//! snapshot (loaded through [`crate::formats`]) can be evaluated next to the
//! built-in one.

use crate::primitives::{STANDARD_CATALOG_NAME, STANDARD_CATALOG_VERSION, STANDARD_CATALOG_YEAR};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Stable identifier of a treatment option.
///
/// The serialized form is the kebab-case id used by the case store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionId {
    #[serde(rename = "partial-nephrectomy")]
    PartialNephrectomy,
    #[serde(rename = "radical-nephrectomy")]
    RadicalNephrectomy,
    #[serde(rename = "active-surveillance")]
    ActiveSurveillance,
    #[serde(rename = "pembrolizumab-adjuvant")]
    PembrolizumabAdjuvant,
    #[serde(rename = "systemic-therapy-advanced")]
    SystemicTherapyAdvanced,
    #[serde(rename = "pre-op-va")]
    PreOpVa,
    #[serde(rename = "observation-or-short-va")]
    ObservationOrShortVa,
    #[serde(rename = "post-op-va-9w")]
    PostOpVa9w,
    #[serde(rename = "post-op-vad-28w")]
    PostOpVad28w,
    #[serde(rename = "radiotherapy-abdominal")]
    RadiotherapyAbdominal,
}

impl OptionId {
    pub const ALL: [OptionId; 10] = [
        OptionId::PartialNephrectomy,
        OptionId::RadicalNephrectomy,
        OptionId::ActiveSurveillance,
        OptionId::PembrolizumabAdjuvant,
        OptionId::SystemicTherapyAdvanced,
        OptionId::PreOpVa,
        OptionId::ObservationOrShortVa,
        OptionId::PostOpVa9w,
        OptionId::PostOpVad28w,
        OptionId::RadiotherapyAbdominal,
    ];

    /// Kebab-case id, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OptionId::PartialNephrectomy => "partial-nephrectomy",
            OptionId::RadicalNephrectomy => "radical-nephrectomy",
            OptionId::ActiveSurveillance => "active-surveillance",
            OptionId::PembrolizumabAdjuvant => "pembrolizumab-adjuvant",
            OptionId::SystemicTherapyAdvanced => "systemic-therapy-advanced",
            OptionId::PreOpVa => "pre-op-va",
            OptionId::ObservationOrShortVa => "observation-or-short-va",
            OptionId::PostOpVa9w => "post-op-va-9w",
            OptionId::PostOpVad28w => "post-op-vad-28w",
            OptionId::RadiotherapyAbdominal => "radiotherapy-abdominal",
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treatment modality of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Surgery,
    TargetedTherapy,
    Immunotherapy,
    Surveillance,
    Combination,
    Radiotherapy,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Surgery => "surgery",
            Category::TargetedTherapy => "targetedTherapy",
            Category::Immunotherapy => "immunotherapy",
            Category::Surveillance => "surveillance",
            Category::Combination => "combination",
            Category::Radiotherapy => "radiotherapy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body that publishes a guideline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GuidelineSource {
    #[serde(rename = "NCCN")]
    Nccn,
    #[serde(rename = "ESMO")]
    Esmo,
    #[serde(rename = "WHO")]
    Who,
    #[serde(rename = "AJCC")]
    Ajcc,
    #[serde(rename = "EAU")]
    Eau,
}

impl GuidelineSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GuidelineSource::Nccn => "NCCN",
            GuidelineSource::Esmo => "ESMO",
            GuidelineSource::Who => "WHO",
            GuidelineSource::Ajcc => "AJCC",
            GuidelineSource::Eau => "EAU",
        }
    }
}

impl fmt::Display for GuidelineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ENTRIES
// =============================================================================

/// Guideline edition an option is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub source: GuidelineSource,
    pub version: String,
    pub year: u16,
}

impl Citation {
    #[must_use]
    pub fn new(source: GuidelineSource, version: impl Into<String>, year: u16) -> Self {
        Self {
            source,
            version: version.into(),
            year,
        }
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.source, self.version, self.year)
    }
}

/// One selectable treatment option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentOption {
    pub id: OptionId,
    pub category: Category,
    /// Never empty in the standard catalog.
    pub citations: Vec<Citation>,
}

/// A guideline document listed on the references page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineReference {
    pub source: GuidelineSource,
    pub version: String,
    pub year: u16,
    pub url: String,
}

// =============================================================================
// CATALOG
// =============================================================================

/// A versioned guideline snapshot.
///
/// Options are keyed by id in a `BTreeMap`, so iteration order and the
/// encoded form are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineCatalog {
    pub name: String,
    pub version: String,
    pub effective_year: u16,
    options: BTreeMap<OptionId, TreatmentOption>,
    references: Vec<GuidelineReference>,
}

impl GuidelineCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>, effective_year: u16) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            effective_year,
            options: BTreeMap::new(),
            references: Vec::new(),
        }
    }

    /// The built-in snapshot: NCCN 4.2024 / ESMO 2024 for adult RCC and
    /// SIOP-RTSG 2016 for Wilms tumor.
    #[must_use]
    pub fn standard() -> Self {
        let nccn = || Citation::new(GuidelineSource::Nccn, "4.2024", 2024);
        let esmo = || Citation::new(GuidelineSource::Esmo, "2024", 2024);
        let siop = || Citation::new(GuidelineSource::Who, "SIOP-RTSG 2016", 2016);

        let mut catalog = Self::new(
            STANDARD_CATALOG_NAME,
            STANDARD_CATALOG_VERSION,
            STANDARD_CATALOG_YEAR,
        );

        let entries = [
            (OptionId::PartialNephrectomy, Category::Surgery, vec![nccn(), esmo()]),
            (OptionId::RadicalNephrectomy, Category::Surgery, vec![nccn(), esmo()]),
            (OptionId::ActiveSurveillance, Category::Surveillance, vec![nccn()]),
            (OptionId::PembrolizumabAdjuvant, Category::Immunotherapy, vec![nccn(), esmo()]),
            (OptionId::SystemicTherapyAdvanced, Category::Combination, vec![nccn(), esmo()]),
            (OptionId::PreOpVa, Category::Combination, vec![siop()]),
            (OptionId::ObservationOrShortVa, Category::Surveillance, vec![siop()]),
            (OptionId::PostOpVa9w, Category::Combination, vec![siop()]),
            (OptionId::PostOpVad28w, Category::Combination, vec![siop()]),
            (OptionId::RadiotherapyAbdominal, Category::Radiotherapy, vec![siop()]),
        ];
        for (id, category, citations) in entries {
            catalog.insert(TreatmentOption {
                id,
                category,
                citations,
            });
        }

        catalog.references = vec![
            GuidelineReference {
                source: GuidelineSource::Nccn,
                version: "4.2024".to_string(),
                year: 2024,
                url: "https://www.nccn.org/professionals/physician_gls/pdf/kidney.pdf".to_string(),
            },
            GuidelineReference {
                source: GuidelineSource::Esmo,
                version: "2024".to_string(),
                year: 2024,
                url: "https://www.esmo.org/guidelines/genitourinary-cancers/renal-cell-carcinoma"
                    .to_string(),
            },
            GuidelineReference {
                source: GuidelineSource::Ajcc,
                version: "8th Edition".to_string(),
                year: 2017,
                url: "https://www.facs.org/quality-programs/cancer-programs/american-joint-committee-on-cancer/"
                    .to_string(),
            },
            GuidelineReference {
                source: GuidelineSource::Eau,
                version: "2024".to_string(),
                year: 2024,
                url: "https://uroweb.org/guidelines/renal-cell-carcinoma".to_string(),
            },
        ];

        catalog
    }

    /// Insert or replace an option. Returns the previous entry.
    pub fn insert(&mut self, option: TreatmentOption) -> Option<TreatmentOption> {
        self.options.insert(option.id, option)
    }

    /// Remove an option.
    pub fn remove(&mut self, id: OptionId) -> Option<TreatmentOption> {
        self.options.remove(&id)
    }

    /// Append a guideline reference.
    pub fn add_reference(&mut self, reference: GuidelineReference) {
        self.references.push(reference);
    }

    #[must_use]
    pub fn get(&self, id: OptionId) -> Option<&TreatmentOption> {
        self.options.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: OptionId) -> bool {
        self.options.contains_key(&id)
    }

    /// Options in id order.
    pub fn options(&self) -> impl Iterator<Item = &TreatmentOption> {
        self.options.values()
    }

    #[must_use]
    pub fn references(&self) -> &[GuidelineReference] {
        &self.references
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn catalog_is_shareable() {
        assert_send_sync::<GuidelineCatalog>();
    }

    #[test]
    fn standard_has_every_option() {
        let catalog = GuidelineCatalog::standard();
        assert_eq!(catalog.len(), OptionId::ALL.len());
        for id in OptionId::ALL {
            let option = catalog.get(id).expect("present");
            assert_eq!(option.id, id);
            assert!(!option.citations.is_empty(), "{id} has no citation");
        }
    }

    #[test]
    fn standard_citations() {
        let catalog = GuidelineCatalog::standard();
        let surveillance = catalog.get(OptionId::ActiveSurveillance).expect("present");
        assert_eq!(surveillance.citations.len(), 1);
        assert_eq!(surveillance.citations[0].to_string(), "NCCN 4.2024 (2024)");

        let va = catalog.get(OptionId::PreOpVa).expect("present");
        assert_eq!(va.citations[0].source, GuidelineSource::Who);
        assert_eq!(va.citations[0].year, 2016);
    }

    #[test]
    fn standard_references() {
        let catalog = GuidelineCatalog::standard();
        let sources: Vec<_> = catalog.references().iter().map(|r| r.source).collect();
        assert_eq!(
            sources,
            vec![
                GuidelineSource::Nccn,
                GuidelineSource::Esmo,
                GuidelineSource::Ajcc,
                GuidelineSource::Eau
            ]
        );
    }

    #[test]
    fn option_id_serialized_form_matches_as_str() {
        for id in OptionId::ALL {
            let json = serde_json::to_string(&id).expect("serialize");
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn insert_and_remove() {
        let mut catalog = GuidelineCatalog::new("test", "0", 2024);
        assert!(catalog.is_empty());
        let option = TreatmentOption {
            id: OptionId::PreOpVa,
            category: Category::Combination,
            citations: Vec::new(),
        };
        assert!(catalog.insert(option.clone()).is_none());
        assert_eq!(catalog.insert(option.clone()), Some(option));
        assert!(catalog.contains(OptionId::PreOpVa));
        assert!(catalog.remove(OptionId::PreOpVa).is_some());
        assert!(!catalog.contains(OptionId::PreOpVa));
    }
}
