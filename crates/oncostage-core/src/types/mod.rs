//! # Core Type Definitions
//!
//! This module contains the input types the form layer hands to the engine:
//! - TNM code axes (`TCategory`, `NCategory`, `MCategory`)
//! - Clinical and pathological TNM inputs (`TnmData`, `PostOpTnmData`)
//! - Tumor and pathology attributes (`TumorData`, `PathologyData`)
//! - Error types (`OncoError`)
//!
//! Field names serialise in camelCase so a case-store JSON record can be
//! read directly.

mod tnm;

pub use tnm::{MCategory, NCategory, TCategory};

use crate::catalog::OptionId;
use crate::primitives::{HIGH_GRADE_THRESHOLD, MAX_GRADE, MIN_GRADE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// TNM INPUTS
// =============================================================================

/// Clinical (pre-operative) TNM as entered by the clinician.
///
/// Codes are kept raw; the classifier parses them. All three must be
/// present for staging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TnmData {
    pub t: Option<String>,
    pub n: Option<String>,
    pub m: Option<String>,
}

impl TnmData {
    /// Create a complete clinical TNM triple.
    #[must_use]
    pub fn new(t: impl Into<String>, n: impl Into<String>, m: impl Into<String>) -> Self {
        Self {
            t: Some(t.into()),
            n: Some(n.into()),
            m: Some(m.into()),
        }
    }

    /// Typed T code, if present and recognised.
    #[must_use]
    pub fn t_category(&self) -> Option<TCategory> {
        self.t.as_deref().and_then(TCategory::parse)
    }
}

/// Pathological (post-operative) pTNM from the surgical specimen.
///
/// `pM` is optional; an absent value is read as `pM0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostOpTnmData {
    #[serde(rename = "pT")]
    pub p_t: Option<String>,
    #[serde(rename = "pN")]
    pub p_n: Option<String>,
    #[serde(rename = "pM")]
    pub p_m: Option<String>,
}

impl PostOpTnmData {
    /// Create a pTNM input without a pM value.
    #[must_use]
    pub fn new(p_t: impl Into<String>, p_n: impl Into<String>) -> Self {
        Self {
            p_t: Some(p_t.into()),
            p_n: Some(p_n.into()),
            p_m: None,
        }
    }

    /// Set the pM value.
    #[must_use]
    pub fn with_p_m(mut self, p_m: impl Into<String>) -> Self {
        self.p_m = Some(p_m.into());
        self
    }
}

// =============================================================================
// GRADE
// =============================================================================

/// ISUP/WHO nuclear grade, 1 to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    /// Create a grade, rejecting values outside 1..=4.
    pub fn new(value: u8) -> Result<Self, OncoError> {
        if (MIN_GRADE..=MAX_GRADE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(OncoError::InvalidGrade(value))
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Grade 3 or 4.
    #[must_use]
    pub const fn is_high(self) -> bool {
        self.0 >= HIGH_GRADE_THRESHOLD
    }
}

impl TryFrom<u8> for Grade {
    type Error = OncoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_GRADE)
    }
}

// =============================================================================
// HISTOLOGY
// =============================================================================

/// SIOP-RTSG histologic risk group for Wilms tumor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WilmsRisk {
    Low,
    Intermediate,
    High,
}

impl WilmsRisk {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            WilmsRisk::Low => "Low risk",
            WilmsRisk::Intermediate => "Intermediate risk",
            WilmsRisk::High => "High risk",
        }
    }
}

/// Tumor histology as selected on the form.
///
/// The three `Wilms*` variants carry the SIOP-RTSG risk group directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Histology {
    #[serde(rename = "clearCell")]
    ClearCell,
    #[serde(rename = "papillary")]
    Papillary,
    #[serde(rename = "chromophobe")]
    Chromophobe,
    #[serde(rename = "sarcomatoid")]
    Sarcomatoid,
    #[serde(rename = "other")]
    Other,
    #[serde(rename = "wilms-low")]
    WilmsLow,
    #[serde(rename = "wilms-intermediate")]
    WilmsIntermediate,
    #[serde(rename = "wilms-high")]
    WilmsHigh,
    #[serde(rename = "mesoblastic")]
    Mesoblastic,
}

impl Histology {
    pub const ALL: [Histology; 9] = [
        Histology::ClearCell,
        Histology::Papillary,
        Histology::Chromophobe,
        Histology::Sarcomatoid,
        Histology::Other,
        Histology::WilmsLow,
        Histology::WilmsIntermediate,
        Histology::WilmsHigh,
        Histology::Mesoblastic,
    ];

    /// Form value, as stored in case records.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Histology::ClearCell => "clearCell",
            Histology::Papillary => "papillary",
            Histology::Chromophobe => "chromophobe",
            Histology::Sarcomatoid => "sarcomatoid",
            Histology::Other => "other",
            Histology::WilmsLow => "wilms-low",
            Histology::WilmsIntermediate => "wilms-intermediate",
            Histology::WilmsHigh => "wilms-high",
            Histology::Mesoblastic => "mesoblastic",
        }
    }

    /// Human-readable name used in staging factors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Histology::ClearCell => "Clear cell RCC",
            Histology::Papillary => "Papillary RCC",
            Histology::Chromophobe => "Chromophobe RCC",
            Histology::Sarcomatoid => "Sarcomatoid RCC",
            Histology::Other => "Other",
            Histology::WilmsLow => "Wilms tumor, low risk",
            Histology::WilmsIntermediate => "Wilms tumor, intermediate risk",
            Histology::WilmsHigh => "Wilms tumor, high risk",
            Histology::Mesoblastic => "Congenital mesoblastic nephroma",
        }
    }

    #[must_use]
    pub const fn is_clear_cell(self) -> bool {
        matches!(self, Histology::ClearCell)
    }

    /// Risk group carried by the Wilms histology variants.
    #[must_use]
    pub const fn wilms_risk(self) -> Option<WilmsRisk> {
        match self {
            Histology::WilmsLow => Some(WilmsRisk::Low),
            Histology::WilmsIntermediate => Some(WilmsRisk::Intermediate),
            Histology::WilmsHigh => Some(WilmsRisk::High),
            _ => None,
        }
    }
}

impl FromStr for Histology {
    type Err = OncoError;

    /// Accepts the form key (`clearCell`, `wilms-high`) case-insensitively,
    /// plus the kebab spelling `clear-cell`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("clear-cell") {
            return Ok(Histology::ClearCell);
        }
        Self::ALL
            .into_iter()
            .find(|h| h.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| OncoError::InvalidValue {
                field: "histology",
                value: s.to_string(),
            })
    }
}

/// Detailed Wilms subtype after pre-operative chemotherapy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WilmsSubtype {
    Necrotic,
    Epithelial,
    Stromal,
    Mixed,
    Regressive,
    Blastemal,
    Anaplastic,
}

impl WilmsSubtype {
    /// SIOP-RTSG risk group of this subtype.
    #[must_use]
    pub const fn risk(self) -> WilmsRisk {
        match self {
            WilmsSubtype::Necrotic => WilmsRisk::Low,
            WilmsSubtype::Epithelial
            | WilmsSubtype::Stromal
            | WilmsSubtype::Mixed
            | WilmsSubtype::Regressive => WilmsRisk::Intermediate,
            WilmsSubtype::Blastemal | WilmsSubtype::Anaplastic => WilmsRisk::High,
        }
    }

    /// Form value, as stored in case records.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            WilmsSubtype::Necrotic => "necrotic",
            WilmsSubtype::Epithelial => "epithelial",
            WilmsSubtype::Stromal => "stromal",
            WilmsSubtype::Mixed => "mixed",
            WilmsSubtype::Regressive => "regressive",
            WilmsSubtype::Blastemal => "blastemal",
            WilmsSubtype::Anaplastic => "anaplastic",
        }
    }

    /// Human-readable name used in staging factors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            WilmsSubtype::Necrotic => "Completely necrotic",
            WilmsSubtype::Epithelial => "Epithelial type",
            WilmsSubtype::Stromal => "Stromal type",
            WilmsSubtype::Mixed => "Mixed type",
            WilmsSubtype::Regressive => "Regressive type",
            WilmsSubtype::Blastemal => "Blastemal type",
            WilmsSubtype::Anaplastic => "Diffuse anaplasia",
        }
    }
}

impl FromStr for WilmsSubtype {
    type Err = OncoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            WilmsSubtype::Necrotic,
            WilmsSubtype::Epithelial,
            WilmsSubtype::Stromal,
            WilmsSubtype::Mixed,
            WilmsSubtype::Regressive,
            WilmsSubtype::Blastemal,
            WilmsSubtype::Anaplastic,
        ]
        .into_iter()
        .find(|w| w.key().eq_ignore_ascii_case(s))
        .ok_or_else(|| OncoError::InvalidValue {
            field: "wilms type",
            value: s.to_string(),
        })
    }
}

/// Surgical margin status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginStatus {
    Negative,
    Positive,
    Close,
}

impl FromStr for MarginStatus {
    type Err = OncoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "negative" => Ok(MarginStatus::Negative),
            "positive" => Ok(MarginStatus::Positive),
            "close" => Ok(MarginStatus::Close),
            _ => Err(OncoError::InvalidValue {
                field: "margin",
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// TUMOR & PATHOLOGY
// =============================================================================

/// Pre-operative tumor attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TumorData {
    /// Largest diameter in millimetres; `size` in centimetres on the wire.
    #[serde(rename = "size", with = "size_cm")]
    pub size_mm: Option<u32>,
    pub grade: Option<Grade>,
    pub histology: Option<Histology>,
}

/// Pathology report attributes from the resected specimen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathologyData {
    pub histology: Option<Histology>,
    pub grade: Option<Grade>,
    /// Measured tumor size in millimetres; `tumorSize` in centimetres on
    /// the wire.
    #[serde(rename = "tumorSize", with = "size_cm")]
    pub tumor_size_mm: Option<u32>,
    pub margin_status: Option<MarginStatus>,
    pub vascular_invasion: bool,
    /// Lymphovascular invasion.
    pub lymph_node_invasion: bool,
    pub sarcomatoid_features: bool,
    pub necrosis: bool,
    // Pediatric
    pub is_ruptured: bool,
    pub is_bilateral: bool,
    pub wilms_type: Option<WilmsSubtype>,
}

impl PathologyData {
    #[must_use]
    pub fn has_positive_margin(&self) -> bool {
        self.margin_status == Some(MarginStatus::Positive)
    }

    #[must_use]
    pub fn is_clear_cell(&self) -> bool {
        self.histology.is_some_and(Histology::is_clear_cell)
    }

    /// Adverse features that warrant adjuvant therapy after nephrectomy:
    /// sarcomatoid features, vascular invasion, positive margin or grade ≥3.
    #[must_use]
    pub fn is_high_risk(&self) -> bool {
        self.sarcomatoid_features
            || self.vascular_invasion
            || self.has_positive_margin()
            || self.grade.is_some_and(Grade::is_high)
    }

    /// Wilms risk group: the histology tier if set, else derived from subtype.
    #[must_use]
    pub fn wilms_risk(&self) -> Option<WilmsRisk> {
        self.histology
            .and_then(Histology::wilms_risk)
            .or_else(|| self.wilms_type.map(WilmsSubtype::risk))
    }
}

// =============================================================================
// SIZE
// =============================================================================

/// Serde adapter for sizes the case store records as decimal centimetres.
///
/// Sizes are held as whole millimetres, rounded half up. Conversion works on
/// the decimal text of the number, so no float arithmetic is involved.
pub(crate) mod size_cm {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(size_mm: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match *size_mm {
            None => serializer.serialize_none(),
            Some(mm) if mm % 10 == 0 => serializer.serialize_some(&(mm / 10)),
            Some(mm) => {
                let cm: f64 = format!("{}.{}", mm / 10, mm % 10)
                    .parse()
                    .map_err(serde::ser::Error::custom)?;
                serializer.serialize_some(&cm)
            }
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        deserializer.deserialize_option(CentimetreVisitor)
    }

    /// Whole millimetres from decimal centimetre text such as `"4.55"`.
    pub(crate) fn parse_cm(text: &str) -> Option<u32> {
        let text = text.trim();
        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let whole: u32 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut digits = fraction.bytes().map(|b| u32::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let round_up = u32::from(digits.next().is_some_and(|d| d >= 5));

        whole.checked_mul(10)?.checked_add(tenths)?.checked_add(round_up)
    }

    struct CentimetreVisitor;

    impl<'de> Visitor<'de> for CentimetreVisitor {
        type Value = Option<u32>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative size in centimetres, or null")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            u32::try_from(v)
                .ok()
                .and_then(|cm| cm.checked_mul(10))
                .map(Some)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            let cm = u64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))?;
            self.visit_u64(cm)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            parse_cm(&v.to_string())
                .map(Some)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Float(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            if v.trim().is_empty() {
                return Ok(None);
            }
            parse_cm(v)
                .map(Some)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the oncostage engine.
///
/// Incomplete or unclassifiable staging input is NOT an error: the
/// classifier returns `None` or an Unknown stage. These variants cover
/// catalog integrity, value construction and I/O at the edges.
#[derive(Debug, Error)]
pub enum OncoError {
    /// A grade outside 1..=4.
    #[error("Invalid ISUP/WHO grade: {0} (expected 1-4)")]
    InvalidGrade(u8),

    /// A categorical value that does not match any known option.
    #[error("Invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    /// The case has no cancer type, so no rule set applies.
    #[error("Cancer type not set on case")]
    CancerTypeMissing,

    /// The recommender selected an option the supplied catalog lacks.
    #[error("Treatment option missing from catalog: {0}")]
    OptionMissing(OptionId),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_bounds() {
        assert!(Grade::new(0).is_err());
        assert!(Grade::new(5).is_err());
        assert_eq!(Grade::new(4).map(Grade::value).ok(), Some(4));
        assert!(matches!(Grade::new(7), Err(OncoError::InvalidGrade(7))));
    }

    #[test]
    fn grade_high_threshold() {
        assert!(!Grade::new(2).is_ok_and(Grade::is_high));
        assert!(Grade::new(3).is_ok_and(Grade::is_high));
    }

    #[test]
    fn grade_rejected_on_deserialize() {
        let parsed: Result<TumorData, _> = serde_json::from_str(r#"{"grade":9}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn histology_from_str() {
        assert_eq!("clearCell".parse::<Histology>().ok(), Some(Histology::ClearCell));
        assert_eq!("clear-cell".parse::<Histology>().ok(), Some(Histology::ClearCell));
        assert_eq!("WILMS-HIGH".parse::<Histology>().ok(), Some(Histology::WilmsHigh));
        assert!("oncocytoma".parse::<Histology>().is_err());
    }

    #[test]
    fn high_risk_features() {
        let mut pathology = PathologyData::default();
        assert!(!pathology.is_high_risk());

        pathology.margin_status = Some(MarginStatus::Close);
        assert!(!pathology.is_high_risk());

        pathology.margin_status = Some(MarginStatus::Positive);
        assert!(pathology.is_high_risk());

        let graded = PathologyData {
            grade: Grade::new(3).ok(),
            ..PathologyData::default()
        };
        assert!(graded.is_high_risk());
    }

    #[test]
    fn wilms_risk_prefers_histology_tier() {
        let pathology = PathologyData {
            histology: Some(Histology::WilmsLow),
            wilms_type: Some(WilmsSubtype::Blastemal),
            ..PathologyData::default()
        };
        assert_eq!(pathology.wilms_risk(), Some(WilmsRisk::Low));

        let subtype_only = PathologyData {
            wilms_type: Some(WilmsSubtype::Blastemal),
            ..PathologyData::default()
        };
        assert_eq!(subtype_only.wilms_risk(), Some(WilmsRisk::High));
    }

    #[test]
    fn pathology_reads_case_store_json() {
        let json = r#"{"histology":"clearCell","grade":4,"marginStatus":"positive","vascularInvasion":true}"#;
        let pathology: PathologyData = serde_json::from_str(json).expect("parse");
        assert!(pathology.is_clear_cell());
        assert!(pathology.has_positive_margin());
        assert!(!pathology.necrosis);
    }

    #[test]
    fn sizes_read_as_centimetres() {
        let json = r#"{"size":4.5,"grade":2}"#;
        let tumor: TumorData = serde_json::from_str(json).expect("parse");
        assert_eq!(tumor.size_mm, Some(45));

        let pathology: PathologyData =
            serde_json::from_str(r#"{"tumorSize":7}"#).expect("parse");
        assert_eq!(pathology.tumor_size_mm, Some(70));

        let empty: TumorData = serde_json::from_str(r#"{"size":null}"#).expect("parse");
        assert_eq!(empty.size_mm, None);

        assert!(serde_json::from_str::<TumorData>(r#"{"size":-1.5}"#).is_err());
    }

    #[test]
    fn sizes_written_as_centimetres() {
        let tumor = TumorData {
            size_mm: Some(32),
            ..TumorData::default()
        };
        let json = serde_json::to_string(&tumor).expect("json");
        assert!(json.contains(r#""size":3.2"#));
        assert!(!json.contains("sizeMm"));

        let whole = TumorData {
            size_mm: Some(40),
            ..TumorData::default()
        };
        assert!(serde_json::to_string(&whole).expect("json").contains(r#""size":4"#));
    }

    #[test]
    fn centimetre_text_rounds_to_millimetres() {
        assert_eq!(size_cm::parse_cm("4.5"), Some(45));
        assert_eq!(size_cm::parse_cm("4.55"), Some(46));
        assert_eq!(size_cm::parse_cm("4.549"), Some(45));
        assert_eq!(size_cm::parse_cm(".7"), Some(7));
        assert_eq!(size_cm::parse_cm("12"), Some(120));
        assert_eq!(size_cm::parse_cm("-1"), None);
        assert_eq!(size_cm::parse_cm("4,5"), None);
        assert_eq!(size_cm::parse_cm("."), None);
    }

    #[test]
    fn wilms_subtype_parsing_and_names() {
        assert_eq!("Blastemal".parse::<WilmsSubtype>().ok(), Some(WilmsSubtype::Blastemal));
        assert!("rhabdoid".parse::<WilmsSubtype>().is_err());
        assert_eq!(WilmsSubtype::Anaplastic.name(), "Diffuse anaplasia");
        assert_eq!(WilmsSubtype::Necrotic.risk(), WilmsRisk::Low);
    }

    #[test]
    fn post_op_tnm_field_names() {
        let json = r#"{"pT":"pT1a","pN":"pN0"}"#;
        let tnm: PostOpTnmData = serde_json::from_str(json).expect("parse");
        assert_eq!(tnm, PostOpTnmData::new("pT1a", "pN0"));
    }
}
