//! # oncostage-core
//!
//! The deterministic staging and treatment recommendation engine for renal
//! tumors - THE LOGIC.
//!
//! This crate maps structured clinical inputs (TNM, pathology attributes)
//! to an anatomic stage and a guideline-based set of treatment options. It
//! is a versioned rule evaluator over a fixed guideline snapshot, not a
//! diagnostic system.
//!
//! ## Data Flow
//!
//! ```text
//! TnmData / PostOpTnmData + PathologyData
//!     -> staging (rule tables)          -> StagingResult
//!     -> recommend (catalog by ref)     -> TreatmentRecommendation (OptionIds)
//!     -> locale (TextCatalog)           -> display text
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure: no I/O, no clock, no randomness, no global mutable state
//! - Deterministic: BTreeMap only, integer arithmetic only
//! - Total over input: incomplete input gives `None`, unmatched input gives
//!   an explicit Unknown stage; neither is an error
//! - The guideline catalog is passed in by reference, never looked up

// =============================================================================
// MODULES
// =============================================================================

pub mod case;
pub mod catalog;
pub mod formats;
pub mod locale;
pub mod primitives;
pub mod recommend;
pub mod severity;
pub mod staging;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Grade, Histology, MCategory, MarginStatus, NCategory, OncoError, PathologyData,
    PostOpTnmData, TCategory, TnmData, TumorData, WilmsRisk, WilmsSubtype,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use case::{Assessment, CancerType, CaseData, CaseType, evaluate};
pub use catalog::{
    Category, Citation, GuidelineCatalog, GuidelineReference, GuidelineSource, OptionId,
    TreatmentOption,
};
pub use locale::{Locale, OptionText, TextCatalog};
pub use recommend::{Bucket, Rationale, Recommender, Tier, TreatmentRecommendation};
pub use severity::Severity;
pub use staging::{
    RuleId, Stage, StagingResult, classify_clinical, classify_pathological, classify_wilms,
};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{SnapshotHeader, catalog_from_bytes, catalog_to_bytes, fingerprint};
