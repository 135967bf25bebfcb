//! # Staging Classifier
//!
//! Pure functions from TNM inputs to a [`StagingResult`].
//!
//! | Path | Input | Table |
//! |------|-------|-------|
//! | [`classify_clinical`] | cTNM | [`RCC_TABLE`] |
//! | [`classify_pathological`] | pTNM + pathology | [`RCC_TABLE`] |
//! | [`classify_wilms`] | pTNM + pathology | [`WILMS_TABLE`] |
//!
//! Every path returns `None` for incomplete input and a `Stage::Unknown`
//! result, never an error, for input no row matches.

mod clinical;
mod pathological;
mod rules;
mod stage;
mod wilms;

pub use clinical::classify_clinical;
pub use pathological::classify_pathological;
pub use rules::{RCC_TABLE, RccRule, Rule, RuleId, RuleInput, RuleTable, WILMS_TABLE, WilmsRule};
pub use stage::{Stage, StagingResult};
pub use wilms::classify_wilms;
