//! # TNM Code Axes
//!
//! Closed enums for the three TNM axes (AJCC 8th edition, renal tumors).
//!
//! Raw codes arrive as strings from the form layer. They are parsed
//! case-insensitively into these enums; the pathological family (`pT1a`,
//! `pN0`, `pM1`) is accepted through the `parse_pathological` constructors,
//! which strip a single leading `p`. A string that does not parse yields
//! `None` and is carried as "unrecognised" by the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strip a single leading `p`/`P` from a pathological code.
fn strip_pathological_prefix(raw: &str) -> &str {
    raw.strip_prefix('p')
        .or_else(|| raw.strip_prefix('P'))
        .unwrap_or(raw)
}

// =============================================================================
// T AXIS
// =============================================================================

/// Primary tumor category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TCategory {
    #[serde(rename = "TX")]
    Tx,
    T0,
    T1,
    T1a,
    T1b,
    T2,
    T2a,
    T2b,
    T3,
    T3a,
    T3b,
    T3c,
    T4,
}

impl TCategory {
    /// Every T category, in AJCC order.
    pub const ALL: [TCategory; 13] = [
        TCategory::Tx,
        TCategory::T0,
        TCategory::T1,
        TCategory::T1a,
        TCategory::T1b,
        TCategory::T2,
        TCategory::T2a,
        TCategory::T2b,
        TCategory::T3,
        TCategory::T3a,
        TCategory::T3b,
        TCategory::T3c,
        TCategory::T4,
    ];

    /// Parse a clinical T code (`"T1a"`, `"t3b"`, ...).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(raw))
    }

    /// Parse a pathological T code (`"pT1a"`); a missing prefix is tolerated.
    #[must_use]
    pub fn parse_pathological(raw: &str) -> Option<Self> {
        Self::parse(strip_pathological_prefix(raw))
    }

    /// Canonical code text.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            TCategory::Tx => "TX",
            TCategory::T0 => "T0",
            TCategory::T1 => "T1",
            TCategory::T1a => "T1a",
            TCategory::T1b => "T1b",
            TCategory::T2 => "T2",
            TCategory::T2a => "T2a",
            TCategory::T2b => "T2b",
            TCategory::T3 => "T3",
            TCategory::T3a => "T3a",
            TCategory::T3b => "T3b",
            TCategory::T3c => "T3c",
            TCategory::T4 => "T4",
        }
    }

    /// T1, T1a or T1b.
    #[must_use]
    pub const fn is_t1(self) -> bool {
        matches!(self, TCategory::T1 | TCategory::T1a | TCategory::T1b)
    }

    /// T2, T2a or T2b.
    #[must_use]
    pub const fn is_t2(self) -> bool {
        matches!(self, TCategory::T2 | TCategory::T2a | TCategory::T2b)
    }

    /// T3, T3a, T3b or T3c.
    #[must_use]
    pub const fn is_t3(self) -> bool {
        matches!(
            self,
            TCategory::T3 | TCategory::T3a | TCategory::T3b | TCategory::T3c
        )
    }

    /// Tumor confined to the kidney (T1 or T2 family).
    #[must_use]
    pub const fn is_organ_confined(self) -> bool {
        self.is_t1() || self.is_t2()
    }
}

impl fmt::Display for TCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// N AXIS
// =============================================================================

/// Regional lymph node category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NCategory {
    #[serde(rename = "NX")]
    Nx,
    N0,
    N1,
}

impl NCategory {
    pub const ALL: [NCategory; 3] = [NCategory::Nx, NCategory::N0, NCategory::N1];

    /// Parse a clinical N code.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|n| n.code().eq_ignore_ascii_case(raw))
    }

    /// Parse a pathological N code (`"pN0"`).
    #[must_use]
    pub fn parse_pathological(raw: &str) -> Option<Self> {
        Self::parse(strip_pathological_prefix(raw))
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            NCategory::Nx => "NX",
            NCategory::N0 => "N0",
            NCategory::N1 => "N1",
        }
    }
}

impl fmt::Display for NCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// M AXIS
// =============================================================================

/// Distant metastasis category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MCategory {
    #[serde(rename = "MX")]
    Mx,
    M0,
    M1,
}

impl MCategory {
    pub const ALL: [MCategory; 3] = [MCategory::Mx, MCategory::M0, MCategory::M1];

    /// Parse a clinical M code.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(raw))
    }

    /// Parse a pathological M code (`"pM1"`).
    #[must_use]
    pub fn parse_pathological(raw: &str) -> Option<Self> {
        Self::parse(strip_pathological_prefix(raw))
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            MCategory::Mx => "MX",
            MCategory::M0 => "M0",
            MCategory::M1 => "M1",
        }
    }
}

impl fmt::Display for MCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// TESTS
// =============================================================================
