//! # Engine Primitives
//!
//! Hardcoded constants for the oncostage engine.
//!
//! These are compiled into the binary and immutable at runtime. Changing any
//! of them changes clinical output and must go with a catalog version bump.

/// Lowest ISUP/WHO grade.
pub const MIN_GRADE: u8 = 1;

/// Highest ISUP/WHO grade.
pub const MAX_GRADE: u8 = 4;

/// Grades at or above this value count as high grade for adjuvant decisions.
pub const HIGH_GRADE_THRESHOLD: u8 = 3;

/// Magic bytes for the catalog snapshot header.
///
/// - Snapshot = Magic Bytes ("ONCO") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"ONCO";

/// Current snapshot format version.
///
/// Increment this when making breaking changes to the snapshot encoding.
pub const FORMAT_VERSION: u8 = 1;

/// Maximum accepted snapshot payload (4 MB).
///
/// A full catalog encodes to a few kilobytes; anything larger is corrupt.
pub const MAX_SNAPSHOT_PAYLOAD_SIZE: usize = 4 * 1024 * 1024;

/// Name of the built-in guideline snapshot.
pub const STANDARD_CATALOG_NAME: &str = "Renal tumors (adult RCC + pediatric Wilms)";

/// Version of the built-in guideline snapshot.
pub const STANDARD_CATALOG_VERSION: &str = "2024.4";

/// Year the built-in snapshot's newest guideline was published.
pub const STANDARD_CATALOG_YEAR: u16 = 2024;
