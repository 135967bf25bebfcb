//! # Formats
//!
//! Versioned encodings of engine data. The core only transforms bytes;
//! reading and writing files is the app's job.

mod snapshot;

#[cfg(feature = "crypto-hash")]
pub use snapshot::crypto_hash;
pub use snapshot::{
    HEADER_LEN, SnapshotHeader, catalog_from_bytes, catalog_to_bytes, fingerprint,
    fingerprint_hex,
};
