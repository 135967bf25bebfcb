//! # Catalog Snapshot Format
//!
//! Binary encoding of a [`GuidelineCatalog`].
//!
//! Format: Header (5 bytes) + postcard-serialized catalog.
//! - 4 bytes: Magic ("ONCO")
//! - 1 byte: Version
//!
//! Size and header are validated before the payload is decoded. File I/O
//! belongs to the app layer.

use crate::catalog::GuidelineCatalog;
use crate::primitives::{FORMAT_VERSION, MAGIC_BYTES, MAX_SNAPSHOT_PAYLOAD_SIZE};
use crate::types::OncoError;

/// Header length in bytes.
pub const HEADER_LEN: usize = 5;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

// =============================================================================
// HEADER
// =============================================================================

/// The snapshot header precedes the catalog payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl SnapshotHeader {
    /// Header for the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *MAGIC_BYTES,
            version: FORMAT_VERSION,
        }
    }

    pub fn validate(&self) -> Result<(), OncoError> {
        if &self.magic != MAGIC_BYTES {
            return Err(OncoError::DeserializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != FORMAT_VERSION {
            return Err(OncoError::DeserializationError(format!(
                "Unsupported snapshot version: {} (expected {})",
                self.version, FORMAT_VERSION
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, OncoError> {
        if bytes.len() < HEADER_LEN {
            return Err(OncoError::DeserializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ENCODE / DECODE
// =============================================================================

/// Encode a catalog (header + payload).
pub fn catalog_to_bytes(catalog: &GuidelineCatalog) -> Result<Vec<u8>, OncoError> {
    let payload = encode_payload(catalog)?;
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&SnapshotHeader::new().to_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode a catalog.
///
/// Rejects input shorter than the header, larger than
/// [`MAX_SNAPSHOT_PAYLOAD_SIZE`], or with a foreign header, before parsing.
pub fn catalog_from_bytes(bytes: &[u8]) -> Result<GuidelineCatalog, OncoError> {
    if bytes.len() < HEADER_LEN {
        return Err(OncoError::DeserializationError(format!(
            "Data too short: minimum {HEADER_LEN} bytes required"
        )));
    }
    if bytes.len() > MAX_SNAPSHOT_PAYLOAD_SIZE {
        return Err(OncoError::DeserializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_SNAPSHOT_PAYLOAD_SIZE
        )));
    }

    SnapshotHeader::from_bytes(bytes)?.validate()?;

    postcard::from_bytes(&bytes[HEADER_LEN..]).map_err(|e| {
        OncoError::DeserializationError(format!("Failed to decode catalog: {e}"))
    })
}

// =============================================================================
// FINGERPRINTS
// =============================================================================

/// Deterministic 64-bit fingerprint (FNV-1a) of the canonical payload.
///
/// Two catalogs with equal content always share a fingerprint, whatever
/// order their options were inserted in.
pub fn fingerprint(catalog: &GuidelineCatalog) -> Result<u64, OncoError> {
    let payload = encode_payload(catalog)?;
    Ok(payload.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    }))
}

/// Fingerprint formatted as 16 lowercase hex digits.
pub fn fingerprint_hex(catalog: &GuidelineCatalog) -> Result<String, OncoError> {
    fingerprint(catalog).map(|fp| format!("{fp:016x}"))
}

/// BLAKE3 digest of the canonical payload, as lowercase hex.
#[cfg(feature = "crypto-hash")]
pub fn crypto_hash(catalog: &GuidelineCatalog) -> Result<String, OncoError> {
    let payload = encode_payload(catalog)?;
    Ok(blake3::hash(&payload).to_hex().to_string())
}

fn encode_payload(catalog: &GuidelineCatalog) -> Result<Vec<u8>, OncoError> {
    postcard::to_stdvec(catalog).map_err(|e| OncoError::SerializationError(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OptionId;

    #[test]
    fn header_roundtrip() {
        let bytes = SnapshotHeader::new().to_bytes();
        let restored = SnapshotHeader::from_bytes(&bytes).expect("parse header");
        assert_eq!(restored, SnapshotHeader::new());
        assert!(restored.validate().is_ok());
    }

    #[test]
    fn snapshot_roundtrip_bit_exact() {
        let catalog = GuidelineCatalog::standard();
        let first = catalog_to_bytes(&catalog).expect("encode");
        let restored = catalog_from_bytes(&first).expect("decode");
        let second = catalog_to_bytes(&restored).expect("re-encode");
        assert_eq!(restored, catalog);
        assert_eq!(first, second, "encode -> decode -> encode must be identical");
    }

    #[test]
    fn fingerprint_is_stable_and_content_sensitive() {
        let catalog = GuidelineCatalog::standard();
        let a = fingerprint(&catalog).expect("fp");
        let b = fingerprint(&GuidelineCatalog::standard()).expect("fp");
        assert_eq!(a, b);

        let mut edited = catalog.clone();
        edited.remove(OptionId::RadiotherapyAbdominal);
        assert_ne!(a, fingerprint(&edited).expect("fp"));
        assert_eq!(fingerprint_hex(&catalog).expect("hex").len(), 16);
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = catalog_to_bytes(&GuidelineCatalog::standard()).expect("encode");
        bytes[0..4].copy_from_slice(b"KREM");
        assert!(catalog_from_bytes(&bytes).is_err());
    }

    #[test]
    fn future_version_rejected() {
        let mut bytes = catalog_to_bytes(&GuidelineCatalog::standard()).expect("encode");
        bytes[4] = FORMAT_VERSION + 1;
        assert!(matches!(
            catalog_from_bytes(&bytes),
            Err(OncoError::DeserializationError(_))
        ));
    }

    #[test]
    fn short_and_truncated_input_rejected() {
        assert!(catalog_from_bytes(b"ONC").is_err());
        let bytes = catalog_to_bytes(&GuidelineCatalog::standard()).expect("encode");
        assert!(catalog_from_bytes(&bytes[..bytes.len() / 2]).is_err());
    }

    #[cfg(feature = "crypto-hash")]
    #[test]
    fn crypto_hash_is_hex() {
        let digest = crypto_hash(&GuidelineCatalog::standard()).expect("hash");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
