//! Content-derived identities for declared zones and records.
use sha2::{Digest, Sha256};

/// Derive a stable identifier from a natural key.
///
/// The output is the lowercase hex SHA-256 digest of the key (64 chars),
/// so equal keys always map to the same identity regardless of any other
/// desired-state field.
pub fn derive(natural_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(natural_key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Fully-qualified name of a record: `domain.zone`.
pub fn fqdn(domain: &str, zone: &str) -> String {
    format!("{}.{}", domain, zone)
}
