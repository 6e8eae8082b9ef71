//! SHA-256 checksums in the canonical `sha256:<hex>` form
//!
//! Used to report whether a patch actually changed a file.

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

/// Checksum of raw bytes.
pub fn checksum_bytes(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    format!("{}{:x}", PREFIX, digest)
}

/// Checksum of text content.
pub fn checksum_text(content: &str) -> String {
    checksum_bytes(content.as_bytes())
}
