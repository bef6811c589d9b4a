//! Self-describing payload frame for the plainsight codec.
//!
//! Layout: version (1 byte) || payload length (u32, big-endian) || payload
//! bytes || checksum (first 4 bytes of SHA-256 over everything before it).
//! The frame makes decoding self-terminating and self-verifying: the stego
//! text alone is enough to recover and check the payload.

use sha2::{Digest, Sha256};

/// Current frame format version.
pub const STEGO_VERSION: u8 = 1;

/// Truncated-SHA-256 checksum size in bytes.
pub(crate) const CHECKSUM_SIZE: usize = 4;

/// Bytes of frame overhead around the payload.
pub const FRAME_OVERHEAD: usize = 1 + 4 + CHECKSUM_SIZE;

/// Computes the frame checksum over version, length, and payload.
pub(crate) fn checksum(version: u8, payload: &[u8]) -> [u8; CHECKSUM_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update([version]);
    hasher.update((payload.len() as u32).to_be_bytes());
    hasher.update(payload);
    let digest = hasher.finalize();

    let mut out = [0u8; CHECKSUM_SIZE];
    out.copy_from_slice(&digest[..CHECKSUM_SIZE]);
    out
}

/// Wraps payload bytes in the self-describing frame.
pub(crate) fn frame(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + FRAME_OVERHEAD);
    out.push(STEGO_VERSION);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&checksum(STEGO_VERSION, payload));
    out
}
