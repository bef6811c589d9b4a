//! Plainsight codec: embeds payload bytes in carrier text and back.
//!
//! One payload bit per encodable token, carried by the case of the token's
//! first ASCII alphabetic character (uppercase = 1, lowercase = 0). Every
//! other character and all inter-token whitespace pass through untouched,
//! so the stego text keeps the carrier's visible word count. Tokens without
//! an ASCII letter are skipped on both sides and never count toward
//! capacity.

use thiserror::Error;

use super::carrier::{token_is_encodable, Corpus, Span};
use super::payload::{checksum, frame, CHECKSUM_SIZE, STEGO_VERSION};

/// Errors that can occur during plainsight encoding or decoding.
#[derive(Error, Debug)]
pub enum StegoError {
    /// The framed payload needs more bits than the carrier holds. Raised
    /// before any output is produced.
    #[error("Carrier capacity exceeded: payload needs {needed} bits, carrier holds {available}")]
    CapacityExceeded { needed: usize, available: usize },

    /// Truncated stego text, implausible length field, or checksum
    /// mismatch. The partially recovered payload is discarded.
    #[error("Stego payload failed its integrity check (corrupted or not stego text)")]
    IntegrityFailure,

    /// The frame carries a version tag this build does not understand.
    /// Plain, never-encoded text usually lands here with version 0.
    #[error("Unsupported stego format version: {0}")]
    UnsupportedVersion(u8),
}

/// Encodes a payload into the carrier, returning the stego text.
///
/// Fails with [`StegoError::CapacityExceeded`] before producing anything if
/// the framed payload does not fit.
pub fn encode(payload: &[u8], corpus: &Corpus) -> Result<String, StegoError> {
    let framed = frame(payload);
    let needed = framed.len() * 8;
    let available = corpus.capacity_bits();
    if needed > available {
        return Err(StegoError::CapacityExceeded { needed, available });
    }

    let mut bits = BitSource::new(&framed);
    let mut out = String::with_capacity(corpus.text().len());

    for span in corpus.spans() {
        match span {
            Span::Gap(gap) => out.push_str(gap),
            Span::Token(token) => {
                if token_is_encodable(token) {
                    if let Some(bit) = bits.next() {
                        push_token_with_bit(&mut out, token, bit);
                        continue;
                    }
                }
                // Unencodable token, or frame exhausted: pass through intact
                out.push_str(token);
            }
        }
    }

    Ok(out)
}

/// Decodes a payload from stego text.
///
/// Needs only the stego text: the embedded frame carries version, length,
/// and checksum. Decoding stops at the frame boundary, so trailing carrier
/// tokens are ignored.
pub fn decode(stego_text: &str) -> Result<Vec<u8>, StegoError> {
    let bits: Vec<bool> = stego_text
        .split_whitespace()
        .filter(|token| token_is_encodable(token))
        .map(token_bit)
        .collect();

    let mut cursor = BitCursor::new(&bits);

    let version = cursor.read_byte().ok_or(StegoError::IntegrityFailure)?;
    if version != STEGO_VERSION {
        return Err(StegoError::UnsupportedVersion(version));
    }

    let mut len_bytes = [0u8; 4];
    for byte in &mut len_bytes {
        *byte = cursor.read_byte().ok_or(StegoError::IntegrityFailure)?;
    }
    let len = u32::from_be_bytes(len_bytes) as usize;

    // Refuse a length the remaining text cannot possibly hold, before
    // allocating anything for it
    let needed_bits = len
        .checked_add(CHECKSUM_SIZE)
        .and_then(|n| n.checked_mul(8))
        .ok_or(StegoError::IntegrityFailure)?;
    if needed_bits > cursor.bits_left() {
        return Err(StegoError::IntegrityFailure);
    }

    let mut payload = Vec::with_capacity(len);
    for _ in 0..len {
        payload.push(cursor.read_byte().ok_or(StegoError::IntegrityFailure)?);
    }

    let mut found = [0u8; CHECKSUM_SIZE];
    for byte in &mut found {
        *byte = cursor.read_byte().ok_or(StegoError::IntegrityFailure)?;
    }

    if found != checksum(version, &payload) {
        return Err(StegoError::IntegrityFailure);
    }

    Ok(payload)
}

/// Rewrites a token so its first ASCII alphabetic character carries `bit`.
fn push_token_with_bit(out: &mut String, token: &str, bit: bool) {
    let mut carried = false;
    for c in token.chars() {
        if !carried && c.is_ascii_alphabetic() {
            out.push(if bit {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            });
            carried = true;
        } else {
            out.push(c);
        }
    }
}

/// Reads the bit carried by a token's first ASCII alphabetic character.
fn token_bit(token: &str) -> bool {
    token
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.is_ascii_uppercase())
        .unwrap_or(false)
}

/// Iterator over the bits of a byte slice, most significant bit first.
struct BitSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitSource<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl Iterator for BitSource<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let byte = *self.bytes.get(self.pos / 8)?;
        let bit = byte & (0x80 >> (self.pos % 8)) != 0;
        self.pos += 1;
        Some(bit)
    }
}

/// Reads whole bytes out of a recovered bit sequence.
struct BitCursor<'a> {
    bits: &'a [bool],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    fn new(bits: &'a [bool]) -> Self {
        Self { bits, pos: 0 }
    }

    fn bits_left(&self) -> usize {
        self.bits.len() - self.pos
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.bits_left() < 8 {
            return None;
        }
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | (self.bits[self.pos] as u8);
            self.pos += 1;
        }
        Some(byte)
    }
}
