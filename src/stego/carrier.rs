//! Carrier text handling for the plainsight codec.
//!
//! A carrier is ordinary user-supplied text. The codec walks its
//! whitespace-delimited tokens in order; a token can carry one payload bit
//! when it contains at least one ASCII alphabetic character. That predicate
//! never changes when a token's letter case changes, so encode and decode
//! always agree on which tokens count.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while loading a carrier.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read carrier file: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("Carrier file is not valid UTF-8 text")]
    NotText,
}

/// A span of carrier text: a whitespace run passed through untouched, or a
/// token that may carry a payload bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Span<'a> {
    Gap(&'a str),
    Token(&'a str),
}

/// User-supplied carrier text. Read-only to the codec.
#[derive(Debug, Clone)]
pub struct Corpus {
    text: String,
}

impl Corpus {
    /// Wraps carrier text supplied directly.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Loads a carrier from a text file.
    pub fn from_file(path: &Path) -> Result<Self, CorpusError> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|_| CorpusError::NotText)?;
        Ok(Self { text })
    }

    /// Returns the carrier text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of payload bits this carrier can hold, one per encodable
    /// token.
    pub fn capacity_bits(&self) -> usize {
        self.spans()
            .filter(|span| matches!(span, Span::Token(t) if token_is_encodable(t)))
            .count()
    }

    /// Walks the carrier as alternating whitespace and token spans,
    /// preserving every character.
    pub(crate) fn spans(&self) -> SpanIter<'_> {
        SpanIter { rest: &self.text }
    }
}

/// True when a token can carry one payload bit.
pub(crate) fn token_is_encodable(token: &str) -> bool {
    token.bytes().any(|b| b.is_ascii_alphabetic())
}

/// Iterator over alternating whitespace/token spans of a text.
pub(crate) struct SpanIter<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SpanIter<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        let first = self.rest.chars().next()?;
        let in_gap = first.is_whitespace();

        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != in_gap)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());

        let (span, rest) = self.rest.split_at(end);
        self.rest = rest;

        Some(if in_gap {
            Span::Gap(span)
        } else {
            Span::Token(span)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_preserve_every_character() {
        let corpus = Corpus::new("  The quick\tbrown\n\nfox  ");
        let rebuilt: String = corpus
            .spans()
            .map(|s| match s {
                Span::Gap(g) => g,
                Span::Token(t) => t,
            })
            .collect();

        assert_eq!(rebuilt, corpus.text());
    }

    #[test]
    fn test_capacity_counts_only_encodable_tokens() {
        // "123" and "--" carry no ASCII letter and are skipped
        let corpus = Corpus::new("The 123 quick -- brown fox");
        assert_eq!(corpus.capacity_bits(), 4);
    }

    #[test]
    fn test_capacity_empty_carrier() {
        assert_eq!(Corpus::new("").capacity_bits(), 0);
        assert_eq!(Corpus::new("   \n\t ").capacity_bits(), 0);
        assert_eq!(Corpus::new("123 456 !!").capacity_bits(), 0);
    }

    #[test]
    fn test_token_predicate_survives_case_changes() {
        assert!(token_is_encodable("word"));
        assert!(token_is_encodable("WORD"));
        assert!(token_is_encodable("wOrD,"));
        assert!(token_is_encodable("a1b2"));
        assert!(!token_is_encodable("1234"));
        assert!(!token_is_encodable("--"));
        // Non-ASCII letters alone cannot carry a bit
        assert!(!token_is_encodable("日本語"));
    }

    #[test]
    fn test_unicode_gaps_and_tokens() {
        let corpus = Corpus::new("café  niño\u{00a0}done");
        // Non-breaking space is whitespace; all three tokens have ASCII
        // letters
        assert_eq!(corpus.capacity_bits(), 3);
    }

    #[test]
    fn test_from_file_rejects_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carrier.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        assert!(matches!(
            Corpus::from_file(&path),
            Err(CorpusError::NotText)
        ));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carrier.txt");
        std::fs::write(&path, "plain text carrier").unwrap();

        let corpus = Corpus::from_file(&path).unwrap();
        assert_eq!(corpus.text(), "plain text carrier");
        assert_eq!(corpus.capacity_bits(), 3);
    }
}
