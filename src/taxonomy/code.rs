#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of `-`-separated segments in a well-formed type code.
const SEGMENT_COUNT: usize = 5;

/// A globally unique identifier for a taxonomy leaf, in the form
/// `{PREFIX}-{LEVEL}-{DOMAIN}-{STANDARD_SEQ}-{SEQ}`, e.g. `MA-H1-POLY-02-07`.
///
/// The two trailing segments are zero-padded decimal sequence numbers; the
/// leading three are uppercase alphanumeric labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeCode(String);

impl TypeCode {
    /// Parses and validates a raw string against the code grammar.
    pub fn parse(raw: &str) -> Result<Self, TypeCodeError> {
        let segments: Vec<&str> = raw.split('-').collect();
        if segments.len() != SEGMENT_COUNT {
            return Err(TypeCodeError::WrongSegmentCount {
                code:  raw.to_string(),
                found: segments.len(),
            });
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(TypeCodeError::EmptySegment(raw.to_string()));
        }
        for (idx, segment) in segments.iter().enumerate().skip(3) {
            if !segment.chars().all(|c| c.is_ascii_digit()) {
                return Err(TypeCodeError::NonNumericSequence {
                    code:    raw.to_string(),
                    segment: idx + 1,
                });
            }
        }

        Ok(Self(raw.to_string()))
    }

    /// Returns the full code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the bank-wide prefix segment.
    pub fn prefix(&self) -> &str {
        self.segment(0)
    }

    /// Returns the school-level segment.
    pub fn level(&self) -> &str {
        self.segment(1)
    }

    /// Returns the subject-domain segment.
    pub fn domain(&self) -> &str {
        self.segment(2)
    }

    /// Returns the achievement-standard sequence segment.
    pub fn standard_seq(&self) -> &str {
        self.segment(3)
    }

    /// Returns the per-standard sequence segment.
    pub fn seq(&self) -> &str {
        self.segment(4)
    }

    /// Returns the `idx`-th `-`-separated segment.
    ///
    /// Valid construction guarantees five segments, so this never panics for
    /// `idx < 5`.
    fn segment(&self, idx: usize) -> &str {
        self.0.split('-').nth(idx).unwrap_or_default()
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An enum to represent possible errors when parsing a type code.
#[derive(thiserror::Error, Debug)]
pub enum TypeCodeError {
    /// The code did not have exactly five `-`-separated segments.
    #[error("Type code `{code}` has {found} segments, expected 5.")]
    WrongSegmentCount {
        /// The offending code.
        code:  String,
        /// Number of segments found.
        found: usize,
    },
    /// One or more segments were empty.
    #[error("Type code `{0}` contains an empty segment.")]
    EmptySegment(String),
    /// A trailing sequence segment contained a non-digit character.
    #[error("Segment {segment} of type code `{code}` must be numeric.")]
    NonNumericSequence {
        /// The offending code.
        code:    String,
        /// 1-indexed position of the non-numeric segment.
        segment: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_code() {
        let code = TypeCode::parse("MA-H1-POLY-02-07").expect("parse");
        assert_eq!(code.prefix(), "MA");
        assert_eq!(code.level(), "H1");
        assert_eq!(code.domain(), "POLY");
        assert_eq!(code.standard_seq(), "02");
        assert_eq!(code.seq(), "07");
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(matches!(
            TypeCode::parse("MA-H1-POLY-02"),
            Err(TypeCodeError::WrongSegmentCount { found: 4, .. })
        ));
    }

    #[test]
    fn rejects_empty_segment() {
        assert!(matches!(
            TypeCode::parse("MA--POLY-02-07"),
            Err(TypeCodeError::EmptySegment(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_sequence() {
        assert!(matches!(
            TypeCode::parse("MA-H1-POLY-XX-07"),
            Err(TypeCodeError::NonNumericSequence { segment: 4, .. })
        ));
    }
}
