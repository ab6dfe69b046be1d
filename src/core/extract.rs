//! Path extraction over a value tree
//!
//! A path is split on `/`. A segment of the form `[N]` (N made of ASCII
//! digits only) indexes into a sequence; every other segment is a mapping
//! key. Empty segments are ordinary keys, so `""` or `a//b` only resolve
//! against a mapping that really has an empty key.
//!
//! Any other bracketed segment, such as `[-1]` or `[x]`, is rejected as an
//! invalid index. A response key literally named like that cannot be
//! addressed. Segments are parsed as they are reached, so the first failing
//! segment along the path determines the error.

use crate::core::value::{Value, ValueKind};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static INDEX_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([0-9]+)\]$").expect("valid index regex"));

/// Why a path could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("index {index} out of range for sequence of length {length}")]
    IndexOutOfRange { index: usize, length: usize },

    #[error("segment '{segment}' expects a {expected} but found a {found}")]
    TypeMismatch {
        segment: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("invalid sequence index: {0}")]
    InvalidIndex(String),
}

/// One parsed path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

/// Parse a single path segment
pub fn parse_segment(segment: &str) -> Result<Segment<'_>, ExtractionError> {
    if let Some(caps) = INDEX_SEGMENT.captures(segment) {
        return caps[1]
            .parse::<usize>()
            .map(Segment::Index)
            .map_err(|_| ExtractionError::InvalidIndex(segment.to_string()));
    }

    // Looks like an index but is not a non-negative integer, e.g. `[-1]`
    if segment.len() > 2 && segment.starts_with('[') && segment.ends_with(']') {
        return Err(ExtractionError::InvalidIndex(segment.to_string()));
    }

    Ok(Segment::Key(segment))
}

/// Resolve `path` against `root`
pub fn extract<'v>(root: &'v Value, path: &str) -> Result<&'v Value, ExtractionError> {
    let mut current = root;

    for raw in path.split('/') {
        current = match (parse_segment(raw)?, current) {
            (Segment::Key(key), Value::Mapping(map)) => map
                .get(key)
                .ok_or_else(|| ExtractionError::KeyNotFound(key.to_string()))?,
            (Segment::Index(index), Value::Sequence(items)) => {
                items.get(index).ok_or(ExtractionError::IndexOutOfRange {
                    index,
                    length: items.len(),
                })?
            }
            (Segment::Key(_), other) => {
                return Err(ExtractionError::TypeMismatch {
                    segment: raw.to_string(),
                    expected: ValueKind::Mapping,
                    found: other.kind(),
                })
            }
            (Segment::Index(_), other) => {
                return Err(ExtractionError::TypeMismatch {
                    segment: raw.to_string(),
                    expected: ValueKind::Sequence,
                    found: other.kind(),
                })
            }
        };
    }

    Ok(current)
}
