//! Polymorphic resolution
//!
//! Several protocol values can only be classified by trying each candidate shape
//! in turn (a redirect URI, a JWT, a set of client credentials). Each such type
//! declares its candidates as a `const` table of [`Candidate`]s; [`resolve_ordered`]
//! walks the table front to back and returns the first variant that accepts the
//! input. The table order is part of the type's contract: when two candidates
//! both accept a value, the earlier one always wins.
//!
//! Envelopes that carry an explicit discriminator (`grant_type`, `active`) use
//! [`tag_field`] instead and dispatch on its value directly.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

/// Resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No candidate accepted the input
    #[error("Unknown {type_name} type (tried: {})", .tried.join(", "))]
    NoMatch {
        type_name: &'static str,
        tried: Vec<&'static str>,
    },

    /// The discriminator field is missing or not a string/boolean
    #[error("{type_name} is missing the '{field}' discriminator")]
    MissingTag {
        type_name: &'static str,
        field: &'static str,
    },

    /// The discriminator names no known variant
    #[error("Unknown {type_name} type '{tag}'")]
    UnknownTag { type_name: &'static str, tag: String },
}

/// One entry in an ordered resolution table
pub struct Candidate<I: ?Sized, T> {
    /// Variant name, used in logs and errors
    pub name: &'static str,
    /// Attempt to build the variant from the input
    pub attempt: fn(&I) -> Option<T>,
}

/// Return the first candidate's result that accepts `input`
///
/// # Errors
///
/// Returns [`ResolveError::NoMatch`] listing every candidate tried.
pub fn resolve_ordered<I: ?Sized, T>(
    type_name: &'static str,
    input: &I,
    candidates: &[Candidate<I, T>],
) -> Result<T, ResolveError> {
    for candidate in candidates {
        if let Some(value) = (candidate.attempt)(input) {
            trace!(type_name, variant = candidate.name, "resolved");
            return Ok(value);
        }
        trace!(type_name, variant = candidate.name, "candidate rejected");
    }

    debug!(type_name, "no candidate accepted the input");
    Err(ResolveError::NoMatch {
        type_name,
        tried: candidates.iter().map(|c| c.name).collect(),
    })
}

/// Read a string discriminator from a JSON object
///
/// # Errors
///
/// Returns [`ResolveError::MissingTag`] when `field` is absent or not a string.
pub fn tag_field<'v>(
    type_name: &'static str,
    value: &'v Value,
    field: &'static str,
) -> Result<&'v str, ResolveError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .ok_or(ResolveError::MissingTag { type_name, field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    enum Shape {
        Short(usize),
        Any(String),
    }

    const SHAPES: &[Candidate<str, Shape>] = &[
        Candidate {
            name: "short",
            attempt: |s| (s.len() < 4).then(|| Shape::Short(s.len())),
        },
        Candidate {
            name: "any",
            attempt: |s| (!s.is_empty()).then(|| Shape::Any(s.to_string())),
        },
    ];

    #[test]
    fn test_first_accepting_candidate_wins() {
        // "abc" is accepted by both candidates
        assert_eq!(resolve_ordered("Shape", "abc", SHAPES), Ok(Shape::Short(3)));
        assert_eq!(
            resolve_ordered("Shape", "abcdef", SHAPES),
            Ok(Shape::Any("abcdef".to_string()))
        );
    }

    #[test]
    fn test_no_match_lists_candidates() {
        let err = resolve_ordered("Shape", "", SHAPES).unwrap_err();
        assert_eq!(
            err,
            ResolveError::NoMatch {
                type_name: "Shape",
                tried: vec!["short", "any"],
            }
        );
        assert_eq!(err.to_string(), "Unknown Shape type (tried: short, any)");
    }

    #[test]
    fn test_tag_field() {
        let value = json!({"grant_type": "password", "n": 1});
        assert_eq!(tag_field("T", &value, "grant_type"), Ok("password"));
        assert!(matches!(
            tag_field("T", &value, "n"),
            Err(ResolveError::MissingTag { field: "n", .. })
        ));
        assert!(matches!(
            tag_field("T", &json!("scalar"), "grant_type"),
            Err(ResolveError::MissingTag { .. })
        ));
    }
}
