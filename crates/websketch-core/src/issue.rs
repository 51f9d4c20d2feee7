//! Validation issue records and resource limits.
//!
//! These live in the core crate (rather than alongside the validator) so
//! that [`crate::error::SketchError::InvalidCapture`] can carry the full
//! issue list without a dependency cycle.

use serde::{Deserialize, Serialize};

/// One schema violation found while walking a serialized capture.
///
/// `path` is a JSONPath-like dotted string (`root`, `root.children[2]`,
/// `root.bbox[1]`, `viewport.w_px`, ...). `received` holds the compact JSON
/// rendering of scalar offenders, `array(n)`/`object` for containers, and
/// `missing` for absent fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub path: String,
    pub expected: String,
    pub received: String,
    pub message: String,
}

impl Issue {
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        expected: impl Into<String>,
        received: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Issue {
            path: path.into(),
            expected: expected.into(),
            received: received.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} (expected {}, received {})",
            self.path, self.message, self.expected, self.received
        )
    }
}

/// Resource ceilings enforced while validating a capture.
///
/// These are the authoritative parse-time limits; the capture-time hints in
/// the grammar ([`crate::grammar::CAPTURE_MAX_DEPTH`],
/// [`crate::grammar::CAPTURE_MAX_CHILDREN`]) are advisory and looser in the
/// node-count dimension, stricter in depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    /// Maximum total node count. Default: 10 000.
    pub max_nodes: usize,
    /// Maximum tree depth, root at depth 1. Default: 50.
    pub max_depth: usize,
    /// Maximum accepted string length. Reserved; not yet enforced.
    pub max_string_length: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        ValidationLimits {
            max_nodes: 10_000,
            max_depth: 50,
            max_string_length: 10_000,
        }
    }
}
