//! Unified error type for the WebSketch IR library and its calling surfaces.
//!
//! Every variant maps to a stable, user-facing code (`WS_*`). The four
//! parse-time codes are produced by the strict parser; the remaining codes
//! are reserved for surfaces that wrap the core (CLIs, servers) so that the
//! whole toolchain reports failures in one vocabulary.
//!
//! The pure operations (fingerprints, diff, render) presume validated input
//! and do not return errors; a domain impossibility inside them surfaces as
//! [`SketchError::Internal`].

use serde::{Deserialize, Serialize};

use crate::issue::Issue;
use crate::schema::SUPPORTED_SCHEMA_VERSIONS;

/// Unified error type covering parse failures and the reserved codes used
/// by calling surfaces.
#[derive(Debug, thiserror::Error)]
pub enum SketchError {
    /// Serialized input is not valid JSON.
    #[error("Capture input is not valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    /// Structurally valid JSON that fails schema checks.
    #[error("Capture failed schema validation with {} issue(s). First: {}", .issues.len(), first_issue(.issues))]
    InvalidCapture {
        /// Every issue the validator collected, in detection order.
        issues: Vec<Issue>,
    },

    /// `version` is present but not a supported value.
    #[error("Unsupported capture schema version {received}. Supported: {}.", SUPPORTED_SCHEMA_VERSIONS.join(", "))]
    UnsupportedVersion {
        /// Compact JSON rendering of the offending value.
        received: String,
    },

    /// Node-count or depth limit reached while validating.
    #[error("Capture exceeds resource limits: {detail}. Raise ValidationLimits if this capture is intentional.")]
    LimitExceeded {
        detail: String,
    },

    /// A calling surface received arguments the core cannot act on.
    #[error("Invalid arguments: {reason}")]
    InvalidArgs {
        reason: String,
    },

    /// A calling surface could not locate a referenced resource.
    #[error("Not found: {what}")]
    NotFound {
        what: String,
    },

    /// A calling surface was denied access to a resource.
    #[error("Permission denied: {what}")]
    PermissionDenied {
        what: String,
    },

    /// Wraps `std::io::Error` for calling surfaces that touch files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A domain-level impossibility inside a pure operation.
    #[error("Internal error: {source}")]
    Internal {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn first_issue(issues: &[Issue]) -> String {
    issues
        .first()
        .map_or_else(|| "(none)".to_owned(), Issue::to_string)
}

/// Convenience alias used throughout the websketch crate hierarchy.
pub type SketchResult<T> = Result<T, SketchError>;

impl SketchError {
    /// The stable, user-facing code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            SketchError::InvalidJson { .. } => "WS_INVALID_JSON",
            SketchError::InvalidCapture { .. } => "WS_INVALID_CAPTURE",
            SketchError::UnsupportedVersion { .. } => "WS_UNSUPPORTED_VERSION",
            SketchError::LimitExceeded { .. } => "WS_LIMIT_EXCEEDED",
            SketchError::InvalidArgs { .. } => "WS_INVALID_ARGS",
            SketchError::NotFound { .. } => "WS_NOT_FOUND",
            SketchError::PermissionDenied { .. } => "WS_PERMISSION_DENIED",
            SketchError::Io(_) => "WS_IO_ERROR",
            SketchError::Internal { .. } => "WS_INTERNAL",
        }
    }

    /// Build the serializable envelope consumers outside the library
    /// boundary receive.
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        let mut envelope = ErrorEnvelope {
            code: self.code().to_owned(),
            message: self.to_string(),
            path: None,
            expected: None,
            received: None,
            hint: None,
            cause: None,
            issues: Vec::new(),
        };
        match self {
            SketchError::InvalidJson { source } => {
                envelope.cause = Some(source.to_string());
            }
            SketchError::InvalidCapture { issues } => {
                envelope.issues = issues.clone();
                if let Some(first) = issues.first() {
                    envelope.path = Some(first.path.clone());
                    envelope.expected = Some(first.expected.clone());
                    envelope.received = Some(first.received.clone());
                }
            }
            SketchError::UnsupportedVersion { received } => {
                envelope.path = Some("version".to_owned());
                envelope.expected = Some(SUPPORTED_SCHEMA_VERSIONS.join(" | "));
                envelope.received = Some(received.clone());
                envelope.hint = Some("Re-capture the page with a current toolchain.".to_owned());
            }
            SketchError::LimitExceeded { .. } => {
                envelope.hint =
                    Some("Pass larger ValidationLimits if this capture is intentional.".to_owned());
            }
            SketchError::Internal { source } => {
                envelope.cause = Some(source.to_string());
            }
            _ => {}
        }
        envelope
    }
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// Serializable error shape handed across the library boundary.
///
/// `issues` is populated only for `WS_INVALID_CAPTURE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

impl ErrorEnvelope {
    /// Render the envelope for humans: `[CODE] message`, then one indented
    /// line per optional detail. Presentation layers own all other styling.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("[{}] {}", self.code, self.message);
        if let Some(path) = &self.path {
            out.push_str("\n  path: ");
            out.push_str(path);
        }
        if let Some(expected) = &self.expected {
            out.push_str("\n  expected: ");
            out.push_str(expected);
        }
        if let Some(received) = &self.received {
            out.push_str("\n  received: ");
            out.push_str(received);
        }
        if let Some(hint) = &self.hint {
            out.push_str("\n  hint: ");
            out.push_str(hint);
        }
        if let Some(cause) = &self.cause {
            out.push_str("\n  cause: ");
            out.push_str(cause);
        }
        for issue in &self.issues {
            out.push_str("\n  - ");
            out.push_str(&issue.to_string());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Issue;

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SketchError>();
    }

    #[test]
    fn codes_are_stable() {
        let err = SketchError::UnsupportedVersion {
            received: "\"99.0\"".to_owned(),
        };
        assert_eq!(err.code(), "WS_UNSUPPORTED_VERSION");
        assert_eq!(
            SketchError::LimitExceeded {
                detail: "node count 60 exceeds limit 50".to_owned()
            }
            .code(),
            "WS_LIMIT_EXCEEDED"
        );
    }

    #[test]
    fn invalid_json_preserves_source() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = SketchError::InvalidJson { source: parse_err };
        assert_eq!(err.code(), "WS_INVALID_JSON");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_capture_message_counts_issues() {
        let err = SketchError::InvalidCapture {
            issues: vec![
                Issue::new("root.role", "role tag", "\"WIDGET\"", "unknown role"),
                Issue::new("url", "string", "42", "url must be a string"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 issue(s)"));
        assert!(msg.contains("root.role"));
    }

    #[test]
    fn envelope_for_unsupported_version() {
        let err = SketchError::UnsupportedVersion {
            received: "\"99.0\"".to_owned(),
        };
        let envelope = err.to_envelope();
        assert_eq!(envelope.code, "WS_UNSUPPORTED_VERSION");
        assert_eq!(envelope.path.as_deref(), Some("version"));
        assert_eq!(envelope.received.as_deref(), Some("\"99.0\""));
        assert!(envelope.issues.is_empty());
    }

    #[test]
    fn envelope_for_invalid_capture_carries_issues() {
        let err = SketchError::InvalidCapture {
            issues: vec![Issue::new("root", "object", "null", "root is required")],
        };
        let envelope = err.to_envelope();
        assert_eq!(envelope.issues.len(), 1);
        assert_eq!(envelope.path.as_deref(), Some("root"));
    }

    #[test]
    fn render_formats_code_then_indented_details() {
        let envelope = SketchError::UnsupportedVersion {
            received: "\"99.0\"".to_owned(),
        }
        .to_envelope();
        let rendered = envelope.render();
        assert!(rendered.starts_with("[WS_UNSUPPORTED_VERSION] "));
        assert!(rendered.contains("\n  path: version"));
        assert!(rendered.contains("\n  received: \"99.0\""));
    }

    #[test]
    fn envelope_serde_skips_absent_fields() {
        let envelope = SketchError::InvalidArgs {
            reason: "limit must be positive".to_owned(),
        }
        .to_envelope();
        let json = serde_json::to_string(&envelope).expect("serialize envelope");
        assert!(!json.contains("path"));
        assert!(!json.contains("issues"));
    }
}
