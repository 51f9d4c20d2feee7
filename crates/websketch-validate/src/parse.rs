//! Strict parse-and-validate entry point.
//!
//! [`parse_capture`] is the only door from untrusted text into a typed
//! [`Capture`]. It collects every validation issue first, then classifies
//! the failure into the most specific stable code with the priority
//! version > limit > general.

use serde_json::Value;
use tracing::{debug, instrument};
use websketch_core::{Capture, SketchError, SketchResult, ValidationLimits};

use crate::validator::{is_limit_issue, validate_capture};

/// Parse serialized capture text, validating strictly against `limits`.
///
/// # Errors
///
/// - `WS_INVALID_JSON` — the text is not valid JSON (parser message kept
///   as the cause).
/// - `WS_UNSUPPORTED_VERSION` — `version` failed validation; `received`
///   carries the offending value's compact JSON rendering.
/// - `WS_LIMIT_EXCEEDED` — the node-count or depth ceiling was reached.
/// - `WS_INVALID_CAPTURE` — any other schema violation; carries the full
///   issue list.
#[instrument(name = "websketch::parse_capture", skip(text), fields(input_len = text.len()))]
pub fn parse_capture(text: &str, limits: &ValidationLimits) -> SketchResult<Capture> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| SketchError::InvalidJson { source })?;

    let issues = validate_capture(&value, limits);

    if let Some(issue) = issues.iter().find(|issue| issue.path == "version") {
        return Err(SketchError::UnsupportedVersion {
            received: issue.received.clone(),
        });
    }
    if let Some(issue) = issues.iter().find(|issue| is_limit_issue(issue)) {
        return Err(SketchError::LimitExceeded {
            detail: issue.message.clone(),
        });
    }
    if !issues.is_empty() {
        debug!(
            target: "websketch.validate",
            issue_count = issues.len(),
            first_path = %issues[0].path,
            "capture rejected by schema validation"
        );
        return Err(SketchError::InvalidCapture { issues });
    }

    // The validator has accepted the shape, so materialization cannot fail
    // on well-typed input; anything left is a library defect.
    let capture: Capture = serde_json::from_value(value).map_err(|source| SketchError::Internal {
        source: Box::new(source),
    })?;

    debug!(
        target: "websketch.validate",
        node_count = capture.root.subtree_len(),
        url = %capture.url,
        "capture parsed and validated"
    );
    Ok(capture)
}
