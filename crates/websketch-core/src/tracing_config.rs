//! Optional tracing conventions for websketch.
//!
//! The library emits spans and events under the `websketch` target prefix;
//! consumers bring their own subscriber. Filtering:
//!
//! ```text
//! RUST_LOG=websketch=debug
//! ```

use tracing::Level;

/// Target prefix used by all websketch tracing spans and events.
pub const TARGET_PREFIX: &str = "websketch";

/// Standard span names, so consumers can match on them in subscribers and
/// tests.
pub mod span_names {
    /// Strict parse-and-validate of serialized captures.
    pub const PARSE_CAPTURE: &str = "websketch::parse_capture";
    /// Capture-level fingerprint computation.
    pub const FINGERPRINT: &str = "websketch::fingerprint";
    /// Two-capture structural diff.
    pub const DIFF: &str = "websketch::diff";
    /// ASCII rendering.
    pub const RENDER: &str = "websketch::render";
}

/// Standard structured field names used in tracing events.
pub mod field_names {
    pub const NODE_COUNT: &str = "node_count";
    pub const NODE_COUNT_A: &str = "node_count_a";
    pub const NODE_COUNT_B: &str = "node_count_b";
    pub const ISSUE_COUNT: &str = "issue_count";
    pub const CANDIDATE_COUNT: &str = "candidate_count";
    pub const MATCHED_COUNT: &str = "matched_count";
    pub const CHANGE_COUNT: &str = "change_count";
    pub const FINGERPRINT: &str = "fingerprint";
}

/// Parse a log level string (case-insensitive). Returns `None` for
/// unrecognized strings.
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Recommended `tracing::Level` for the current environment: honors
/// `WEBSKETCH_LOG_LEVEL`, then falls back to `default`.
#[must_use]
pub fn level_from_env(default: Level) -> Level {
    std::env::var("WEBSKETCH_LOG_LEVEL")
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(default)
}
