//! Capture-level fingerprints.
//!
//! A fingerprint is the deep hash of the root combined with the viewport
//! aspect ratio at two decimals, so sub-pixel layout jitter and minor
//! viewport-size noise both wash out. `url`, `timestamp_ms`, and `compiler`
//! metadata never participate: two captures of the same page taken a minute
//! apart fingerprint identically.

use tracing::debug;
use websketch_core::{short_hash, Capture};

use crate::node_hash::{deep_hash, HashOptions};

fn fingerprint_with(capture: &Capture, opts: &HashOptions) -> String {
    let root = deep_hash(&capture.root, opts);
    short_hash(&format!("{root}|a:{:.2}", capture.viewport.aspect))
}

/// Full structural fingerprint: geometry, roles, text, and name signals.
#[must_use]
pub fn fingerprint_capture(capture: &Capture) -> String {
    let digest = fingerprint_with(capture, &HashOptions::default());
    debug!(
        target: "websketch.fingerprint",
        fingerprint = %digest,
        node_count = capture.root.subtree_len(),
        "capture fingerprint computed"
    );
    digest
}

/// Layout-only fingerprint: text and name signals excluded, so copy edits
/// leave it unchanged while structural shifts do not.
#[must_use]
pub fn fingerprint_layout(capture: &Capture) -> String {
    let digest = fingerprint_with(capture, &HashOptions::layout());
    debug!(
        target: "websketch.fingerprint",
        fingerprint = %digest,
        node_count = capture.root.subtree_len(),
        "layout fingerprint computed"
    );
    digest
}
