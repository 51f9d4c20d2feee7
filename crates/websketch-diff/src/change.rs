//! Result types for the diff engine.

use serde::{Deserialize, Serialize};
use websketch_core::{BBox01, Role};

use crate::flatten::FlatNode;

/// Tuning knobs for a diff run. All defaults match the wire contract other
/// implementations of the IR ship with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Hash and compare text signals. Default: true.
    pub include_text: bool,
    /// Hash accessibility-name digests. Default: true.
    pub include_name: bool,
    /// Minimum similarity for a candidate pair to enter matching.
    /// Default: 0.5.
    pub match_threshold: f64,
    /// Size of the area-ranked `top_changes` list. Default: 10.
    pub top_changes_limit: usize,
    /// Positional delta (fraction of viewport) past which a matched pair is
    /// `moved`. Default: 0.01.
    pub move_threshold: f64,
    /// Size delta past which a matched pair is `resized`. Default: 0.01.
    pub resize_threshold: f64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            include_text: true,
            include_name: true,
            match_threshold: 0.5,
            top_changes_limit: 10,
            move_threshold: 0.01,
            resize_threshold: 0.01,
        }
    }
}

/// The kind of one detected change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Removed,
    Moved,
    Resized,
    TextChanged,
    InteractiveChanged,
    RoleChanged,
    ChildrenChanged,
}

/// Lightweight owned view of a node as it appeared in one capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub id: String,
    pub role: Role,
    pub bbox: BBox01,
    /// Role trail within its capture.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic: Option<String>,
}

impl NodeSummary {
    pub(crate) fn from_flat(flat: &FlatNode<'_>) -> Self {
        NodeSummary {
            id: flat.node.id.clone(),
            role: flat.node.role,
            bbox: flat.node.bbox,
            path: flat.path.clone(),
            semantic: flat.node.semantic.clone(),
        }
    }
}

/// One detected change between two captures.
///
/// `added` carries only `node_b`, `removed` only `node_a`; every
/// matched-pair kind carries both. `moved` and `resized` additionally
/// carry the componentwise bbox delta `[dx, dy, dw, dh]` (B minus A).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub kind: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_a: Option<NodeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_b: Option<NodeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<[f64; 4]>,
}

impl Change {
    /// Area of the affected node, preferring the A side. Drives ranking.
    #[must_use]
    pub fn affected_area(&self) -> f64 {
        self.node_a
            .as_ref()
            .or(self.node_b.as_ref())
            .map_or(0.0, |n| n.bbox.area())
    }
}

/// Per-kind change tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub added: usize,
    pub removed: usize,
    pub moved: usize,
    pub resized: usize,
    pub text_changed: usize,
    pub interactive_changed: usize,
    pub role_changed: usize,
    pub children_changed: usize,
}

impl ChangeCounts {
    pub(crate) fn record(&mut self, kind: ChangeKind) {
        match kind {
            ChangeKind::Added => self.added += 1,
            ChangeKind::Removed => self.removed += 1,
            ChangeKind::Moved => self.moved += 1,
            ChangeKind::Resized => self.resized += 1,
            ChangeKind::TextChanged => self.text_changed += 1,
            ChangeKind::InteractiveChanged => self.interactive_changed += 1,
            ChangeKind::RoleChanged => self.role_changed += 1,
            ChangeKind::ChildrenChanged => self.children_changed += 1,
        }
    }
}

/// Aggregate verdict of a diff run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub counts: ChangeCounts,
    /// True when no change of any kind was detected.
    pub identical: bool,
    pub fingerprints_match: bool,
    pub layout_fingerprints_match: bool,
    pub node_count_a: usize,
    pub node_count_b: usize,
}

/// Capture-metadata comparison, outside the structural verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffMetadata {
    pub url_changed: bool,
    /// True when the pixel viewport size differs.
    pub viewport_changed: bool,
    pub compiler_version_match: bool,
}

/// Full result of [`crate::diff`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Every change, in detection order.
    pub changes: Vec<Change>,
    /// The largest-area changes, up to `top_changes_limit`.
    pub top_changes: Vec<Change>,
    pub summary: DiffSummary,
    pub metadata: DiffMetadata,
}
