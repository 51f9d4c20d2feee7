//! The matching-based diff engine.
//!
//! # Algorithm
//!
//! 1. Flatten both trees in preorder with shallow hashes.
//! 2. Generate candidate pairs: same-role pairs are scored directly;
//!    different-role pairs are pruned below IoU 0.3 before scoring. A pair
//!    enters matching at or above `match_threshold`.
//! 3. Greedy matching: walk candidates by similarity descending and accept
//!    a pair when neither side is taken. Ties keep candidate iteration
//!    order (A-preorder major, B-preorder minor); which of two equal-score
//!    pairings wins is not load-bearing.
//! 4. Classify matched pairs (moved/resized/role/text/interactive/children)
//!    and fold unmatched nodes into removals and additions.
//! 5. Rank by affected area into `top_changes`; tally the summary.
//!
//! Greedy assignment is deliberate: an optimal (Hungarian) matching would
//! change observable output and costs more than this diff is worth.

use tracing::{debug, instrument};
use websketch_core::Capture;
use websketch_fingerprint::{
    bbox_iou, fingerprint_capture, fingerprint_layout, node_similarity, HashOptions,
};

use crate::change::{
    Change, ChangeCounts, ChangeKind, DiffMetadata, DiffOptions, DiffResult, DiffSummary,
    NodeSummary,
};
use crate::flatten::{flatten, FlatNode};

/// IoU below which a different-role pair is pruned without scoring.
/// Same-role pairs are always scored; the asymmetry is intentional.
const CROSS_ROLE_IOU_FLOOR: f64 = 0.3;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    a: usize,
    b: usize,
    score: f64,
}

/// Diff two captures.
///
/// A pure function of its inputs: deterministic change list, ranking, and
/// summary for the same pair of captures and options.
#[must_use]
#[instrument(
    name = "websketch::diff",
    skip(a, b),
    fields(
        node_count_a = a.root.subtree_len(),
        node_count_b = b.root.subtree_len(),
        match_threshold = options.match_threshold,
    )
)]
pub fn diff(a: &Capture, b: &Capture, options: &DiffOptions) -> DiffResult {
    let hash_opts = HashOptions {
        include_text: options.include_text,
        include_name: options.include_name,
        include_z: false,
    };
    let flat_a = flatten(&a.root, &hash_opts);
    let flat_b = flatten(&b.root, &hash_opts);

    let candidates = generate_candidates(&flat_a, &flat_b, options.match_threshold);
    let (pairs, matched_a, matched_b) = greedy_match(&candidates, flat_a.len(), flat_b.len());

    let mut changes = Vec::new();
    for &(i, j) in &pairs {
        classify_pair(&flat_a[i], &flat_b[j], options, &mut changes);
    }
    for (i, flat) in flat_a.iter().enumerate() {
        if !matched_a[i] {
            changes.push(Change {
                kind: ChangeKind::Removed,
                node_a: Some(NodeSummary::from_flat(flat)),
                node_b: None,
                delta: None,
            });
        }
    }
    for (j, flat) in flat_b.iter().enumerate() {
        if !matched_b[j] {
            changes.push(Change {
                kind: ChangeKind::Added,
                node_a: None,
                node_b: Some(NodeSummary::from_flat(flat)),
                delta: None,
            });
        }
    }

    let mut counts = ChangeCounts::default();
    for change in &changes {
        counts.record(change.kind);
    }

    let mut top_changes = changes.clone();
    top_changes.sort_by(|x, y| y.affected_area().total_cmp(&x.affected_area()));
    top_changes.truncate(options.top_changes_limit);

    let summary = DiffSummary {
        counts,
        identical: changes.is_empty(),
        fingerprints_match: fingerprint_capture(a) == fingerprint_capture(b),
        layout_fingerprints_match: fingerprint_layout(a) == fingerprint_layout(b),
        node_count_a: flat_a.len(),
        node_count_b: flat_b.len(),
    };
    let metadata = DiffMetadata {
        url_changed: a.url != b.url,
        viewport_changed: a.viewport.w_px != b.viewport.w_px
            || a.viewport.h_px != b.viewport.h_px,
        compiler_version_match: a.compiler.version == b.compiler.version,
    };

    debug!(
        target: "websketch.diff",
        candidate_count = candidates.len(),
        matched_count = pairs.len(),
        change_count = changes.len(),
        identical = summary.identical,
        "diff complete"
    );

    DiffResult {
        changes,
        top_changes,
        summary,
        metadata,
    }
}

fn generate_candidates(
    flat_a: &[FlatNode<'_>],
    flat_b: &[FlatNode<'_>],
    match_threshold: f64,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for (i, entry_a) in flat_a.iter().enumerate() {
        for (j, entry_b) in flat_b.iter().enumerate() {
            if entry_a.node.role != entry_b.node.role
                && bbox_iou(&entry_a.node.bbox, &entry_b.node.bbox) < CROSS_ROLE_IOU_FLOOR
            {
                continue;
            }
            let score = node_similarity(entry_a.node, entry_b.node);
            if score >= match_threshold {
                candidates.push(Candidate { a: i, b: j, score });
            }
        }
    }
    candidates
}

/// Accept candidates by descending similarity, first come first served.
/// Returns accepted pairs in acceptance order plus per-side matched flags.
fn greedy_match(
    candidates: &[Candidate],
    len_a: usize,
    len_b: usize,
) -> (Vec<(usize, usize)>, Vec<bool>, Vec<bool>) {
    let mut sorted = candidates.to_vec();
    // Stable: equal scores keep generation order.
    sorted.sort_by(|x, y| y.score.total_cmp(&x.score));

    let mut matched_a = vec![false; len_a];
    let mut matched_b = vec![false; len_b];
    let mut pairs = Vec::new();
    for candidate in sorted {
        if matched_a[candidate.a] || matched_b[candidate.b] {
            continue;
        }
        matched_a[candidate.a] = true;
        matched_b[candidate.b] = true;
        pairs.push((candidate.a, candidate.b));
    }
    (pairs, matched_a, matched_b)
}

fn classify_pair(
    entry_a: &FlatNode<'_>,
    entry_b: &FlatNode<'_>,
    options: &DiffOptions,
    changes: &mut Vec<Change>,
) {
    let node_a = entry_a.node;
    let node_b = entry_b.node;
    let delta = [
        node_b.bbox.x() - node_a.bbox.x(),
        node_b.bbox.y() - node_a.bbox.y(),
        node_b.bbox.w() - node_a.bbox.w(),
        node_b.bbox.h() - node_a.bbox.h(),
    ];

    let push = |kind: ChangeKind, with_delta: bool, changes: &mut Vec<Change>| {
        changes.push(Change {
            kind,
            node_a: Some(NodeSummary::from_flat(entry_a)),
            node_b: Some(NodeSummary::from_flat(entry_b)),
            delta: with_delta.then_some(delta),
        });
    };

    if delta[0].abs() > options.move_threshold || delta[1].abs() > options.move_threshold {
        push(ChangeKind::Moved, true, changes);
    }
    if delta[2].abs() > options.resize_threshold || delta[3].abs() > options.resize_threshold {
        push(ChangeKind::Resized, true, changes);
    }
    if node_a.role != node_b.role {
        push(ChangeKind::RoleChanged, false, changes);
    }
    if options.include_text {
        let text_a = node_a.text.as_ref().and_then(|t| t.hash.as_deref());
        let text_b = node_b.text.as_ref().and_then(|t| t.hash.as_deref());
        if text_a != text_b {
            push(ChangeKind::TextChanged, false, changes);
        }
    }
    if node_a.interactive != node_b.interactive {
        push(ChangeKind::InteractiveChanged, false, changes);
    }
    if node_a.children.len() != node_b.children.len() {
        push(ChangeKind::ChildrenChanged, false, changes);
    }
}
