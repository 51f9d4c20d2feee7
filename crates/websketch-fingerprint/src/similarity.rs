//! Pairwise node similarity for diff matching.
//!
//! A weighted score over five signals, normalized by the weight actually in
//! play so absent optional signals neither help nor hurt:
//!
//! | signal        | weight | points                              |
//! |---------------|-------:|-------------------------------------|
//! | role          |      3 | 3 if equal                          |
//! | bbox          |      2 | 2 × IoU                             |
//! | interactivity |      1 | 1 if equal                          |
//! | semantic      |      2 | 2 if both present and equal; weight counts whenever either side carries one |
//! | text hash     |      1 | 1 if equal; weight counts only when both present |
//!
//! A one-sided `semantic` deliberately adds weight without points: a node
//! that gained or lost its intent tag should score below a clean match.
//! Threshold tuning in the diff engine depends on this.

use websketch_core::Node;

use crate::bbox::bbox_iou;

const ROLE_WEIGHT: f64 = 3.0;
const BBOX_WEIGHT: f64 = 2.0;
const INTERACTIVE_WEIGHT: f64 = 1.0;
const SEMANTIC_WEIGHT: f64 = 2.0;
const TEXT_WEIGHT: f64 = 1.0;

/// Weighted similarity of two nodes, in `[0, 1]`.
#[must_use]
pub fn node_similarity(a: &Node, b: &Node) -> f64 {
    let mut score = 0.0;
    let mut weight = 0.0;

    weight += ROLE_WEIGHT;
    if a.role == b.role {
        score += ROLE_WEIGHT;
    }

    weight += BBOX_WEIGHT;
    score += BBOX_WEIGHT * bbox_iou(&a.bbox, &b.bbox);

    weight += INTERACTIVE_WEIGHT;
    if a.interactive == b.interactive {
        score += INTERACTIVE_WEIGHT;
    }

    if a.semantic.is_some() || b.semantic.is_some() {
        weight += SEMANTIC_WEIGHT;
        if a.semantic.is_some() && a.semantic == b.semantic {
            score += SEMANTIC_WEIGHT;
        }
    }

    let text_a = a.text.as_ref().and_then(|t| t.hash.as_deref());
    let text_b = b.text.as_ref().and_then(|t| t.hash.as_deref());
    if let (Some(text_a), Some(text_b)) = (text_a, text_b) {
        weight += TEXT_WEIGHT;
        if text_a == text_b {
            score += TEXT_WEIGHT;
        }
    }

    score / weight
}
