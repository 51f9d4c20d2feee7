//! Explainable structural diff between two WebSketch IR captures.
//!
//! The engine flattens both trees, pairs nodes with a weighted greedy
//! matching, classifies each pair's changes, and folds unmatched nodes into
//! additions and removals. The result is a ranked, countable change list
//! plus fingerprint-equality verdicts — enough for a reviewer to answer
//! "what moved?" without rendering either page.

pub mod change;
pub mod engine;
pub mod flatten;

pub use change::{
    Change, ChangeCounts, ChangeKind, DiffMetadata, DiffOptions, DiffResult, DiffSummary,
    NodeSummary,
};
pub use engine::diff;
pub use flatten::{flatten, FlatNode};
