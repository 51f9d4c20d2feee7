//! Shallow and deep node digests.
//!
//! The shallow hash digests one node's canonical record; the deep hash
//! folds in all descendants over a canonical sibling order, so two captures
//! whose only difference is the input order of same-row siblings digest
//! identically.
//!
//! # Canonical record
//!
//! ```text
//! r:<role>|b:<bbox>|i:<0/1>|v:<0/1>[|e:<0/1>][|s:<semantic>][|t:<text-hash-16>][|n:<name-hash-16>][|z:<z>]
//! ```
//!
//! Field order and presence rules are a wire contract shared with other
//! implementations of the IR; changing either changes every fingerprint.

use std::cmp::Ordering;
use std::fmt::Write as _;

use websketch_core::{short_hash, BBox01, Node, BBOX_QUANT_STEP};

use crate::bbox::{bbox_string, quantize_default, HASH_PRECISION};

/// Which optional signals participate in hashing.
///
/// The default set (text and name in, z out) produces the full capture
/// fingerprint; [`HashOptions::layout`] produces the text-insensitive
/// layout fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashOptions {
    pub include_text: bool,
    pub include_name: bool,
    pub include_z: bool,
}

impl Default for HashOptions {
    fn default() -> Self {
        HashOptions {
            include_text: true,
            include_name: true,
            include_z: false,
        }
    }
}

impl HashOptions {
    /// Options for the layout-only fingerprint: geometry and roles, no
    /// text or name signals.
    #[must_use]
    pub const fn layout() -> Self {
        HashOptions {
            include_text: false,
            include_name: false,
            include_z: false,
        }
    }
}

/// First 16 characters of a stored digest; shorter digests pass through
/// whole. Digests are ASCII hex in practice, so the byte slice is safe; a
/// non-boundary fallback keeps arbitrary strings from panicking.
fn digest_prefix(digest: &str) -> &str {
    digest.get(..16).unwrap_or(digest)
}

/// Digest of a single node's canonical record, ignoring children.
#[must_use]
pub fn shallow_hash(node: &Node, opts: &HashOptions) -> String {
    let quantized = quantize_default(node.bbox);
    let mut record = format!(
        "r:{}|b:{}|i:{}|v:{}",
        node.role.as_str(),
        bbox_string(&quantized, HASH_PRECISION),
        u8::from(node.interactive),
        u8::from(node.visible),
    );
    if let Some(enabled) = node.enabled {
        let _ = write!(record, "|e:{}", u8::from(enabled));
    }
    if let Some(semantic) = &node.semantic {
        let _ = write!(record, "|s:{semantic}");
    }
    if opts.include_text {
        if let Some(hash) = node.text.as_ref().and_then(|t| t.hash.as_deref()) {
            let _ = write!(record, "|t:{}", digest_prefix(hash));
        }
    }
    if opts.include_name {
        if let Some(name_hash) = node.name_hash.as_deref() {
            let _ = write!(record, "|n:{}", digest_prefix(name_hash));
        }
    }
    if opts.include_z {
        if let Some(z) = node.z {
            let _ = write!(record, "|z:{z}");
        }
    }
    short_hash(&record)
}

/// Canonical sibling order: by quantized `(y, x)`, where two y-values are
/// considered equal within one quantization step.
///
/// The tolerance makes this comparator intentionally non-transitive, which
/// the standard sort is allowed to reject, so ordering uses the stable
/// insertion sort below. Children are bounded by capture-time hints, so the
/// quadratic worst case is irrelevant.
fn sibling_order(a: &BBox01, b: &BBox01) -> Ordering {
    if (a.y() - b.y()).abs() <= BBOX_QUANT_STEP {
        a.x().total_cmp(&b.x())
    } else {
        a.y().total_cmp(&b.y())
    }
}

fn stable_insertion_sort<T>(items: &mut [T], mut cmp: impl FnMut(&T, &T) -> Ordering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Digest of a node and all of its descendants, over the canonical sibling
/// order. For a leaf this equals [`shallow_hash`].
#[must_use]
pub fn deep_hash(node: &Node, opts: &HashOptions) -> String {
    let own = shallow_hash(node, opts);
    if node.children.is_empty() {
        return own;
    }

    let mut ordered: Vec<(BBox01, &Node)> = node
        .children
        .iter()
        .map(|child| (quantize_default(child.bbox), child))
        .collect();
    stable_insertion_sort(&mut ordered, |a, b| sibling_order(&a.0, &b.0));

    let mut record = own;
    record.push_str("|c:[");
    for (index, (_, child)) in ordered.iter().enumerate() {
        if index > 0 {
            record.push(',');
        }
        record.push_str(&deep_hash(child, opts));
    }
    record.push(']');
    short_hash(&record)
}
