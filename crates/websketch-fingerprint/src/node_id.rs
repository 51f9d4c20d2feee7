//! Content-addressed node identifiers.
//!
//! An ID encodes the node's shallow digest plus its rough position, nested
//! under its parent's ID. IDs are stable across captures as long as the
//! node's own record and position survive, which makes them useful join
//! keys for downstream tools.

use websketch_core::Node;

use crate::node_hash::{shallow_hash, HashOptions};

/// Characters of the shallow digest kept in an ID segment.
const ID_HASH_LEN: usize = 12;

/// Build the ID for `node` under `parent_path`.
///
/// Shape: `<parent>/<digest>_<round(x*100)>_<round(y*100)>`. The digest is
/// truncated to [`ID_HASH_LEN`]; the current short digest is 8 characters,
/// so it passes through whole.
#[must_use]
pub fn generate_node_id(node: &Node, parent_path: &str) -> String {
    let digest = shallow_hash(node, &HashOptions::default());
    let prefix = digest.get(..ID_HASH_LEN).unwrap_or(&digest);
    let cx = (node.bbox.x() * 100.0).round() as i64;
    let cy = (node.bbox.y() * 100.0).round() as i64;
    format!("{parent_path}/{prefix}_{cx}_{cy}")
}

/// Assign content-addressed IDs to the whole tree in preorder, writing each
/// node's ID before recursing into its children.
///
/// This is the only mutating operation in the core. The root's parent path
/// is empty, so every ID starts with `/`.
pub fn assign_node_ids(root: &mut Node) {
    assign_below(root, "");
}

fn assign_below(node: &mut Node, parent_path: &str) {
    node.id = generate_node_id(node, parent_path);
    let path = node.id.clone();
    for child in &mut node.children {
        assign_below(child, &path);
    }
}
