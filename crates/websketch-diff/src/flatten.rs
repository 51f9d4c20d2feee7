//! Preorder flattening of an IR tree for matching.

use websketch_core::Node;
use websketch_fingerprint::{shallow_hash, HashOptions};

/// One node of a flattened tree: a borrowed node plus its depth, role
/// trail, and shallow hash.
#[derive(Debug, Clone)]
pub struct FlatNode<'a> {
    pub node: &'a Node,
    /// Root at depth 0.
    pub depth: usize,
    /// Role trail: `PAGE` for the root, `PAGE/SECTION[0]/BUTTON[2]` below.
    pub path: String,
    pub hash: String,
}

/// Flatten the subtree rooted at `root` in preorder.
#[must_use]
pub fn flatten<'a>(root: &'a Node, opts: &HashOptions) -> Vec<FlatNode<'a>> {
    let mut out = Vec::with_capacity(root.subtree_len());
    push_subtree(root, 0, root.role.as_str().to_owned(), opts, &mut out);
    out
}

fn push_subtree<'a>(
    node: &'a Node,
    depth: usize,
    path: String,
    opts: &HashOptions,
    out: &mut Vec<FlatNode<'a>>,
) {
    out.push(FlatNode {
        node,
        depth,
        path: path.clone(),
        hash: shallow_hash(node, opts),
    });
    for (index, child) in node.children.iter().enumerate() {
        let child_path = format!("{path}/{}[{index}]", child.role.as_str());
        push_subtree(child, depth + 1, child_path, opts, out);
    }
}
