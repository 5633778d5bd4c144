//! Identifier lookup and breadcrumb paths.
//!
//! Both searches walk the tree in pre-order (a node, then its children left
//! to right, each child's subtree before the next sibling) and stop at the
//! first node carrying the identifier.

use std::sync::Arc;

use diskweight_core::{Node, NodeId};

/// Find the node with `target` in the tree rooted at `root`.
pub fn locate(root: Option<&Arc<Node>>, target: &NodeId) -> Option<Arc<Node>> {
    let mut pending = vec![root?];
    while let Some(node) = pending.pop() {
        if node.id == *target {
            return Some(Arc::clone(node));
        }
        pending.extend(node.children.iter().rev());
    }
    None
}

/// Build the chain of nodes from `root` to `target`, both inclusive.
///
/// Returns an empty path if there is no root or the target is absent.
pub fn path_to(root: Option<&Arc<Node>>, target: &NodeId) -> Vec<Arc<Node>> {
    let Some(root) = root else {
        return Vec::new();
    };

    spine(root, target)
        .map(|steps| steps.into_iter().map(|(node, _)| Arc::clone(node)).collect())
        .unwrap_or_default()
}

/// Pre-order search returning every node from `root` to `target` together
/// with its index in its parent's children (0 for the root).
pub(crate) fn spine<'a>(root: &'a Arc<Node>, target: &NodeId) -> Option<Vec<(&'a Arc<Node>, usize)>> {
    let mut trail: Vec<(&Arc<Node>, usize)> = Vec::new();
    let mut pending: Vec<(&Arc<Node>, usize, usize)> = vec![(root, 0, 0)];

    while let Some((node, index, depth)) = pending.pop() {
        trail.truncate(depth);
        trail.push((node, index));

        if node.id == *target {
            return Some(trail);
        }

        pending.extend(
            node.children
                .iter()
                .enumerate()
                .rev()
                .map(|(i, child)| (child, i, depth + 1)),
        );
    }

    None
}
