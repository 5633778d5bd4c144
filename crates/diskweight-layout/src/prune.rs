//! Copy-on-write subtree removal.
//!
//! Pruning rebuilds only the nodes on the path from the root to the removed
//! node's parent. Every other subtree in the result is the same [`Arc`] as in
//! the input, so holders of the old tree are unaffected and consumers can
//! skip work for subtrees that are `Arc::ptr_eq`.

use std::sync::Arc;

use diskweight_core::{Node, NodeId};

use crate::locate::spine;

/// Remove the node with `target` (and its subtree) from the tree.
///
/// If `node` itself carries `target`, it is returned unchanged; callers must
/// not ask to prune the root. If `target` is absent, the input handle is
/// returned. Ancestor sizes are left as they were.
///
/// Ids are expected to be unique. If they are not, only the parent of the
/// first match in pre-order is filtered (every child of it carrying `target`
/// goes); duplicates under other parents stay in the tree.
pub fn prune(node: &Arc<Node>, target: &NodeId) -> Arc<Node> {
    prune_with(node, target, false)
}

/// Like [`prune`], but every ancestor of the removed node has the removed
/// size subtracted from its own `size`.
pub fn prune_resized(node: &Arc<Node>, target: &NodeId) -> Arc<Node> {
    prune_with(node, target, true)
}

fn prune_with(node: &Arc<Node>, target: &NodeId, resize: bool) -> Arc<Node> {
    if node.id == *target {
        return Arc::clone(node);
    }

    let Some(steps) = spine(node, target) else {
        return Arc::clone(node);
    };

    // The search never matches the root here, so there is always a parent.
    let parent_depth = steps.len() - 2;
    let (parent, _) = steps[parent_depth];

    let (kept, removed): (Vec<Arc<Node>>, Vec<Arc<Node>>) = parent
        .children
        .iter()
        .cloned()
        .partition(|child| child.id != *target);
    let removed_size: u64 = removed.iter().map(|child| child.size).sum();

    let resized = |size: u64| {
        if resize {
            size.saturating_sub(removed_size)
        } else {
            size
        }
    };

    let mut rebuilt = Arc::new(parent.with_replaced_children(kept, resized(parent.size)));

    for depth in (0..parent_depth).rev() {
        let (ancestor, _) = steps[depth];
        let (_, child_index) = steps[depth + 1];

        let mut children = ancestor.children.clone();
        children[child_index] = rebuilt;
        rebuilt = Arc::new(ancestor.with_replaced_children(children, resized(ancestor.size)));
    }

    rebuilt
}
