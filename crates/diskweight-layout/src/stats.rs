//! Descendant counters for a subtree.

use serde::{Deserialize, Serialize};

use diskweight_core::{Node, NodeKind};

/// Summary counters over a node's descendants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStats {
    /// Number of non-directory descendants.
    pub total_files: u64,
    /// Number of directory descendants.
    pub total_directories: u64,
    /// The node's own reported size.
    pub total_size: u64,
}

impl NodeStats {
    /// Total number of descendants counted.
    pub fn descendants(&self) -> u64 {
        self.total_files + self.total_directories
    }
}

/// Count the files and directories below `node`.
///
/// The node itself is not counted. `total_size` is the node's own `size`
/// field; descendant sizes are not re-summed.
pub fn node_stats(node: Option<&Node>) -> NodeStats {
    let Some(node) = node else {
        return NodeStats::default();
    };

    let mut stats = NodeStats {
        total_size: node.size,
        ..NodeStats::default()
    };

    let mut pending: Vec<&Node> = node.children.iter().map(AsRef::as_ref).collect();
    while let Some(current) = pending.pop() {
        match current.kind {
            NodeKind::Directory => {
                stats.total_directories += 1;
                pending.extend(current.children.iter().map(AsRef::as_ref));
            }
            NodeKind::File => stats.total_files += 1,
        }
    }

    stats
}
