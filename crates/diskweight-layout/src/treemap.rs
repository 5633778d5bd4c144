//! Data preparation for the rectangle (treemap) view.
//!
//! The packing itself is done by the renderer; this module only decides which
//! children are shown and in what order.

use std::sync::Arc;

use compact_str::CompactString;
use serde::Serialize;

use diskweight_core::{Node, NodeId};

/// Default number of children shown in the rectangle view.
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// One rectangle to render.
#[derive(Debug, Clone, Serialize)]
pub struct TreemapItem {
    /// Display label.
    pub name: CompactString,
    /// Size in bytes, used as the rectangle's weight.
    pub size: u64,
    /// The child this item was built from.
    #[serde(skip)]
    pub node: Arc<Node>,
}

impl TreemapItem {
    /// Identifier of the underlying node.
    pub fn id(&self) -> &NodeId {
        &self.node.id
    }

    /// Percentage of `total` taken by this item, 0 when `total` is 0.
    pub fn share_of(&self, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.size as f64 / total as f64 * 100.0
        }
    }
}

/// Ranked children of one node.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TreemapProjection {
    /// Non-empty children, largest first.
    pub items: Vec<TreemapItem>,
    /// Largest size among `items`, 0 when there are none.
    pub max_item_size: u64,
    /// The projected node's own size.
    ///
    /// When items were truncated this exceeds the sum of `items`.
    pub total_size: u64,
}

impl TreemapProjection {
    /// Check if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Rank the direct children of `node` for area-proportional rendering.
///
/// Zero-size children are dropped, the rest are ordered by size descending
/// (ties keep their original order) and truncated to `max_items`.
pub fn project(node: Option<&Node>, max_items: usize) -> TreemapProjection {
    let Some(node) = node else {
        return TreemapProjection::default();
    };

    let mut children: Vec<&Arc<Node>> = node.children.iter().filter(|c| c.size > 0).collect();
    children.sort_by(|a, b| b.size.cmp(&a.size));
    children.truncate(max_items);

    let items: Vec<TreemapItem> = children
        .into_iter()
        .map(|child| TreemapItem {
            name: child.name.clone(),
            size: child.size,
            node: Arc::clone(child),
        })
        .collect();

    TreemapProjection {
        max_item_size: items.iter().map(|item| item.size).max().unwrap_or(0),
        total_size: node.size,
        items,
    }
}
