//! Drill-down navigation over one scanned tree.
//!
//! A session owns the current root and a breadcrumb stack from the root to
//! the node being viewed. Derived views are always computed for the last
//! breadcrumb. After an external deletion succeeds the root is replaced with
//! a pruned copy and the breadcrumbs are re-resolved against it.

use std::sync::Arc;

use tracing::{debug, warn};

use diskweight_core::{LayoutConfig, LayoutError, Node, NodeId, SessionError};

use crate::locate::path_to;
use crate::prune::{prune, prune_resized};
use crate::stats::{NodeStats, node_stats};
use crate::sunburst::{SunburstLayout, SunburstSegment};
use crate::treemap::{TreemapProjection, project};

/// Result reported by the collaborator that deletes paths on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// The path is gone.
    Deleted,
    /// The path could not be removed.
    Failed(String),
}

/// Navigation state for one tree.
#[derive(Debug, Clone)]
pub struct ViewSession {
    root: Arc<Node>,
    breadcrumbs: Vec<Arc<Node>>,
    config: LayoutConfig,
}

impl ViewSession {
    /// Create a session viewing `root` with the default configuration.
    pub fn new(root: Arc<Node>) -> Self {
        Self::with_config(root, LayoutConfig::default())
    }

    /// Create a session with a custom configuration.
    pub fn with_config(root: Arc<Node>, config: LayoutConfig) -> Self {
        Self {
            breadcrumbs: vec![Arc::clone(&root)],
            root,
            config,
        }
    }

    /// The current root of the tree.
    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    /// The node currently being viewed.
    pub fn current(&self) -> &Arc<Node> {
        self.breadcrumbs.last().unwrap_or(&self.root)
    }

    /// Path from the root to the current node, both inclusive.
    pub fn breadcrumbs(&self) -> &[Arc<Node>] {
        &self.breadcrumbs
    }

    /// Number of levels below the root being viewed.
    pub fn depth(&self) -> usize {
        self.breadcrumbs.len().saturating_sub(1)
    }

    /// Layout configuration in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// View the directory with `id`.
    pub fn drill_into(&mut self, id: &NodeId) -> Result<&Arc<Node>, SessionError> {
        let path = path_to(Some(&self.root), id);
        let Some(target) = path.last() else {
            return Err(SessionError::NotFound { id: id.clone() });
        };
        if !target.is_dir() || !target.has_children() {
            return Err(SessionError::NotADirectory { id: id.clone() });
        }

        debug!(id = %id, depth = path.len() - 1, "Drilling into node");
        self.breadcrumbs = path;
        Ok(self.current())
    }

    /// Go up one level. Returns `false` when already at the root.
    pub fn drill_up(&mut self) -> bool {
        if self.breadcrumbs.len() <= 1 {
            return false;
        }
        self.breadcrumbs.pop();
        true
    }

    /// Go back to the breadcrumb at `index` (0 is the root).
    pub fn jump_to(&mut self, index: usize) -> Result<&Arc<Node>, SessionError> {
        if index >= self.breadcrumbs.len() {
            return Err(SessionError::BreadcrumbOutOfRange {
                index,
                depth: self.depth(),
            });
        }
        self.breadcrumbs.truncate(index + 1);
        Ok(self.current())
    }

    /// Apply the outcome of deleting the node with `id` on disk.
    ///
    /// On success the node is pruned from the in-memory tree. If it was on the
    /// breadcrumb stack, navigation falls back to its parent. On failure the
    /// tree is left untouched and the failure is returned.
    pub fn apply_deletion(
        &mut self,
        id: &NodeId,
        outcome: DeletionOutcome,
    ) -> Result<&Arc<Node>, SessionError> {
        if let DeletionOutcome::Failed(message) = outcome {
            warn!(id = %id, reason = %message, "Deletion failed, keeping tree");
            return Err(SessionError::DeletionFailed {
                id: id.clone(),
                message,
            });
        }

        if self.root.id == *id {
            warn!(id = %id, "Refusing to prune the root");
            return Err(SessionError::RootRemoval { id: id.clone() });
        }

        let new_root = if self.config.resize_on_prune {
            prune_resized(&self.root, id)
        } else {
            prune(&self.root, id)
        };

        if Arc::ptr_eq(&new_root, &self.root) {
            debug!(id = %id, "Deleted node not in tree, nothing to prune");
            return Ok(self.current());
        }

        let focus = match self.breadcrumbs.iter().position(|n| n.id == *id) {
            Some(position) => self.breadcrumbs[position - 1].id.clone(),
            None => self.current().id.clone(),
        };

        self.root = new_root;
        self.breadcrumbs = path_to(Some(&self.root), &focus);
        if self.breadcrumbs.is_empty() {
            self.breadcrumbs.push(Arc::clone(&self.root));
        }

        debug!(id = %id, depth = self.depth(), "Pruned deleted node");
        Ok(self.current())
    }

    /// Descendant counters for the current node.
    pub fn stats(&self) -> NodeStats {
        node_stats(Some(self.current()))
    }

    /// Rectangle view of the current node.
    pub fn treemap(&self) -> TreemapProjection {
        project(Some(self.current()), self.config.max_items)
    }

    /// Sunburst geometry for the current node.
    pub fn sunburst(&self) -> Result<Vec<SunburstSegment>, LayoutError> {
        SunburstLayout::from(&self.config).layout_root(self.current())
    }
}
