//! Error types for layout and navigation.
//!
//! A missing node is never an error: lookups return `Option` or an empty
//! path. The variants here cover caller precondition violations and the
//! session-level failures built on top of them.

use thiserror::Error;

use crate::node::NodeId;

/// Errors raised by the radial layout engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A zero-sized node has children with a non-zero size.
    #[error("Node {id} has size 0 but non-empty children; cannot apportion its span")]
    ZeroSizedParent { id: NodeId },

    /// The angular span is empty, reversed or negative.
    #[error("Invalid angular span [{start}, {end})")]
    InvalidSpan { start: f64, end: f64 },
}

/// Errors raised while navigating or editing a view session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// No node with the identifier exists in the current tree.
    #[error("Node not found: {id}")]
    NotFound { id: NodeId },

    /// The node exists but cannot be entered.
    #[error("Not a directory with children: {id}")]
    NotADirectory { id: NodeId },

    /// An attempt was made to remove the root of the tree.
    #[error("Refusing to remove the root node: {id}")]
    RootRemoval { id: NodeId },

    /// Breadcrumb index beyond the current navigation depth.
    #[error("Breadcrumb index {index} out of range (depth {depth})")]
    BreadcrumbOutOfRange { index: usize, depth: usize },

    /// The external deletion failed; the tree was left untouched.
    #[error("Deletion of {id} failed: {message}")]
    DeletionFailed { id: NodeId, message: String },

    /// Layout of the current view failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
