//! Tree aggregation and view geometry for diskweight.
//!
//! Every operation here is a pure function of an immutable [`Node`] tree:
//!
//! - **Statistics** - descendant file/directory counters ([`node_stats`])
//! - **Navigation** - identifier lookup and breadcrumb paths ([`locate`], [`path_to`])
//! - **Pruning** - copy-on-write removal of a subtree ([`prune`])
//! - **Treemap** - ranked, filtered children for area rendering ([`project`])
//! - **Sunburst** - angular/radial partition of a subtree ([`SunburstLayout`])
//!
//! Full-tree traversals use an explicit work stack, so tree depth does not
//! bound the call stack.
//!
//! # Rectangle view
//!
//! ```rust
//! use diskweight_layout::{project, Node};
//!
//! let root = Node::new_directory("1", "root", 5000).with_children([
//!     Node::new_file("2", "large", 3000),
//!     Node::new_file("3", "medium", 500),
//!     Node::new_file("4", "empty", 0),
//! ]);
//!
//! let view = project(Some(&root), 20);
//! assert_eq!(view.items.len(), 2);
//! assert_eq!(view.max_item_size, 3000);
//! ```
//!
//! # Sunburst
//!
//! ```rust
//! use diskweight_layout::{Node, SunburstLayout};
//!
//! let root = Node::new_directory("1", "root", 4)
//!     .with_children([Node::new_file("2", "a", 3), Node::new_file("3", "b", 1)])
//!     .into_shared();
//!
//! let segments = SunburstLayout::default().layout_root(&root).unwrap();
//! assert_eq!(segments.len(), 3);
//! assert_eq!(segments[1].end_angle, 270.0);
//! ```
//!
//! # Editing after a deletion
//!
//! ```rust
//! use diskweight_layout::{DeletionOutcome, Node, NodeId, ViewSession};
//!
//! let root = Node::new_directory("1", "root", 30)
//!     .with_children([Node::new_file("2", "a", 10), Node::new_file("3", "b", 20)])
//!     .into_shared();
//!
//! let mut session = ViewSession::new(root);
//! session.apply_deletion(&NodeId::new("3"), DeletionOutcome::Deleted).unwrap();
//! assert_eq!(session.root().child_count(), 1);
//! ```

mod locate;
mod prune;
mod session;
mod stats;
pub mod sunburst;
pub mod treemap;

pub use locate::{locate, path_to};
pub use prune::{prune, prune_resized};
pub use session::{DeletionOutcome, ViewSession};
pub use stats::{NodeStats, node_stats};
pub use sunburst::{SunburstLayout, SunburstSegment};
pub use treemap::{DEFAULT_MAX_ITEMS, TreemapItem, TreemapProjection, project};

// Re-export core types
pub use diskweight_core::{LayoutConfig, LayoutError, Node, NodeId, NodeKind, SessionError};
