//! File and directory node types.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier for a node, unique across one scan's tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub CompactString);

impl NodeId {
    /// Create a new NodeId.
    pub fn new(id: impl Into<CompactString>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Type of file system node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Regular file (or anything that is not a directory).
    File,
    /// Directory.
    Directory,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }
}

/// A single file or directory in the size-weighted tree.
///
/// Nodes are immutable once built. Children are held behind [`Arc`] so that
/// edits produce a new tree which reuses every untouched subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier for this node.
    pub id: NodeId,

    /// File/directory name (not full path).
    pub name: CompactString,

    /// Fully-qualified location, handed verbatim to external collaborators.
    #[serde(default)]
    pub path: CompactString,

    /// Size in bytes (aggregate for directories).
    pub size: u64,

    /// Node type.
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Children nodes (directories only), in scanner order.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Arc<Node>>,

    /// Last modification time, if the scanner reported one.
    #[serde(
        default,
        rename = "lastModified",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_at: Option<DateTime<Utc>>,

    /// Hidden entry flag. Informational only.
    #[serde(default, rename = "isHidden")]
    pub hidden: bool,

    /// Permission string as reported by the scanner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<CompactString>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Arc<Node>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Arc<Node>>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Node {
    /// Create a new file node.
    pub fn new_file(id: impl Into<NodeId>, name: impl Into<CompactString>, size: u64) -> Self {
        Self::new(id.into(), name.into(), NodeKind::File, size)
    }

    /// Create a new, empty directory node with the given aggregate size.
    pub fn new_directory(
        id: impl Into<NodeId>,
        name: impl Into<CompactString>,
        size: u64,
    ) -> Self {
        Self::new(id.into(), name.into(), NodeKind::Directory, size)
    }

    fn new(id: NodeId, name: CompactString, kind: NodeKind, size: u64) -> Self {
        Self {
            id,
            path: name.clone(),
            name,
            size,
            kind,
            children: Vec::new(),
            modified_at: None,
            hidden: false,
            permissions: None,
        }
    }

    /// Set the children of this node.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }

    /// Set the fully-qualified path.
    pub fn with_path(mut self, path: impl Into<CompactString>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the modification time.
    pub fn with_modified(mut self, modified_at: DateTime<Utc>) -> Self {
        self.modified_at = Some(modified_at);
        self
    }

    /// Mark the node as hidden.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Wrap this node in a shared handle.
    pub fn into_shared(self) -> Arc<Node> {
        Arc::new(self)
    }

    /// Copy this node's scalar fields onto a new children sequence.
    ///
    /// The existing children are not cloned; callers pass the sequence the
    /// new node should own, typically reusing most of the old handles.
    pub fn with_replaced_children(&self, children: Vec<Arc<Node>>, size: u64) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
            size,
            kind: self.kind,
            children,
            modified_at: self.modified_at,
            hidden: self.hidden,
            permissions: self.permissions.clone(),
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Check if this node has any children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
