//! Core types for diskweight.
//!
//! This crate provides the fundamental data structures shared by the layout
//! engine and the command line front end: the size-weighted node tree, the
//! scan result envelope produced by an external scanner, layout
//! configuration, and error types.

mod config;
mod error;
mod node;
mod tree;

pub use config::{LayoutConfig, LayoutConfigBuilder, LayoutConfigBuilderError};
pub use error::{LayoutError, SessionError};
pub use node::{Node, NodeId, NodeKind};
pub use tree::ScanResult;
