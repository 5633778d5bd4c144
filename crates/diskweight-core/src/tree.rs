//! Scan result envelope.

use std::io::{Read, Write};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::node::Node;

/// Complete scanned tree with the metadata reported by the scanner.
///
/// The counters are taken from the scanner and are never re-derived from
/// the tree; [`ScanResult::after_removal`] only subtracts from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Root node of the tree.
    pub root: Arc<Node>,

    /// Total size in bytes.
    pub total_size: u64,

    /// Total number of files.
    pub total_files: u64,

    /// Total number of directories.
    pub total_directories: u64,

    /// When the scan started.
    #[serde(rename = "scanTime", alias = "scanStartedAt")]
    pub scan_started_at: DateTime<Utc>,

    /// Scan duration in milliseconds.
    #[serde(rename = "scanDuration", alias = "scanDurationMs")]
    pub scan_duration_ms: u64,
}

impl ScanResult {
    /// Create a new scan result.
    pub fn new(
        root: Arc<Node>,
        total_files: u64,
        total_directories: u64,
        scan_started_at: DateTime<Utc>,
        scan_duration: Duration,
    ) -> Self {
        Self {
            total_size: root.size,
            root,
            total_files,
            total_directories,
            scan_started_at,
            scan_duration_ms: u64::try_from(scan_duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Load a scan export from JSON.
    ///
    /// Nesting depth is unbounded; the stack grows on the heap as needed.
    pub fn from_reader(reader: impl Read) -> serde_json::Result<Self> {
        let mut de = serde_json::Deserializer::from_reader(reader);
        de.disable_recursion_limit();
        let scan = Self::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        de.end()?;
        Ok(scan)
    }

    /// Write this scan as pretty-printed JSON.
    pub fn to_writer(&self, writer: impl Write) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }

    /// Get the scan duration.
    pub fn scan_duration(&self) -> Duration {
        Duration::from_millis(self.scan_duration_ms)
    }

    /// Return a copy of this scan whose root had a subtree pruned from it.
    ///
    /// The removed counts cover the pruned node itself and everything below
    /// it. Every scanner counter drops by them, so the totals stay consistent
    /// whether or not ancestor sizes were adjusted.
    pub fn after_removal(
        &self,
        root: Arc<Node>,
        removed_size: u64,
        removed_files: u64,
        removed_directories: u64,
    ) -> Self {
        Self {
            root,
            total_size: self.total_size.saturating_sub(removed_size),
            total_files: self.total_files.saturating_sub(removed_files),
            total_directories: self.total_directories.saturating_sub(removed_directories),
            ..self.clone()
        }
    }
}
