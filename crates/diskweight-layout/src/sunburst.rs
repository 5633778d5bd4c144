//! Radial (sunburst) layout.
//!
//! Each visited node gets an angular span and a radius band. A node's span is
//! split among its non-empty children in proportion to their sizes, largest
//! child first, with each child starting exactly where the previous one ended.
//! Rings grow outward by a fixed band width per level and never pass the
//! configured outer radius.
//!
//! Angles are in degrees. The engine does not care where 0° points or which
//! way angles wind; that is up to the renderer. Likewise it emits every
//! segment, however thin: hiding tiny arcs or labels is rendering policy.

use std::sync::Arc;

use serde::Serialize;

use diskweight_core::{LayoutConfig, LayoutError, Node};

/// A full turn, the span of the root segment.
pub const FULL_TURN: f64 = 360.0;

/// Geometry for one node of the sunburst.
#[derive(Debug, Clone, Serialize)]
pub struct SunburstSegment {
    /// The node this segment represents.
    #[serde(skip)]
    pub node: Arc<Node>,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Depth below the laid out root (root = 0).
    pub level: u32,
}

impl SunburstSegment {
    /// Angular width in degrees.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Angle halfway through the segment.
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Radial thickness.
    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }
}

/// Radial layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunburstLayout {
    max_level: u32,
    min_radius: f64,
    max_radius: f64,
}

impl Default for SunburstLayout {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl From<&LayoutConfig> for SunburstLayout {
    fn from(config: &LayoutConfig) -> Self {
        Self::new(config)
    }
}

/// Pending node with its assigned geometry.
struct Frame {
    node: Arc<Node>,
    start_angle: f64,
    end_angle: f64,
    inner_radius: f64,
    outer_radius: f64,
    level: u32,
}

impl Frame {
    fn into_segment(self) -> SunburstSegment {
        SunburstSegment {
            node: self.node,
            start_angle: self.start_angle,
            end_angle: self.end_angle,
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            level: self.level,
        }
    }
}

impl SunburstLayout {
    /// Create a layout engine from configuration.
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            max_level: config.max_level.max(1),
            min_radius: config.min_radius,
            max_radius: config.max_radius,
        }
    }

    /// Override the deepest level recursed into.
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level.max(1);
        self
    }

    /// Deepest level whose children are laid out.
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Radial width of one ring.
    pub fn band_width(&self) -> f64 {
        (self.max_radius - self.min_radius) / f64::from(self.max_level)
    }

    /// Lay out `node` as the chart centre: a full turn, the innermost ring,
    /// level 0.
    pub fn layout_root(&self, node: &Arc<Node>) -> Result<Vec<SunburstSegment>, LayoutError> {
        let outer = (self.min_radius + self.band_width()).min(self.max_radius);
        self.layout(node, 0.0, FULL_TURN, self.min_radius, outer, 0)
    }

    /// Lay out `node` and its subtree over `[start_angle, end_angle)`.
    ///
    /// Segments come back in pre-order: a node, then each visited child's
    /// subtree in descending size order. Zero-size children produce no
    /// segment. Nodes at a level above `max_level` are emitted but not
    /// expanded.
    pub fn layout(
        &self,
        node: &Arc<Node>,
        start_angle: f64,
        end_angle: f64,
        inner_radius: f64,
        outer_radius: f64,
        level: u32,
    ) -> Result<Vec<SunburstSegment>, LayoutError> {
        if !(start_angle >= 0.0 && end_angle > start_angle) {
            return Err(LayoutError::InvalidSpan {
                start: start_angle,
                end: end_angle,
            });
        }

        let band = self.band_width();
        let mut segments = Vec::new();
        let mut pending = vec![Frame {
            node: Arc::clone(node),
            start_angle,
            end_angle,
            inner_radius,
            outer_radius,
            level,
        }];

        while let Some(frame) = pending.pop() {
            if frame.level > self.max_level || !frame.node.has_children() {
                segments.push(frame.into_segment());
                continue;
            }

            let mut children: Vec<&Arc<Node>> =
                frame.node.children.iter().filter(|c| c.size > 0).collect();
            children.sort_by(|a, b| b.size.cmp(&a.size));

            if !children.is_empty() && frame.node.size == 0 {
                return Err(LayoutError::ZeroSizedParent {
                    id: frame.node.id.clone(),
                });
            }

            let parent_size = frame.node.size as f64;
            let span = frame.end_angle - frame.start_angle;
            let child_inner = frame.outer_radius;
            let child_outer = (frame.outer_radius + band).min(self.max_radius);

            let mut cursor = frame.start_angle;
            let mut child_frames = Vec::with_capacity(children.len());
            for child in children {
                let child_end = cursor + (child.size as f64 / parent_size) * span;
                child_frames.push(Frame {
                    node: Arc::clone(child),
                    start_angle: cursor,
                    end_angle: child_end,
                    inner_radius: child_inner,
                    outer_radius: child_outer,
                    level: frame.level + 1,
                });
                cursor = child_end;
            }

            segments.push(frame.into_segment());
            pending.extend(child_frames.into_iter().rev());
        }

        Ok(segments)
    }
}
