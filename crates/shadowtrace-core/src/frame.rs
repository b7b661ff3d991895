//! Backend-neutral draw list produced by the waveform renderer.

use glam::Vec2;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Axis pen.
pub const AXIS_COLOR: Rgb = Rgb(120, 120, 120);
/// Sweep rectangle and label pen.
pub const DECORATION_COLOR: Rgb = Rgb(100, 100, 100);
/// Trace pen.
pub const TRACE_COLOR: Rgb = Rgb(120, 60, 60);
/// Rotating vector pen.
pub const VECTOR_COLOR: Rgb = Rgb(60, 60, 120);
/// Fill of the circle the vector sweeps.
pub const VECTOR_SWEEP_COLOR: Rgb = Rgb(190, 190, 230);
/// Outline of the tip circles.
pub const TIP_CIRCLE_COLOR: Rgb = Rgb(40, 40, 40);
/// Fill of the tip circles.
pub const TIP_FILL_COLOR: Rgb = Rgb(255, 255, 255);
/// Line from the vector tip to its shadow.
pub const PROJECTION_LINE_COLOR: Rgb = Rgb(20, 20, 20);

/// Opacity of the sweep rectangle and labels.
pub const DECORATION_OPACITY: f32 = 0.2;
/// Label font height in pixels.
pub const LABEL_FONT_PX: f32 = 30.0;
/// Font height of the "+1" / "-1" marks on the sweep rectangle.
pub const BOX_LABEL_FONT_PX: f32 = 20.0;

/// A single drawing primitive, coordinates relative to the view's top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Straight line with round caps.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Rgb,
        /// 0.0 transparent, 1.0 opaque.
        opacity: f32,
    },
    /// Stroked (unfilled) rectangle.
    Rect {
        /// Top-left corner.
        min: Vec2,
        /// Width and height.
        size: Vec2,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Rgb,
        /// 0.0 transparent, 1.0 opaque.
        opacity: f32,
    },
    /// Text anchored at its baseline-left.
    Label {
        /// Anchor.
        position: Vec2,
        /// Text.
        text: &'static str,
        /// Pixel height.
        font_px: f32,
        /// Text color.
        color: Rgb,
        /// 0.0 transparent, 1.0 opaque.
        opacity: f32,
    },
    /// Stroked circle, optionally filled.
    Circle {
        /// Center.
        center: Vec2,
        /// Radius.
        radius: f32,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Rgb,
        /// Fill color, `None` for an outline only.
        fill: Option<Rgb>,
        /// 0.0 transparent, 1.0 opaque.
        opacity: f32,
    },
    /// Connected line strip with round caps.
    Polyline {
        /// Vertices, newest sample first.
        points: Vec<Vec2>,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Rgb,
    },
}

/// Ordered draw list for one paint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Primitives in paint order.
    pub ops: Vec<DrawOp>,
}

impl Frame {
    /// Empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a primitive.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// The trace polyline, if present.
    pub fn trace(&self) -> Option<&[Vec2]> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Polyline { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }
}
