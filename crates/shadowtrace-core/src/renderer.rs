//! Waveform renderer
//!
//! Owns the sample buffer, render parameters, decorations and tick schedule.
//! [`WaveformRenderer::tick`] advances the animation; [`WaveformRenderer::render`]
//! is side-effect free and turns the current state into a [`Frame`].

use crate::buffer::SampleBuffer;
use crate::decoration::DecorationField;
use crate::frame::{
    DrawOp, Frame, AXIS_COLOR, BOX_LABEL_FONT_PX, DECORATION_COLOR, DECORATION_OPACITY,
    LABEL_FONT_PX, PROJECTION_LINE_COLOR, TIP_CIRCLE_COLOR, TIP_FILL_COLOR, TRACE_COLOR,
    VECTOR_COLOR, VECTOR_SWEEP_COLOR,
};
use crate::params::{tick_interval_from_raw, RenderParams};
use crate::schedule::TickSchedule;
use crate::telemetry::TelemetryContext;
use glam::Vec2;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

const AXIS_PEN_WIDTH: f32 = 2.0;
const RECT_PEN_WIDTH: f32 = 2.0;
const RECT_MARGIN: f32 = 2.0;
const TIP_PEN_WIDTH: f32 = 2.0;
const PROJECTION_LINE_WIDTH: f32 = 5.0;
/// Gap between the sweep box and the circle the vector sweeps.
const WALL_SEPARATION: f32 = 10.0;
const VECTOR_AXIS_OVERHANG: f32 = 10.0;
const SWEEP_OPACITY: f32 = 0.1;
const VECTOR_AXIS_OPACITY: f32 = 0.3;
const SHADOW_OPACITY: f32 = 0.7;
const PROJECTION_LINE_OPACITY: f32 = 0.1;

/// Scrolling shadow of the rotating vector.
#[derive(Debug)]
pub struct WaveformRenderer {
    params: RenderParams,
    buffer: SampleBuffer,
    decorations: DecorationField,
    schedule: TickSchedule,
    time_paused: bool,
    context: Arc<TelemetryContext>,
}

impl WaveformRenderer {
    /// Creates a renderer with default parameters, first tick one interval from now.
    pub fn new(context: Arc<TelemetryContext>) -> Self {
        Self::with_params(RenderParams::default(), context, Instant::now())
    }

    /// Creates a renderer with explicit parameters and start instant.
    ///
    /// The context's amplitude is overwritten with `params.amplitude`.
    pub fn with_params(params: RenderParams, context: Arc<TelemetryContext>, now: Instant) -> Self {
        context.set_amplitude(params.amplitude);
        Self {
            schedule: TickSchedule::new(params.tick_interval(), now),
            params,
            buffer: SampleBuffer::new(),
            decorations: DecorationField::new(),
            time_paused: false,
            context,
        }
    }

    /// Advances the animation by one step.
    ///
    /// While paused this is a no-op; the caller still redraws.
    pub fn tick(&mut self) {
        if self.time_paused {
            return;
        }
        // Screen Y grows downward.
        self.buffer.shift_in(-self.context.current_height());
        self.decorations.drift(self.params.scroll_per_tick);
    }

    /// Ticks if the schedule is due at `now`.
    ///
    /// Returns true whenever a tick fired, paused or not, meaning a redraw is needed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.schedule.poll(now) {
            return false;
        }
        self.tick();
        true
    }

    /// Builds the draw list for a view `width` pixels wide.
    pub fn render(&self, width: f32) -> Frame {
        let p = &self.params;
        let right = width - p.axis_offset_from_right;
        let mut frame = Frame::new();

        frame.push(DrawOp::Line {
            from: Vec2::new(0.0, p.axis_y),
            to: Vec2::new(right, p.axis_y),
            width: AXIS_PEN_WIDTH,
            color: AXIS_COLOR,
            opacity: 1.0,
        });

        self.push_sweep_box(&mut frame, right);

        for point in self.decorations.points() {
            frame.push(DrawOp::Label {
                position: point.position,
                text: point.text,
                font_px: LABEL_FONT_PX,
                color: DECORATION_COLOR,
                opacity: DECORATION_OPACITY,
            });
        }

        let points = self
            .buffer
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, height)| Vec2::new(right - i as f32 * p.scroll_per_tick, height + p.axis_y))
            .collect();
        frame.push(DrawOp::Polyline {
            points,
            width: p.pen_width,
            color: TRACE_COLOR,
        });

        self.push_vector(&mut frame, right);

        frame
    }

    /// Center of the rotating vector when the axis ends at `right`.
    pub fn vector_origin(&self, right: f32) -> Vec2 {
        Vec2::new(
            right + WALL_SEPARATION + self.params.amplitude,
            self.params.axis_y,
        )
    }

    fn push_sweep_box(&self, frame: &mut Frame, right: f32) {
        let p = &self.params;
        let half_pen = (p.pen_width / 2.0).floor();
        frame.push(DrawOp::Rect {
            min: Vec2::new(
                right - half_pen - RECT_MARGIN,
                p.axis_y - p.amplitude - half_pen - RECT_MARGIN,
            ),
            size: Vec2::new(
                p.pen_width + RECT_MARGIN,
                p.amplitude * 2.0 + p.pen_width + RECT_MARGIN,
            ),
            width: RECT_PEN_WIDTH,
            color: DECORATION_COLOR,
            opacity: DECORATION_OPACITY,
        });

        let marks = [
            ("+1", Vec2::new(right - p.pen_width - 25.0, p.axis_y - p.amplitude - 5.0)),
            ("-1", Vec2::new(right - p.pen_width - 18.0, p.axis_y + p.amplitude + 20.0)),
        ];
        for (text, position) in marks {
            frame.push(DrawOp::Label {
                position,
                text,
                font_px: BOX_LABEL_FONT_PX,
                color: DECORATION_COLOR,
                opacity: 1.0,
            });
        }
    }

    /// The vector at the latest effective angle, its shadow on the sweep box,
    /// the tip-to-shadow line and both tip circles.
    fn push_vector(&self, frame: &mut Frame, right: f32) {
        let p = &self.params;
        let origin = self.vector_origin(right);
        let radians = self.context.angle_degrees().to_radians();
        let tip = origin + Vec2::new(radians.cos() as f32, -(radians.sin() as f32)) * p.amplitude;
        let shadow_tip = Vec2::new(right, tip.y);
        let reach = p.amplitude + VECTOR_AXIS_OVERHANG;

        frame.push(DrawOp::Circle {
            center: origin,
            radius: p.amplitude,
            width: AXIS_PEN_WIDTH,
            color: AXIS_COLOR,
            fill: Some(VECTOR_SWEEP_COLOR),
            opacity: SWEEP_OPACITY,
        });
        let vector_axes = [
            (origin - Vec2::new(reach, 0.0), origin + Vec2::new(reach, 0.0)),
            (origin - Vec2::new(0.0, reach), origin + Vec2::new(0.0, reach)),
        ];
        for (from, to) in vector_axes {
            frame.push(DrawOp::Line {
                from,
                to,
                width: AXIS_PEN_WIDTH,
                color: AXIS_COLOR,
                opacity: VECTOR_AXIS_OPACITY,
            });
        }
        frame.push(DrawOp::Line {
            from: origin,
            to: tip,
            width: p.pen_width,
            color: VECTOR_COLOR,
            opacity: 1.0,
        });
        frame.push(DrawOp::Line {
            from: Vec2::new(right, p.axis_y),
            to: Vec2::new(right, p.axis_y - self.context.current_height()),
            width: p.pen_width,
            color: TRACE_COLOR,
            opacity: SHADOW_OPACITY,
        });
        frame.push(DrawOp::Line {
            from: tip,
            to: shadow_tip,
            width: PROJECTION_LINE_WIDTH,
            color: PROJECTION_LINE_COLOR,
            opacity: PROJECTION_LINE_OPACITY,
        });
        for center in [tip, shadow_tip] {
            frame.push(DrawOp::Circle {
                center,
                radius: p.pen_width / 2.0,
                width: TIP_PEN_WIDTH,
                color: TIP_CIRCLE_COLOR,
                fill: Some(TIP_FILL_COLOR),
                opacity: 1.0,
            });
        }
    }

    /// Zeroes the trace history. The next tick shifts in from a flat line.
    pub fn clear_trace(&mut self) {
        self.buffer.clear();
        info!("Trace cleared");
    }

    /// Sets the amplitude for future heights. Buffered slots keep their scale.
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.params.amplitude = amplitude;
        self.context.set_amplitude(amplitude);
    }

    /// Sets the trace pen width.
    pub fn set_pen_width(&mut self, width: f32) {
        self.params.pen_width = width;
    }

    /// Sets the horizontal axis Y coordinate.
    pub fn set_axis_y(&mut self, y: f32) {
        self.params.axis_y = y;
    }

    /// Sets the axis offset from the right edge.
    pub fn set_axis_offset(&mut self, offset: f32) {
        self.params.axis_offset_from_right = offset;
    }

    /// Sets the tick interval in units of 10 ms and restarts the schedule now.
    pub fn set_tick_interval(&mut self, raw: u32) {
        self.set_tick_interval_at(raw, Instant::now());
    }

    /// Same as [`Self::set_tick_interval`] with an explicit restart instant.
    pub fn set_tick_interval_at(&mut self, raw: u32, now: Instant) {
        self.params.tick_interval_raw = raw;
        let interval = tick_interval_from_raw(raw);
        self.schedule.restart(interval, now);
        debug!("Tick interval set to {:?}", interval);
    }

    /// Freezes the buffer and decorations. The schedule keeps running.
    pub fn pause(&mut self) {
        if !self.time_paused {
            info!("Time paused");
        }
        self.time_paused = true;
    }

    /// Resumes shifting.
    pub fn resume(&mut self) {
        if self.time_paused {
            info!("Time resumed");
        }
        self.time_paused = false;
    }

    /// Whether time is paused.
    pub fn is_paused(&self) -> bool {
        self.time_paused
    }

    /// Current parameters.
    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Sample history.
    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Background labels.
    pub fn decorations(&self) -> &DecorationField {
        &self.decorations
    }

    /// Tick schedule.
    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    /// Shared telemetry context.
    pub fn context(&self) -> &Arc<TelemetryContext> {
        &self.context
    }
}
