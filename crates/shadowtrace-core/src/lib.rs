//! ShadowTrace Core - Waveform Model and Telemetry State
//!
//! This crate contains everything the console animates, independent of any GUI:
//! - Fixed-capacity sample shift buffer
//! - Render parameters and their operator ranges
//! - Shared telemetry context (ingest thread -> animation loop)
//! - Angle ingest (look-ahead, running offset, projection height)
//! - Tick scheduling and the waveform renderer producing draw lists
//! - Logging configuration

#![warn(missing_docs)]

pub use glam::Vec2;

pub mod buffer;
pub mod decoration;
pub mod frame;
pub mod ingest;
pub mod logging;
pub mod params;
pub mod renderer;
pub mod schedule;
pub mod telemetry;

pub use buffer::{SampleBuffer, SAMPLE_CAPACITY};
pub use decoration::{DecorationField, DecorationPoint};
pub use frame::{DrawOp, Frame, Rgb};
pub use ingest::{
    effective_angle, projection_height, AngleIngest, SampleParseError, TelemetrySample,
};
pub use logging::LogConfig;
pub use params::RenderParams;
pub use renderer::WaveformRenderer;
pub use schedule::TickSchedule;
pub use telemetry::{Readout, TelemetryContext};
