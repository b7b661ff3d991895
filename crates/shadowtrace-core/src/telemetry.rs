//! Shared telemetry context
//!
//! One instance is created by the application and shared via `Arc` between the
//! ingest worker and the animation loop. Every field is a latest-value cell:
//! writers overwrite, readers take whatever is newest.

use crate::params::{RenderParams, DEFAULT_RUNNING_OFFSET};
use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicI32, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

/// Operator-facing status text for the last sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readout {
    /// Reported angle plus look-ahead, formatted for display.
    pub angle_text: String,
    /// Half steps as reported by the device.
    pub half_steps: i64,
}

/// Cross-thread state between ingest and rendering.
#[derive(Debug)]
pub struct TelemetryContext {
    current_height: AtomicU32,
    angle_degrees: AtomicU64,
    amplitude: AtomicU32,
    running_offset: AtomicI32,
    readout: ArcSwap<Readout>,
}

impl Default for TelemetryContext {
    fn default() -> Self {
        Self::new(RenderParams::default().amplitude)
    }
}

impl TelemetryContext {
    /// Creates a context with a zero height and the given amplitude.
    pub fn new(amplitude: f32) -> Self {
        Self {
            current_height: AtomicU32::new(0.0f32.to_bits()),
            angle_degrees: AtomicU64::new(0.0f64.to_bits()),
            amplitude: AtomicU32::new(amplitude.to_bits()),
            running_offset: AtomicI32::new(DEFAULT_RUNNING_OFFSET),
            readout: ArcSwap::from_pointee(Readout::default()),
        }
    }

    /// Convenience constructor returning the context already wrapped in an `Arc`.
    pub fn shared(amplitude: f32) -> Arc<Self> {
        Arc::new(Self::new(amplitude))
    }

    /// Latest projection height computed by ingest.
    pub fn current_height(&self) -> f32 {
        f32::from_bits(self.current_height.load(Ordering::Acquire))
    }

    /// Overwrites the projection height.
    pub fn set_current_height(&self, height: f32) {
        self.current_height.store(height.to_bits(), Ordering::Release);
    }

    /// Effective angle of the last sample, used to draw the vector.
    pub fn angle_degrees(&self) -> f64 {
        f64::from_bits(self.angle_degrees.load(Ordering::Acquire))
    }

    /// Overwrites the effective angle.
    pub fn set_angle_degrees(&self, degrees: f64) {
        self.angle_degrees.store(degrees.to_bits(), Ordering::Release);
    }

    /// Amplitude used for the next height computation.
    pub fn amplitude(&self) -> f32 {
        f32::from_bits(self.amplitude.load(Ordering::Acquire))
    }

    /// Sets the amplitude. Already computed heights are not rescaled.
    pub fn set_amplitude(&self, amplitude: f32) {
        self.amplitude.store(amplitude.to_bits(), Ordering::Release);
    }

    /// Running angle offset in degrees.
    pub fn running_offset(&self) -> i32 {
        self.running_offset.load(Ordering::Acquire)
    }

    /// Sets the running angle offset.
    pub fn set_running_offset(&self, degrees: i32) {
        self.running_offset.store(degrees, Ordering::Release);
    }

    /// Snapshot of the latest readout.
    pub fn readout(&self) -> Arc<Readout> {
        self.readout.load_full()
    }

    /// Replaces the readout.
    pub fn publish_readout(&self, readout: Readout) {
        self.readout.store(Arc::new(readout));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_defaults() {
        let ctx = TelemetryContext::default();
        assert_eq!(ctx.current_height(), 0.0);
        assert_eq!(ctx.angle_degrees(), 0.0);
        assert_eq!(ctx.amplitude(), 220.0);
        assert_eq!(ctx.running_offset(), 2);
        assert_eq!(*ctx.readout(), Readout::default());
    }

    #[test]
    fn test_height_round_trips_negative_values() {
        let ctx = TelemetryContext::default();
        ctx.set_current_height(-219.5);
        assert_eq!(ctx.current_height(), -219.5);
    }

    #[test]
    fn test_latest_value_wins_across_threads() {
        let ctx = TelemetryContext::shared(100.0);
        let writer = {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                for i in 0..=100 {
                    ctx.set_current_height(i as f32);
                }
            })
        };
        writer.join().unwrap();
        assert_eq!(ctx.current_height(), 100.0);
    }
}
