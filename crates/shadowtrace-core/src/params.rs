//! Render parameters and the operator-facing ranges for them.

use std::ops::RangeInclusive;
use std::time::Duration;

/// Milliseconds per unit of the raw tick interval setting.
pub const TICK_SCALE_MS: u64 = 10;

/// Amplitude in pixels.
pub const AMPLITUDE_RANGE: RangeInclusive<f32> = 20.0..=300.0;
/// Trace pen width in pixels.
pub const PEN_WIDTH_RANGE: RangeInclusive<f32> = 1.0..=20.0;
/// Raw tick interval, multiplied by [`TICK_SCALE_MS`].
pub const TICK_INTERVAL_RAW_RANGE: RangeInclusive<u32> = 2..=20;
/// Vertical position of the horizontal axis.
pub const AXIS_Y_RANGE: RangeInclusive<f32> = 200.0..=800.0;
/// Axis length expressed as an offset from the right edge.
pub const AXIS_OFFSET_RANGE: RangeInclusive<f32> = 50.0..=1000.0;
/// Calibration offset added to 180 for the "go to 180" preset.
pub const CALIBRATION_OFFSET_RANGE: RangeInclusive<f64> = -4.0..=0.0;
/// Step of the calibration offset spinner.
pub const CALIBRATION_OFFSET_STEP: f64 = 0.5;
/// Running angle offset in whole degrees.
pub const RUNNING_OFFSET_RANGE: RangeInclusive<i32> = 0..=5;

/// Default calibration offset for the "go to 180" preset.
pub const DEFAULT_CALIBRATION_OFFSET: f64 = -3.5;
/// Default running angle offset.
pub const DEFAULT_RUNNING_OFFSET: i32 = 2;

/// Tunable scalars read by the renderer on every paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    /// Peak projection height in pixels.
    pub amplitude: f32,
    /// Trace pen width in pixels.
    pub pen_width: f32,
    /// Y coordinate of the horizontal axis.
    pub axis_y: f32,
    /// Distance between the axis end and the right edge.
    pub axis_offset_from_right: f32,
    /// Raw tick interval (units of [`TICK_SCALE_MS`]).
    pub tick_interval_raw: u32,
    /// Pixels everything moves left per tick.
    pub scroll_per_tick: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            amplitude: 220.0,
            pen_width: 10.0,
            axis_y: 248.0,
            axis_offset_from_right: 523.0,
            tick_interval_raw: 10,
            scroll_per_tick: 3.0,
        }
    }
}

impl RenderParams {
    /// Effective period between ticks.
    pub fn tick_interval(&self) -> Duration {
        tick_interval_from_raw(self.tick_interval_raw)
    }
}

/// Converts a raw interval setting into a duration.
pub fn tick_interval_from_raw(raw: u32) -> Duration {
    Duration::from_millis(u64::from(raw) * TICK_SCALE_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = RenderParams::default();
        assert_eq!(params.amplitude, 220.0);
        assert_eq!(params.axis_y, 248.0);
        assert_eq!(params.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_raw_interval_scaling() {
        assert_eq!(tick_interval_from_raw(5), Duration::from_millis(50));
        assert_eq!(tick_interval_from_raw(2), Duration::from_millis(20));
    }

    #[test]
    fn test_defaults_within_operator_ranges() {
        let params = RenderParams::default();
        assert!(AMPLITUDE_RANGE.contains(&params.amplitude));
        assert!(PEN_WIDTH_RANGE.contains(&params.pen_width));
        assert!(AXIS_Y_RANGE.contains(&params.axis_y));
        assert!(AXIS_OFFSET_RANGE.contains(&params.axis_offset_from_right));
        assert!(TICK_INTERVAL_RAW_RANGE.contains(&params.tick_interval_raw));
        assert!(CALIBRATION_OFFSET_RANGE.contains(&DEFAULT_CALIBRATION_OFFSET));
        assert!(RUNNING_OFFSET_RANGE.contains(&DEFAULT_RUNNING_OFFSET));
    }
}
