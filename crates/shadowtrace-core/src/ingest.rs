//! Angle ingest
//!
//! Turns device samples into the projection height the renderer shifts in,
//! plus the readout shown to the operator.

use crate::telemetry::{Readout, TelemetryContext};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Degrees added to every reported angle so the shadow keeps pace with the rig.
pub const LOOK_AHEAD_DEGREES: f64 = 1.0;

/// One decoded telemetry line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    /// Reported angle in degrees.
    pub angle_degrees: f64,
    /// Reported half step count.
    pub half_steps: i64,
}

/// Why a telemetry line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleParseError {
    /// The line had no angle token.
    #[error("missing angle")]
    MissingAngle,
    /// The line had an angle but no half step token.
    #[error("missing half steps")]
    MissingHalfSteps,
    /// The angle token is not a finite number.
    #[error("invalid angle: {0}")]
    InvalidAngle(String),
    /// The half step token does not start with an integer.
    #[error("invalid half steps: {0}")]
    InvalidHalfSteps(String),
}

impl FromStr for TelemetrySample {
    type Err = SampleParseError;

    /// Parses `<float> <integer>`.
    ///
    /// Only the leading digits of the half step token count, so `"12.5 7abc"`
    /// reads as 7. Trailing tokens are ignored.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();

        let angle_token = tokens.next().ok_or(SampleParseError::MissingAngle)?;
        let angle_degrees = angle_token
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| SampleParseError::InvalidAngle(angle_token.to_string()))?;

        let steps_token = tokens.next().ok_or(SampleParseError::MissingHalfSteps)?;
        let half_steps = leading_integer(steps_token)
            .ok_or_else(|| SampleParseError::InvalidHalfSteps(steps_token.to_string()))?;

        Ok(Self {
            angle_degrees,
            half_steps,
        })
    }
}

/// Optional sign plus the run of ASCII digits at the start of `token`.
fn leading_integer(token: &str) -> Option<i64> {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let end = token.len() - unsigned.len() + digits;
    token[..end].parse().ok()
}

impl fmt::Display for TelemetrySample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.angle_degrees, self.half_steps)
    }
}

/// Angle used for the projection: reported + look-ahead + running offset.
pub fn effective_angle(reported_degrees: f64, running_offset: i32) -> f64 {
    reported_degrees + LOOK_AHEAD_DEGREES + f64::from(running_offset)
}

/// Vertical projection of a vector of length `amplitude` at `degrees`.
pub fn projection_height(amplitude: f32, degrees: f64) -> f32 {
    (f64::from(amplitude) * degrees.to_radians().sin()) as f32
}

/// Writes ingest results into a shared [`TelemetryContext`].
#[derive(Debug, Clone)]
pub struct AngleIngest {
    context: Arc<TelemetryContext>,
}

impl AngleIngest {
    /// Creates an ingest bound to `context`.
    pub fn new(context: Arc<TelemetryContext>) -> Self {
        Self { context }
    }

    /// The shared context this ingest writes to.
    pub fn context(&self) -> &Arc<TelemetryContext> {
        &self.context
    }

    /// Applies one decoded sample.
    pub fn on_sample(&self, angle_degrees: f64, half_steps: i64) {
        let ctx = &self.context;
        let effective = effective_angle(angle_degrees, ctx.running_offset());
        ctx.set_angle_degrees(effective);
        ctx.set_current_height(projection_height(ctx.amplitude(), effective));

        // The readout shows the look-ahead but not the running offset.
        ctx.publish_readout(Readout {
            angle_text: format!("{:.2}", angle_degrees + LOOK_AHEAD_DEGREES),
            half_steps,
        });
        trace!("Sample {:.2}° -> {:.2}° effective", angle_degrees, effective);
    }

    /// Parses `line` and applies it. Malformed lines are dropped.
    ///
    /// Returns whether the line was accepted.
    pub fn on_line(&self, line: &str) -> bool {
        match line.parse::<TelemetrySample>() {
            Ok(sample) => {
                self.on_sample(sample.angle_degrees, sample.half_steps);
                true
            }
            Err(e) => {
                debug!("Dropping telemetry line {:?}: {}", line, e);
                false
            }
        }
    }
}
