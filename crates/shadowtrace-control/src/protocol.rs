//! Telemetry line protocol: `<angle> <half_steps>\n`.

use crate::error::Result;
use shadowtrace_core::TelemetrySample;

/// Parses one inbound line.
pub fn parse_telemetry_line(line: &str) -> Result<TelemetrySample> {
    Ok(line.parse()?)
}

/// Formats a sample the way the firmware prints it.
pub fn format_telemetry_line(sample: &TelemetrySample) -> String {
    format!("{}\n", sample)
}
