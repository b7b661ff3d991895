//! Error types for the device link
use shadowtrace_core::SampleParseError;
use thiserror::Error;

/// Device link errors
#[derive(Error, Debug)]
pub enum ControlError {
    /// I/O error on the serial line or stream
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serial port could not be configured
    #[error("Serial configuration error: {0}")]
    SerialConfig(String),

    /// Unsupported baud rate
    #[error("Unsupported baud rate: {0}")]
    UnsupportedBaud(u32),

    /// Telemetry line did not parse
    #[error("Invalid telemetry: {0}")]
    InvalidTelemetry(#[from] SampleParseError),

    /// Unknown or malformed command token
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// The other end of a channel went away
    #[error("Link disconnected")]
    Disconnected,
}

/// Result type for device link operations
pub type Result<T> = std::result::Result<T, ControlError>;
