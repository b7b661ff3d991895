//! ShadowTrace Control - Device Link
//!
//! Everything between the console and the rotating-vector rig:
//! - Typed outbound commands and their wire tokens
//! - Telemetry line protocol
//! - Line transport over a serial tty or any byte stream
//! - Background ingest and command-writer threads
//! - A simulated rig for running without hardware

#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod protocol;
pub mod simulator;
pub mod transport;
pub mod worker;

pub use command::DeviceCommand;
pub use error::{ControlError, Result};
pub use protocol::{format_telemetry_line, parse_telemetry_line};
pub use simulator::{DeviceModel, SimulatedDevice, SimulatorSink, SimulatorSource};
pub use transport::{
    open_serial, CommandSink, CommandWriter, LineReader, LineSource, SerialLink, StreamLink,
    DEFAULT_BAUD,
};
pub use worker::{spawn_ingest_worker, CommandDispatcher};
