use clap::Parser;
use shadowtrace_control::DEFAULT_BAUD;

#[derive(Parser, Debug, Clone)]
#[command(name = "shadowtrace")]
#[command(about = "Live shadow of a rotating vector, with rig controls")]
#[command(version)]
pub struct Cli {
    /// Serial device the rig is attached to
    #[arg(long, default_value = "/dev/ttyUSB0")]
    pub port: String,

    /// Serial line speed
    #[arg(long, default_value_t = DEFAULT_BAUD)]
    pub baud: u32,

    /// Run against a simulated rig instead of the serial port
    #[arg(long)]
    pub simulate: bool,

    /// Default log level (RUST_LOG overrides)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
