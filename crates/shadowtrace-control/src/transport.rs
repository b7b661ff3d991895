//! Line transport
//!
//! The rig talks newline-delimited ASCII in both directions. [`StreamLink`]
//! wraps any reader/writer pair; [`open_serial`] builds one on a tty.

use crate::command::DeviceCommand;
use crate::error::{ControlError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

/// Default line speed of the rig firmware.
pub const DEFAULT_BAUD: u32 = 115_200;

/// Blocking source of inbound lines.
pub trait LineSource: Send {
    /// Next line without its terminator, or `None` at end of stream.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Destination for outbound commands.
pub trait CommandSink: Send {
    /// Writes one command.
    fn send(&mut self, command: &DeviceCommand) -> Result<()>;
}

/// Buffered reader half.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    /// Wraps an already buffered reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(64),
        }
    }
}

impl<R: BufRead + Send> LineSource for LineReader<R> {
    fn read_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let n = self.inner.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }
        // Line noise may not be valid UTF-8; the parser rejects what's left.
        let line = String::from_utf8_lossy(&self.buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Writer half.
#[derive(Debug)]
pub struct CommandWriter<W> {
    inner: W,
}

impl<W: Write> CommandWriter<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Consumes the wrapper.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Send> CommandSink for CommandWriter<W> {
    fn send(&mut self, command: &DeviceCommand) -> Result<()> {
        self.inner.write_all(command.to_wire().as_bytes())?;
        self.inner.flush()?;
        debug!("Sent command {:?}", command);
        Ok(())
    }
}

/// Reader and writer for one device.
#[derive(Debug)]
pub struct StreamLink<R, W> {
    /// Inbound telemetry.
    pub reader: LineReader<R>,
    /// Outbound commands.
    pub writer: CommandWriter<W>,
}

impl<R: BufRead, W: Write> StreamLink<R, W> {
    /// Pairs a reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: LineReader::new(reader),
            writer: CommandWriter::new(writer),
        }
    }

    /// Splits into the halves so they can move to separate threads.
    pub fn split(self) -> (LineReader<R>, CommandWriter<W>) {
        (self.reader, self.writer)
    }
}

/// A link over a serial device node.
pub type SerialLink = StreamLink<BufReader<File>, File>;

/// Opens `path` read/write and puts the line into raw mode at `baud`.
pub fn open_serial(path: impl AsRef<Path>, baud: u32) -> Result<SerialLink> {
    let path = path.as_ref();
    let file = OpenOptions::new().read(true).write(true).open(path)?;
    configure_line(&file, baud)?;

    let writer = file.try_clone()?;
    info!("Opened serial port {} at {} baud", path.display(), baud);
    Ok(StreamLink::new(BufReader::new(file), writer))
}

#[cfg(unix)]
fn configure_line(file: &File, baud: u32) -> Result<()> {
    use nix::sys::termios::{cfmakeraw, cfsetspeed, tcgetattr, tcsetattr, SetArg};

    let rate = baud_rate(baud)?;
    let mut termios =
        tcgetattr(file).map_err(|e| ControlError::SerialConfig(format!("tcgetattr: {}", e)))?;
    cfmakeraw(&mut termios);
    cfsetspeed(&mut termios, rate)
        .map_err(|e| ControlError::SerialConfig(format!("cfsetspeed: {}", e)))?;
    tcsetattr(file, SetArg::TCSANOW, &termios)
        .map_err(|e| ControlError::SerialConfig(format!("tcsetattr: {}", e)))?;
    Ok(())
}

#[cfg(not(unix))]
fn configure_line(_file: &File, baud: u32) -> Result<()> {
    tracing::warn!(
        "Line configuration unsupported on this platform; assuming {} baud is preset",
        baud
    );
    Ok(())
}

#[cfg(unix)]
fn baud_rate(baud: u32) -> Result<nix::sys::termios::BaudRate> {
    use nix::sys::termios::BaudRate;

    Ok(match baud {
        9_600 => BaudRate::B9600,
        19_200 => BaudRate::B19200,
        38_400 => BaudRate::B38400,
        57_600 => BaudRate::B57600,
        115_200 => BaudRate::B115200,
        230_400 => BaudRate::B230400,
        other => return Err(ControlError::UnsupportedBaud(other)),
    })
}
