//! Background I/O threads for the device link.
//!
//! Both threads are detached: they run until their channel or stream ends,
//! or until the process exits.

use crate::command::DeviceCommand;
use crate::error::{ControlError, Result};
use crate::transport::{CommandSink, LineSource};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, info, trace, warn};

/// Pause after a failed read before retrying.
pub const READ_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Spawns the "telemetry-ingest" thread, calling `on_line` for every line read.
pub fn spawn_ingest_worker<S, F>(mut source: S, mut on_line: F) -> Result<JoinHandle<()>>
where
    S: LineSource + 'static,
    F: FnMut(&str) + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("telemetry-ingest".to_string())
        .spawn(move || {
            info!("Telemetry ingest started");
            loop {
                match source.read_line() {
                    Ok(Some(line)) => {
                        trace!("<- {}", line);
                        on_line(&line);
                    }
                    Ok(None) => {
                        info!("Telemetry stream closed");
                        break;
                    }
                    Err(e) => {
                        warn!("Telemetry read failed: {}", e);
                        thread::sleep(READ_ERROR_BACKOFF);
                    }
                }
            }
        })?;
    Ok(handle)
}

/// Non-blocking front for a [`CommandSink`] running on the "device-writer" thread.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    sender: Sender<DeviceCommand>,
}

impl CommandDispatcher {
    /// Moves `sink` onto its own thread and returns the queue feeding it.
    pub fn spawn<K: CommandSink + 'static>(mut sink: K) -> Result<Self> {
        let (sender, receiver): (Sender<DeviceCommand>, Receiver<DeviceCommand>) = unbounded();
        thread::Builder::new()
            .name("device-writer".to_string())
            .spawn(move || {
                for command in receiver.iter() {
                    if let Err(e) = sink.send(&command) {
                        error!("Failed to send {:?}: {}", command, e);
                    }
                }
                info!("Device writer stopped");
            })?;
        Ok(Self { sender })
    }

    /// A dispatcher whose commands are dropped, for running without a device.
    pub fn disconnected() -> Self {
        let (sender, _) = unbounded();
        Self { sender }
    }

    /// Queues one command. Never blocks.
    pub fn send(&self, command: DeviceCommand) -> Result<()> {
        self.sender
            .send(command)
            .map_err(|_| ControlError::Disconnected)
    }

    /// Queues several commands in order.
    pub fn send_all(&self, commands: impl IntoIterator<Item = DeviceCommand>) -> Result<()> {
        commands.into_iter().try_for_each(|c| self.send(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::io;
    use std::sync::Arc;

    struct ScriptedSource {
        lines: VecDeque<Result<Option<String>>>,
    }

    impl LineSource for ScriptedSource {
        fn read_line(&mut self) -> Result<Option<String>> {
            self.lines.pop_front().unwrap_or(Ok(None))
        }
    }

    struct RecordingSink(Arc<Mutex<Vec<DeviceCommand>>>);

    impl CommandSink for RecordingSink {
        fn send(&mut self, command: &DeviceCommand) -> Result<()> {
            self.0.lock().push(*command);
            Ok(())
        }
    }

    #[test]
    fn test_ingest_worker_survives_read_errors() {
        let source = ScriptedSource {
            lines: VecDeque::from(vec![
                Ok(Some("1.00 1".to_string())),
                Err(ControlError::IoError(io::Error::other("glitch"))),
                Ok(Some("2.00 2".to_string())),
            ]),
        };
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let handle = spawn_ingest_worker(source, move |line| sink.lock().push(line.to_string()))
            .unwrap();
        handle.join().unwrap();

        assert_eq!(*seen.lock(), vec!["1.00 1".to_string(), "2.00 2".to_string()]);
    }

    #[test]
    fn test_dispatcher_preserves_order() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = CommandDispatcher::spawn(RecordingSink(Arc::clone(&sent))).unwrap();
        dispatcher.send_all(DeviceCommand::clockwise_half_step()).unwrap();

        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while sent.lock().len() < 3 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(
            *sent.lock(),
            vec![
                DeviceCommand::Clockwise,
                DeviceCommand::HalfStep,
                DeviceCommand::CounterClockwise
            ]
        );
    }

    #[test]
    fn test_disconnected_dispatcher_reports_error() {
        let dispatcher = CommandDispatcher::disconnected();
        assert!(matches!(
            dispatcher.send(DeviceCommand::Pause),
            Err(ControlError::Disconnected)
        ));
    }
}
