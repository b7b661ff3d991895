//! Simulated rig
//!
//! Lets the console run without hardware. [`DeviceModel`] mirrors the firmware's
//! stepping rules; [`SimulatedDevice`] runs it on a thread behind the same
//! [`LineSource`]/[`CommandSink`] seams a real serial link uses.

use crate::command::DeviceCommand;
use crate::error::{ControlError, Result};
use crate::protocol::format_telemetry_line;
use crate::transport::{CommandSink, LineSource};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use shadowtrace_core::TelemetrySample;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Half steps in one revolution (200 full steps).
pub const HALF_STEPS_PER_REVOLUTION: i64 = 400;
/// Degrees covered by one half step.
pub const DEGREES_PER_HALF_STEP: f64 = 360.0 / HALF_STEPS_PER_REVOLUTION as f64;
/// Degrees per step at speed preset 1.
pub const SMALLEST_INCREMENT_DEGREES: f64 = 0.2;
/// Period of the simulation loop.
pub const STEP_INTERVAL: Duration = Duration::from_millis(20);

const ANGLE_EPSILON: f64 = 1e-9;

fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn half_steps_for(angle_degrees: f64) -> i64 {
    ((angle_degrees / DEGREES_PER_HALF_STEP).round() as i64).rem_euclid(HALF_STEPS_PER_REVOLUTION)
}

/// Stepper state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceModel {
    running: bool,
    counter_clockwise: bool,
    increment_degrees: f64,
    angle_degrees: f64,
    half_steps: i64,
    target_half_steps: Option<i64>,
    half_step_pending: bool,
}

impl Default for DeviceModel {
    fn default() -> Self {
        Self {
            running: false,
            counter_clockwise: true,
            increment_degrees: SMALLEST_INCREMENT_DEGREES * 3.0,
            angle_degrees: 0.0,
            half_steps: 0,
            target_half_steps: None,
            half_step_pending: false,
        }
    }
}

impl DeviceModel {
    /// Stopped at 0°, counter-clockwise, speed preset 3.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the motor is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current angle in [0, 360).
    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    /// Current half step count.
    pub fn half_steps(&self) -> i64 {
        self.half_steps
    }

    fn report(&self) -> TelemetrySample {
        TelemetrySample {
            angle_degrees: self.angle_degrees,
            half_steps: self.half_steps,
        }
    }

    /// Executes one command. Returns a report when the position was redefined.
    pub fn apply(&mut self, command: DeviceCommand) -> Option<TelemetrySample> {
        match command {
            DeviceCommand::Continue => self.running = true,
            DeviceCommand::Pause => self.running = false,
            DeviceCommand::Release => {
                self.running = false;
                self.target_half_steps = None;
                self.angle_degrees = 0.0;
                self.half_steps = 0;
                return Some(self.report());
            }
            DeviceCommand::Clockwise => self.counter_clockwise = false,
            DeviceCommand::CounterClockwise => self.counter_clockwise = true,
            DeviceCommand::HalfStep => {
                self.half_step_pending = true;
                self.running = true;
            }
            DeviceCommand::Speed(preset) => {
                self.increment_degrees = SMALLEST_INCREMENT_DEGREES * f64::from(preset);
                self.running = true;
            }
            DeviceCommand::GoTo(angle) => {
                let target = half_steps_for(angle);
                if target != self.half_steps {
                    self.target_half_steps = Some(target);
                    self.running = true;
                }
            }
            DeviceCommand::SetPosition(angle) => {
                self.angle_degrees = wrap_degrees(angle);
                self.half_steps = half_steps_for(self.angle_degrees);
                return Some(self.report());
            }
        }
        None
    }

    /// Advances one simulation step. Returns the new position if the motor moved.
    pub fn step(&mut self) -> Option<TelemetrySample> {
        if !self.running {
            return None;
        }

        let distance = if self.half_step_pending {
            DEGREES_PER_HALF_STEP
        } else {
            self.increment_degrees
        };
        let direction = if self.counter_clockwise { 1.0 } else { -1.0 };
        let previous = self.angle_degrees;
        self.angle_degrees = wrap_degrees(previous + direction * distance);

        if self.half_step_pending {
            self.half_step_pending = false;
            self.running = false;
        }

        if let Some(target) = self.target_half_steps {
            let target_angle = target as f64 * DEGREES_PER_HALF_STEP;
            let remaining = (direction * (target_angle - previous)).rem_euclid(360.0);
            if remaining <= distance + ANGLE_EPSILON {
                self.angle_degrees = target_angle;
                self.target_half_steps = None;
                self.running = false;
                debug!("Simulator reached target {}", target);
            }
        }

        self.half_steps = half_steps_for(self.angle_degrees);
        Some(self.report())
    }
}

/// Handle of a running simulator.
pub struct SimulatedDevice;

impl SimulatedDevice {
    /// Starts the "device-simulator" thread.
    ///
    /// The thread exits once every [`SimulatorSink`] is dropped, after applying the
    /// commands still queued, or on its next report after the [`SimulatorSource`] is dropped.
    pub fn spawn() -> Result<(SimulatorSource, SimulatorSink)> {
        Self::spawn_with(DeviceModel::new(), STEP_INTERVAL)
    }

    /// Starts a simulator from an explicit model and step period.
    pub fn spawn_with(
        mut model: DeviceModel,
        interval: Duration,
    ) -> Result<(SimulatorSource, SimulatorSink)> {
        let (command_tx, command_rx) = unbounded::<DeviceCommand>();
        let (line_tx, line_rx) = unbounded::<String>();

        thread::Builder::new()
            .name("device-simulator".to_string())
            .spawn(move || {
                info!("Device simulator started");
                let emit = |sample: TelemetrySample| line_tx.send(format_telemetry_line(&sample));
                'run: loop {
                    loop {
                        match command_rx.try_recv() {
                            Ok(command) => {
                                if let Some(report) = model.apply(command) {
                                    if emit(report).is_err() {
                                        break 'run;
                                    }
                                }
                            }
                            Err(TryRecvError::Empty) => break,
                            Err(TryRecvError::Disconnected) => break 'run,
                        }
                    }
                    if let Some(sample) = model.step() {
                        if emit(sample).is_err() {
                            break;
                        }
                    }
                    thread::sleep(interval);
                }
                info!("Device simulator stopped");
            })?;

        Ok((
            SimulatorSource { lines: line_rx },
            SimulatorSink {
                commands: command_tx,
            },
        ))
    }
}

/// Telemetry side of the simulator.
#[derive(Debug)]
pub struct SimulatorSource {
    lines: Receiver<String>,
}

impl LineSource for SimulatorSource {
    fn read_line(&mut self) -> Result<Option<String>> {
        match self.lines.recv() {
            Ok(line) => Ok(Some(line.trim_end().to_string())),
            Err(_) => Ok(None),
        }
    }
}

/// Command side of the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorSink {
    commands: Sender<DeviceCommand>,
}

impl CommandSink for SimulatorSink {
    fn send(&mut self, command: &DeviceCommand) -> Result<()> {
        self.commands
            .send(*command)
            .map_err(|_| ControlError::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_model_does_not_move() {
        let mut model = DeviceModel::new();
        assert_eq!(model.step(), None);
    }

    #[test]
    fn test_speed_preset_starts_motor() {
        let mut model = DeviceModel::new();
        model.apply(DeviceCommand::Speed(5));
        let sample = model.step().unwrap();
        assert!((sample.angle_degrees - 1.0).abs() < 1e-9);
        assert_eq!(sample.half_steps, 1);
    }

    #[test]
    fn test_clockwise_wraps_below_zero() {
        let mut model = DeviceModel::new();
        model.apply(DeviceCommand::Clockwise);
        model.apply(DeviceCommand::Speed(1));
        let sample = model.step().unwrap();
        assert!((sample.angle_degrees - 359.8).abs() < 1e-9);
    }

    #[test]
    fn test_half_step_moves_once() {
        let mut model = DeviceModel::new();
        model.apply(DeviceCommand::HalfStep);
        let sample = model.step().unwrap();
        assert!((sample.angle_degrees - 0.9).abs() < 1e-9);
        assert_eq!(sample.half_steps, 1);
        assert!(!model.is_running());
        assert_eq!(model.step(), None);
    }

    #[test]
    fn test_goto_stops_on_target() {
        let mut model = DeviceModel::new();
        model.apply(DeviceCommand::Speed(6));
        model.apply(DeviceCommand::GoTo(90.0));

        let mut steps = 0;
        while model.is_running() {
            model.step();
            steps += 1;
            assert!(steps < 1000, "never reached target");
        }
        assert_eq!(model.half_steps(), 100);
        assert!((model.angle_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_position_recalibrates() {
        let mut model = DeviceModel::new();
        let report = model.apply(DeviceCommand::SetPosition(180.0)).unwrap();
        assert_eq!(report.half_steps, 200);
        assert!(!model.is_running());
    }

    #[test]
    fn test_release_zeroes_and_stops() {
        let mut model = DeviceModel::new();
        model.apply(DeviceCommand::Speed(2));
        model.step();
        model.apply(DeviceCommand::Release);
        assert!(!model.is_running());
        assert_eq!(model.half_steps(), 0);
    }

    #[test]
    fn test_pause_and_continue() {
        let mut model = DeviceModel::new();
        model.apply(DeviceCommand::Speed(1));
        model.apply(DeviceCommand::Pause);
        assert_eq!(model.step(), None);
        model.apply(DeviceCommand::Continue);
        assert!(model.step().is_some());
    }

    #[test]
    fn test_thread_exits_when_sinks_dropped() {
        let (mut source, sink) =
            SimulatedDevice::spawn_with(DeviceModel::new(), Duration::from_millis(1)).unwrap();
        let mut command_sink = sink.clone();
        command_sink.send(&DeviceCommand::SetPosition(90.0)).unwrap();
        drop(command_sink);
        drop(sink);

        assert_eq!(source.read_line().unwrap(), Some("90.00 100".to_string()));
        assert_eq!(source.read_line().unwrap(), None);
    }
}
