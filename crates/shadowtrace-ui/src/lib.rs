//! ShadowTrace UI - egui Operator Console
//!
//! This crate provides the operator-facing layer:
//! - Control panel (speed, calibration, navigation, monitor)
//! - Waveform view painting the renderer's draw list
//! - Keyboard shortcuts
//!
//! Panels never act directly; they queue [`UIAction`]s for the application.

#![warn(missing_docs)]

pub mod console;
pub mod panels;
pub mod shortcuts;
pub mod widgets;

pub use console::ConsoleUI;
pub use panels::control_panel::ControlPanel;
pub use widgets::waveform_view::WaveformView;

use shadowtrace_control::DeviceCommand;

/// UI actions that can be triggered by the user interface
#[derive(Debug, Clone, PartialEq)]
pub enum UIAction {
    /// Send a command to the rig
    Device(DeviceCommand),

    // Animation
    /// Freeze the waveform
    PauseTime,
    /// Resume the waveform
    ResumeTime,
    /// Zero the trace history
    ClearTrace,

    // GUI calibration
    /// Set amplitude in pixels
    SetAmplitude(f32),
    /// Set trace pen width
    SetPenWidth(f32),
    /// Set horizontal axis Y coordinate
    SetAxisY(f32),
    /// Set axis offset from the right edge
    SetAxisOffset(f32),
    /// Set raw tick interval (x10 ms)
    SetTickInterval(u32),

    // PC calibration
    /// Set running angle offset in degrees
    SetRunningOffset(i32),
}
