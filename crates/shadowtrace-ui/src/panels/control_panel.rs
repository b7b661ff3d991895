//! Egui-based rig control panel

use crate::UIAction;
use egui::{CollapsingHeader, DragValue, Grid, Slider, Ui};
use shadowtrace_control::command::{MAX_SPEED, MIN_SPEED};
use shadowtrace_control::DeviceCommand;
use shadowtrace_core::params::{
    AMPLITUDE_RANGE, AXIS_OFFSET_RANGE, AXIS_Y_RANGE, CALIBRATION_OFFSET_RANGE,
    CALIBRATION_OFFSET_STEP, DEFAULT_CALIBRATION_OFFSET, DEFAULT_RUNNING_OFFSET, PEN_WIDTH_RANGE,
    RUNNING_OFFSET_RANGE, TICK_INTERVAL_RAW_RANGE,
};
use shadowtrace_core::{Readout, RenderParams};
use tracing::warn;

/// Offsets offered as one-click calibration presets (applied negated).
const CALIBRATION_PRESETS: [f64; 3] = [2.5, 3.0, 3.5];

/// One-click goto targets. 180 goes through the calibration offset.
const GOTO_PRESETS: [f64; 7] = [0.0, 30.0, 45.0, 60.0, 90.0, 180.0, 270.0];

/// Values edited by the GUI calibration section.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GuiCalibration {
    tick_interval_raw: u32,
    amplitude: f32,
    pen_width: f32,
    axis_y: f32,
    axis_offset: f32,
}

impl GuiCalibration {
    /// Pixel settings are whole numbers.
    fn rounded(self) -> Self {
        Self {
            amplitude: self.amplitude.round(),
            pen_width: self.pen_width.round(),
            axis_y: self.axis_y.round(),
            axis_offset: self.axis_offset.round(),
            ..self
        }
    }
}

impl From<&RenderParams> for GuiCalibration {
    fn from(params: &RenderParams) -> Self {
        Self {
            tick_interval_raw: params.tick_interval_raw,
            amplitude: params.amplitude,
            pen_width: params.pen_width,
            axis_y: params.axis_y,
            axis_offset: params.axis_offset_from_right,
        }
    }
}

/// UI for driving the rig and tuning the waveform.
#[derive(Debug, Clone)]
pub struct ControlPanel {
    /// Text of the "set current position as" field.
    pub position_text: String,
    /// Text of the goto field.
    pub goto_text: String,
    /// Offset added to 180 for the "go to 180" preset.
    pub calibration_offset: f64,
    /// Degrees added to every reported angle before projection.
    pub running_offset: i32,
    gui: GuiCalibration,
    actions: Vec<UIAction>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(&RenderParams::default())
    }
}

impl ControlPanel {
    /// Creates a panel showing `params` as the initial GUI calibration.
    pub fn new(params: &RenderParams) -> Self {
        Self {
            position_text: String::new(),
            goto_text: String::new(),
            calibration_offset: DEFAULT_CALIBRATION_OFFSET,
            running_offset: DEFAULT_RUNNING_OFFSET,
            gui: GuiCalibration::from(params),
            actions: Vec::new(),
        }
    }

    /// Drains queued actions.
    pub fn take_actions(&mut self) -> Vec<UIAction> {
        std::mem::take(&mut self.actions)
    }

    fn device(&mut self, command: DeviceCommand) {
        self.actions.push(UIAction::Device(command));
    }

    /// Pauses the rig and freezes the waveform.
    pub fn pause_vector_and_time(&mut self) {
        self.actions.push(UIAction::PauseTime);
        self.device(DeviceCommand::Pause);
    }

    /// Resumes the rig and the waveform.
    pub fn continue_vector_and_time(&mut self) {
        self.device(DeviceCommand::Continue);
        self.actions.push(UIAction::ResumeTime);
    }

    /// Sends `g<goto_text>` if the field holds a number.
    pub fn go_to_typed_angle(&mut self) {
        match self.goto_text.trim().parse::<f64>() {
            Ok(angle) => self.device(DeviceCommand::GoTo(angle)),
            Err(_) => warn!("Ignoring goto, not an angle: {:?}", self.goto_text),
        }
    }

    /// Sends a goto for a preset button. 180 applies the calibration offset.
    pub fn go_to_preset(&mut self, angle: f64) {
        let command = if angle == 180.0 {
            DeviceCommand::goto_180(self.calibration_offset)
        } else {
            DeviceCommand::GoTo(angle)
        };
        self.device(command);
    }

    /// Sends `=<position_text>` if the field holds a number.
    pub fn set_typed_position(&mut self) {
        match self.position_text.trim().parse::<f64>() {
            Ok(angle) => self.device(DeviceCommand::SetPosition(angle)),
            Err(_) => warn!("Ignoring position, not an angle: {:?}", self.position_text),
        }
    }

    /// Renders the panel.
    pub fn show(&mut self, ui: &mut Ui, readout: &Readout) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            CollapsingHeader::new("Speed")
                .default_open(true)
                .show(ui, |ui| self.show_speed(ui));
            CollapsingHeader::new("Arduino calibration")
                .default_open(true)
                .show(ui, |ui| self.show_device_calibration(ui));
            CollapsingHeader::new("PC calibration")
                .default_open(true)
                .show(ui, |ui| self.show_pc_calibration(ui));
            CollapsingHeader::new("GUI calibration")
                .default_open(true)
                .show(ui, |ui| self.show_gui_calibration(ui));
            CollapsingHeader::new("Navigation")
                .default_open(true)
                .show(ui, |ui| self.show_navigation(ui));
            CollapsingHeader::new("Monitor")
                .default_open(true)
                .show(ui, |ui| Self::show_monitor(ui, readout));
        });
    }

    fn show_speed(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            for preset in MIN_SPEED..=MAX_SPEED {
                if ui.button(preset.to_string()).clicked() {
                    self.device(DeviceCommand::Speed(preset));
                }
            }
        });
    }

    fn show_device_calibration(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Set current position as");
            ui.add(egui::TextEdit::singleline(&mut self.position_text).desired_width(60.0));
            if ui.button("Set").clicked() {
                self.set_typed_position();
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Set as 0").clicked() {
                self.device(DeviceCommand::SetPosition(0.0));
            }
            if ui.button("Set as 180").clicked() {
                self.device(DeviceCommand::SetPosition(180.0));
            }
        });
    }

    fn show_pc_calibration(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("180° offset");
            ui.add(
                Slider::new(&mut self.calibration_offset, CALIBRATION_OFFSET_RANGE)
                    .step_by(CALIBRATION_OFFSET_STEP)
                    .fixed_decimals(1),
            );
        });
        ui.horizontal(|ui| {
            for preset in CALIBRATION_PRESETS {
                if ui.button(format!("{:.1}", preset)).clicked() {
                    self.calibration_offset = -preset;
                }
            }
        });
        ui.horizontal(|ui| {
            ui.label("Running angle offset");
            if ui
                .add(DragValue::new(&mut self.running_offset).range(RUNNING_OFFSET_RANGE))
                .changed()
            {
                self.actions.push(UIAction::SetRunningOffset(self.running_offset));
            }
        });
    }

    fn show_gui_calibration(&mut self, ui: &mut Ui) {
        let before = self.gui;
        let gui = &mut self.gui;

        Grid::new("gui_calibration_grid")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("Time delay (x10 ms)");
                ui.add(DragValue::new(&mut gui.tick_interval_raw).range(TICK_INTERVAL_RAW_RANGE));
                ui.end_row();

                ui.label("Amplitude");
                ui.add(pixels(&mut gui.amplitude, AMPLITUDE_RANGE));
                ui.end_row();

                ui.label("Pen width");
                ui.add(pixels(&mut gui.pen_width, PEN_WIDTH_RANGE));
                ui.end_row();

                ui.label("Vertical position");
                ui.add(pixels(&mut gui.axis_y, AXIS_Y_RANGE));
                ui.end_row();

                ui.label("X axis offset from right");
                ui.add(pixels(&mut gui.axis_offset, AXIS_OFFSET_RANGE));
                ui.end_row();
            });

        let after = self.gui;
        self.push_gui_changes(before, after);
    }

    fn push_gui_changes(&mut self, before: GuiCalibration, after: GuiCalibration) {
        let after = after.rounded();
        self.gui = after;
        if before.tick_interval_raw != after.tick_interval_raw {
            self.actions.push(UIAction::SetTickInterval(after.tick_interval_raw));
        }
        if before.amplitude != after.amplitude {
            self.actions.push(UIAction::SetAmplitude(after.amplitude));
        }
        if before.pen_width != after.pen_width {
            self.actions.push(UIAction::SetPenWidth(after.pen_width));
        }
        if before.axis_y != after.axis_y {
            self.actions.push(UIAction::SetAxisY(after.axis_y));
        }
        if before.axis_offset != after.axis_offset {
            self.actions.push(UIAction::SetAxisOffset(after.axis_offset));
        }
    }

    fn show_navigation(&mut self, ui: &mut Ui) {
        ui.horizontal_wrapped(|ui| {
            if ui.button("Pause vector & time").clicked() {
                self.pause_vector_and_time();
            }
            if ui.button("Pause vector").clicked() {
                self.device(DeviceCommand::Pause);
            }
            if ui.button("Pause time").clicked() {
                self.actions.push(UIAction::PauseTime);
            }
            if ui.button("Continue").clicked() {
                self.continue_vector_and_time();
            }
        });

        ui.horizontal_wrapped(|ui| {
            if ui.button("CCW half step").clicked() {
                for command in DeviceCommand::counter_clockwise_half_step() {
                    self.device(command);
                }
            }
            if ui.button("CW half step").clicked() {
                for command in DeviceCommand::clockwise_half_step() {
                    self.device(command);
                }
            }
            if ui.button("CCW").clicked() {
                self.device(DeviceCommand::CounterClockwise);
            }
            if ui.button("CW").clicked() {
                self.device(DeviceCommand::Clockwise);
            }
            if ui.button("Release").clicked() {
                self.device(DeviceCommand::Release);
            }
            if ui.button("Clear trace").clicked() {
                self.actions.push(UIAction::ClearTrace);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Goto");
            ui.add(egui::TextEdit::singleline(&mut self.goto_text).desired_width(60.0));
            if ui.button("Go").clicked() {
                self.go_to_typed_angle();
            }
        });

        ui.horizontal_wrapped(|ui| {
            for angle in GOTO_PRESETS {
                if ui.button(format!("{}", angle)).clicked() {
                    self.go_to_preset(angle);
                }
            }
        });
    }

    fn show_monitor(ui: &mut Ui, readout: &Readout) {
        Grid::new("monitor_grid").num_columns(2).show(ui, |ui| {
            ui.label("Angle");
            ui.monospace(&readout.angle_text);
            ui.end_row();

            ui.label("Half steps");
            ui.monospace(readout.half_steps.to_string());
            ui.end_row();
        });
    }
}

/// Whole-pixel spin box.
fn pixels(value: &mut f32, range: std::ops::RangeInclusive<f32>) -> DragValue<'_> {
    DragValue::new(value).range(range).speed(1.0).fixed_decimals(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_both_freezes_time_then_pauses_device() {
        let mut panel = ControlPanel::default();
        panel.pause_vector_and_time();
        assert_eq!(
            panel.take_actions(),
            vec![UIAction::PauseTime, UIAction::Device(DeviceCommand::Pause)]
        );
        assert!(panel.take_actions().is_empty());
    }

    #[test]
    fn test_continue_resumes_device_then_time() {
        let mut panel = ControlPanel::default();
        panel.continue_vector_and_time();
        assert_eq!(
            panel.take_actions(),
            vec![UIAction::Device(DeviceCommand::Continue), UIAction::ResumeTime]
        );
    }

    #[test]
    fn test_goto_text_parsed() {
        let mut panel = ControlPanel::default();
        panel.goto_text = " 45.5 ".to_string();
        panel.go_to_typed_angle();
        panel.goto_text = "north".to_string();
        panel.go_to_typed_angle();
        assert_eq!(
            panel.take_actions(),
            vec![UIAction::Device(DeviceCommand::GoTo(45.5))]
        );
    }

    #[test]
    fn test_set_position_text_parsed() {
        let mut panel = ControlPanel::default();
        panel.position_text = "90".to_string();
        panel.set_typed_position();
        assert_eq!(
            panel.take_actions(),
            vec![UIAction::Device(DeviceCommand::SetPosition(90.0))]
        );
    }

    #[test]
    fn test_gui_changes_become_actions() {
        let mut panel = ControlPanel::default();
        let before = panel.gui;
        let mut after = before;
        after.amplitude = 150.0;
        after.tick_interval_raw = 5;
        panel.push_gui_changes(before, after);
        assert_eq!(
            panel.take_actions(),
            vec![UIAction::SetTickInterval(5), UIAction::SetAmplitude(150.0)]
        );
    }

    #[test]
    fn test_gui_changes_round_to_whole_pixels() {
        let mut panel = ControlPanel::default();
        let before = panel.gui;
        let mut after = before;
        after.pen_width = 7.6;
        after.axis_y = 248.3;
        panel.push_gui_changes(before, after);

        assert_eq!(panel.take_actions(), vec![UIAction::SetPenWidth(8.0)]);
        assert_eq!(panel.gui.pen_width, 8.0);
        assert_eq!(panel.gui.axis_y, 248.0);
    }

    #[test]
    fn test_goto_presets() {
        let mut panel = ControlPanel::default();
        for angle in [30.0, 45.0, 60.0, 180.0] {
            panel.go_to_preset(angle);
        }
        assert_eq!(
            panel.take_actions(),
            vec![
                UIAction::Device(DeviceCommand::GoTo(30.0)),
                UIAction::Device(DeviceCommand::GoTo(45.0)),
                UIAction::Device(DeviceCommand::GoTo(60.0)),
                UIAction::Device(DeviceCommand::GoTo(176.5)),
            ]
        );
        assert!(GOTO_PRESETS.contains(&30.0));
        assert!(GOTO_PRESETS.contains(&45.0));
        assert!(GOTO_PRESETS.contains(&60.0));
    }

    #[test]
    fn test_defaults() {
        let panel = ControlPanel::default();
        assert_eq!(panel.calibration_offset, -3.5);
        assert_eq!(panel.running_offset, 2);
    }

    #[test]
    fn test_renders_headless_without_actions() {
        let ctx = egui::Context::default();
        let mut panel = ControlPanel::default();
        let readout = Readout::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| panel.show(ui, &readout));
        });
        assert!(panel.take_actions().is_empty());
    }
}
