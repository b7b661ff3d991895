//! Top-level console layout: control panel on the left, waveform filling the rest.

use crate::panels::control_panel::ControlPanel;
use crate::shortcuts::{self, Shortcut};
use crate::widgets::waveform_view::{WaveformView, VIEW_BACKGROUND};
use crate::UIAction;
use shadowtrace_core::{RenderParams, WaveformRenderer};

/// Operator console state.
#[derive(Debug, Clone, Default)]
pub struct ConsoleUI {
    /// Rig and waveform controls.
    pub control_panel: ControlPanel,
    actions: Vec<UIAction>,
}

impl ConsoleUI {
    /// Creates the console with `params` as initial GUI values.
    pub fn new(params: &RenderParams) -> Self {
        Self {
            control_panel: ControlPanel::new(params),
            actions: Vec::new(),
        }
    }

    /// Builds one egui frame.
    pub fn show(&mut self, ctx: &egui::Context, renderer: &WaveformRenderer) {
        for shortcut in shortcuts::poll(ctx) {
            match shortcut {
                Shortcut::PauseVectorAndTime => self.control_panel.pause_vector_and_time(),
                Shortcut::ContinueVectorAndTime => self.control_panel.continue_vector_and_time(),
            }
        }

        let readout = renderer.context().readout();
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.heading("Rotating vector");
                ui.separator();
                self.control_panel.show(ui, &readout);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(VIEW_BACKGROUND))
            .show(ctx, |ui| {
                WaveformView::new(renderer).show(ui);
            });

        self.actions.extend(self.control_panel.take_actions());
    }

    /// Drains actions queued during the last [`Self::show`].
    pub fn take_actions(&mut self) -> Vec<UIAction> {
        std::mem::take(&mut self.actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadowtrace_control::DeviceCommand;
    use shadowtrace_core::TelemetryContext;

    fn key_press(key: egui::Key, modifiers: egui::Modifiers) -> egui::RawInput {
        egui::RawInput {
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }],
            modifiers,
            ..Default::default()
        }
    }

    #[test]
    fn test_space_shortcut_queues_pause() {
        let ctx = egui::Context::default();
        let renderer = WaveformRenderer::new(TelemetryContext::shared(220.0));
        let mut console = ConsoleUI::default();

        let _ = ctx.run(key_press(egui::Key::Space, egui::Modifiers::NONE), |ctx| {
            console.show(ctx, &renderer)
        });

        assert_eq!(
            console.take_actions(),
            vec![UIAction::PauseTime, UIAction::Device(DeviceCommand::Pause)]
        );
    }

    #[test]
    fn test_idle_frame_queues_nothing() {
        let ctx = egui::Context::default();
        let renderer = WaveformRenderer::new(TelemetryContext::shared(220.0));
        let mut console = ConsoleUI::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| console.show(ctx, &renderer));
        assert!(console.take_actions().is_empty());
    }
}
