//! UI action processing.

use crate::app::core::app_struct::App;
use shadowtrace_ui::UIAction;
use tracing::{debug, warn};

/// Applies every action queued during the last UI frame.
pub fn handle_ui_actions(app: &mut App) {
    for action in app.ui_state.take_actions() {
        debug!("UI action: {:?}", action);
        match action {
            UIAction::Device(command) => {
                if let Err(e) = app.dispatcher.send(command) {
                    warn!("Command {} not sent: {}", command, e);
                }
            }
            UIAction::PauseTime => app.renderer.pause(),
            UIAction::ResumeTime => app.renderer.resume(),
            UIAction::ClearTrace => app.renderer.clear_trace(),
            UIAction::SetAmplitude(amplitude) => app.renderer.set_amplitude(amplitude),
            UIAction::SetPenWidth(width) => app.renderer.set_pen_width(width),
            UIAction::SetAxisY(y) => app.renderer.set_axis_y(y),
            UIAction::SetAxisOffset(offset) => app.renderer.set_axis_offset(offset),
            UIAction::SetTickInterval(raw) => app.renderer.set_tick_interval(raw),
            UIAction::SetRunningOffset(degrees) => {
                app.renderer.context().set_running_offset(degrees)
            }
        }
    }
}
