use crate::backend::WgpuBackend;
use crate::window_manager::WindowContext;
use shadowtrace_control::CommandDispatcher;
use shadowtrace_core::WaveformRenderer;
use shadowtrace_ui::ConsoleUI;

/// The main application state.
pub struct App {
    /// The console window and its surface.
    pub window: WindowContext,
    /// The application's render backend.
    pub backend: WgpuBackend,
    /// The egui context.
    pub egui_context: egui::Context,
    /// The egui state.
    pub egui_state: egui_winit::State,
    /// The egui renderer.
    pub egui_renderer: egui_wgpu::Renderer,
    /// Panels and pending UI actions.
    pub ui_state: ConsoleUI,
    /// Waveform animation.
    pub renderer: WaveformRenderer,
    /// Queue to the device-writer thread.
    pub dispatcher: CommandDispatcher,
}
