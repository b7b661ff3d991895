//! Application initialization.

use crate::app::core::app_struct::App;
use crate::backend::WgpuBackend;
use crate::cli::Cli;
use crate::window_manager::{WindowContext, DEFAULT_WINDOW_SIZE};
use anyhow::Result;
use shadowtrace_control::{
    open_serial, spawn_ingest_worker, CommandDispatcher, SimulatedDevice,
};
use shadowtrace_core::{AngleIngest, RenderParams, TelemetryContext, WaveformRenderer};
use shadowtrace_ui::ConsoleUI;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

impl App {
    /// Creates the window, GPU state, device link and animation.
    pub async fn new(elwt: &ActiveEventLoop, cli: &Cli) -> Result<Self> {
        let window = Arc::new(
            elwt.create_window(
                Window::default_attributes()
                    .with_title("ShadowTrace - Rotating Vector")
                    .with_inner_size(DEFAULT_WINDOW_SIZE),
            )?,
        );

        let (backend, surface) = WgpuBackend::new(window.clone()).await?;
        let window = WindowContext::new(window, surface, &backend)?;

        let egui_context = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_context.clone(),
            egui::viewport::ViewportId::ROOT,
            &*window.window,
            Some(window.window.scale_factor() as f32),
            None,
            Some(backend.device.limits().max_texture_dimension_2d as usize),
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &backend.device,
            window.surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let params = RenderParams::default();
        let context = TelemetryContext::shared(params.amplitude);
        let dispatcher = connect_device(cli, AngleIngest::new(Arc::clone(&context)))?;
        let renderer = WaveformRenderer::with_params(params, context, Instant::now());

        Ok(Self {
            window,
            backend,
            egui_context,
            egui_state,
            egui_renderer,
            ui_state: ConsoleUI::new(&params),
            renderer,
            dispatcher,
        })
    }
}

/// Starts telemetry ingest and the command writer for the configured rig.
///
/// A port that fails to open leaves the console running without telemetry.
fn connect_device(cli: &Cli, ingest: AngleIngest) -> Result<CommandDispatcher> {
    if cli.simulate {
        info!("Using simulated rig");
        let (source, sink) = SimulatedDevice::spawn()?;
        spawn_ingest_worker(source, move |line| {
            ingest.on_line(line);
        })?;
        return Ok(CommandDispatcher::spawn(sink)?);
    }

    match open_serial(&cli.port, cli.baud) {
        Ok(link) => {
            let (reader, writer) = link.split();
            spawn_ingest_worker(reader, move |line| {
                ingest.on_line(line);
            })?;
            Ok(CommandDispatcher::spawn(writer)?)
        }
        Err(e) => {
            error!("Failed to open serial port {}: {}", cli.port, e);
            Ok(CommandDispatcher::disconnected())
        }
    }
}
