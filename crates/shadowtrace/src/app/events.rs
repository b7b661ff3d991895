//! winit event dispatch.

use crate::app::core::app_struct::App;
use crate::app::loops::{logic, render};
use anyhow::Result;
use tracing::info;
use winit::event::{Event, WindowEvent};
use winit::event_loop::ActiveEventLoop;

impl App {
    /// Handles one event from the loop.
    pub fn handle_event(&mut self, event: Event<()>, elwt: &ActiveEventLoop) -> Result<()> {
        match event {
            Event::WindowEvent { window_id, event } if window_id == self.window.window.id() => {
                let response = self.egui_state.on_window_event(&self.window.window, &event);
                if response.repaint {
                    self.window.window.request_redraw();
                }

                match event {
                    WindowEvent::CloseRequested => {
                        info!("Close requested, exiting");
                        elwt.exit();
                    }
                    WindowEvent::Resized(size) => {
                        self.window.resize(&self.backend.device, size);
                        self.window.window.request_redraw();
                    }
                    WindowEvent::RedrawRequested => render::render(self)?,
                    _ => {}
                }
            }
            Event::AboutToWait => logic::update(self, elwt),
            _ => {}
        }
        Ok(())
    }
}
