use crate::app::core::app_struct::App;
use std::time::Instant;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

/// Advances the animation when a tick is due and sleeps until the next one.
pub fn update(app: &mut App, elwt: &ActiveEventLoop) {
    if app.renderer.poll(Instant::now()) {
        app.window.window.request_redraw();
    }
    elwt.set_control_flow(ControlFlow::WaitUntil(app.renderer.schedule().next_due()));
}
