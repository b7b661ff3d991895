//! ShadowTrace - Rotating Vector Shadow Console
//!
//! This is the main application crate for ShadowTrace.

#![warn(missing_docs)]

mod app;
mod backend;
mod cli;
mod logging_setup;
mod window_manager;

use anyhow::Result;
use app::core::app_struct::App;
use clap::Parser;
use cli::Cli;
use shadowtrace_core::LogConfig;
use tracing::{error, info};
use winit::event::Event;
use winit::event_loop::EventLoop;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging_setup::init(&LogConfig::with_level(cli.log_level.as_str()))?;

    info!("==========================================");
    info!("===     ShadowTrace Session Started    ===");
    info!("==========================================");

    let event_loop = EventLoop::new()?;
    let mut app: Option<App> = None;

    #[allow(deprecated)]
    event_loop.run(move |event, elwt| {
        if app.is_none() && matches!(event, Event::Resumed) {
            match pollster::block_on(App::new(elwt, &cli)) {
                Ok(created) => {
                    app = Some(created);
                    info!("--- Entering Main Event Loop ---");
                }
                Err(e) => {
                    error!("Failed to create App: {:#}", e);
                    elwt.exit();
                    return;
                }
            }
        }

        if let Some(app_ref) = &mut app {
            if let Err(e) = app_ref.handle_event(event, elwt) {
                error!("Application error: {:#}", e);
                elwt.exit();
            }
        }
    })?;

    Ok(())
}
