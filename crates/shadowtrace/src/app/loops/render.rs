//! Main application render loop.

use crate::app::actions::handle_ui_actions;
use crate::app::core::app_struct::App;
use anyhow::Result;
use tracing::warn;

/// Runs one egui frame and presents it.
pub fn render(app: &mut App) -> Result<()> {
    let surface_texture = match app.window.surface.get_current_texture() {
        Ok(texture) => texture,
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            app.window.reconfigure(&app.backend.device);
            app.window.window.request_redraw();
            return Ok(());
        }
        Err(wgpu::SurfaceError::Timeout) => {
            warn!("Surface timeout, skipping frame");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let view = surface_texture
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    // UI pass
    let raw_input = app.egui_state.take_egui_input(&app.window.window);
    let full_output = app.egui_context.run(raw_input, |ctx| {
        app.ui_state.show(ctx, &app.renderer);
    });
    app.egui_state
        .handle_platform_output(&app.window.window, full_output.platform_output);

    handle_ui_actions(app);

    let device = &app.backend.device;
    let queue = &app.backend.queue;
    let pixels_per_point = full_output.pixels_per_point;
    let tris = app.egui_context.tessellate(full_output.shapes, pixels_per_point);
    for (id, delta) in &full_output.textures_delta.set {
        app.egui_renderer.update_texture(device, queue, *id, delta);
    }

    let screen_descriptor = egui_wgpu::ScreenDescriptor {
        size_in_pixels: [
            app.window.surface_config.width,
            app.window.surface_config.height,
        ],
        pixels_per_point,
    };

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Render Encoder"),
    });
    let command_buffers =
        app.egui_renderer
            .update_buffers(device, queue, &mut encoder, &tris, &screen_descriptor);

    {
        let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Egui Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        let mut render_pass = render_pass.forget_lifetime();
        app.egui_renderer
            .render(&mut render_pass, &tris, &screen_descriptor);
    }

    for id in &full_output.textures_delta.free {
        app.egui_renderer.free_texture(id);
    }

    queue.submit(command_buffers.into_iter().chain(std::iter::once(encoder.finish())));
    app.window.window.pre_present_notify();
    surface_texture.present();

    Ok(())
}
