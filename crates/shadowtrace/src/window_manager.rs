//! Window Manager
//!
//! Owns the single console window and its wgpu surface.

use crate::backend::WgpuBackend;
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::{debug, info};
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Initial inner size of the console window.
pub const DEFAULT_WINDOW_SIZE: PhysicalSize<u32> = PhysicalSize::new(1600, 900);

/// Context for the console window: the `winit` window and its configured surface.
pub struct WindowContext {
    /// The `winit` window.
    pub window: Arc<Window>,
    /// The `wgpu` surface associated with the window.
    pub surface: wgpu::Surface<'static>,
    /// The configuration for the `wgpu` surface.
    pub surface_config: wgpu::SurfaceConfiguration,
}

impl WindowContext {
    /// Configures `surface` for `window` on `backend`.
    pub fn new(
        window: Arc<Window>,
        surface: wgpu::Surface<'static>,
        backend: &WgpuBackend,
    ) -> Result<Self> {
        let caps = surface.get_capabilities(&backend.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow!("Surface reports no supported formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&backend.device, &surface_config);
        info!(
            "Created console window {}x{} ({:?})",
            surface_config.width, surface_config.height, format
        );

        Ok(Self {
            window,
            surface,
            surface_config,
        })
    }

    /// Applies a new inner size. Zero-sized (minimized) windows are skipped.
    pub fn resize(&mut self, device: &wgpu::Device, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(device, &self.surface_config);
        debug!("Surface resized to {}x{}", size.width, size.height);
    }

    /// Re-applies the current configuration after the surface was lost.
    pub fn reconfigure(&self, device: &wgpu::Device) {
        self.surface.configure(device, &self.surface_config);
    }
}
