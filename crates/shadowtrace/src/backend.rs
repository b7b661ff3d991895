//! wgpu device setup for the console window.

use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::info;
use winit::window::Window;

/// GPU handles shared by the window surface and the egui renderer.
pub struct WgpuBackend {
    /// Adapter the device was created on.
    pub adapter: wgpu::Adapter,
    /// Logical device.
    pub device: Arc<wgpu::Device>,
    /// Submission queue.
    pub queue: Arc<wgpu::Queue>,
}

impl WgpuBackend {
    /// Creates a device able to present to `window`, returning the surface with it.
    ///
    /// Tries every backend except GL first, then GL alone.
    pub async fn new(window: Arc<Window>) -> Result<(Self, wgpu::Surface<'static>)> {
        let safe_backends = wgpu::Backends::all() & !wgpu::Backends::GL;
        match Self::new_with_backends(safe_backends, window.clone()).await {
            Ok(result) => Ok(result),
            Err(e) => {
                info!("Primary backend initialization failed ({}), attempting GL fallback...", e);
                Self::new_with_backends(wgpu::Backends::GL, window).await
            }
        }
    }

    async fn new_with_backends(
        backends: wgpu::Backends,
        window: Arc<Window>,
    ) -> Result<(Self, wgpu::Surface<'static>)> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| anyhow!("Failed to create surface: {}", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("No adapter found: {}", e))?;

        let info = adapter.get_info();
        info!("Selected adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("ShadowTrace Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                ..Default::default()
            })
            .await
            .map_err(|e| anyhow!("Failed to create device: {}", e))?;

        info!("Device created successfully");
        Ok((
            Self {
                adapter,
                device: Arc::new(device),
                queue: Arc::new(queue),
            },
            surface,
        ))
    }
}
