/// SwapChain - the back-buffer chain of one window

use crate::config::DeviceConfig;
use crate::error::Result;
use crate::graphics_device::{
    PresentFlags, PresentOutcome, PresentSurface, SwapChainDesc, SwapChainFlags, SwapEffect,
    Texture,
};
use crate::resource::GraphicsDevice;
use crate::window::{Extent2D, RenderWindow};
use crate::dx_info;

/// Flip-model swap chain sized to a window's client area
///
/// Buffer dimensions equal the window's client size until the window is
/// resized; `resize` restores the invariant.
pub struct SwapChain {
    surface: Box<dyn PresentSurface>,
    generation: u64,
}

impl SwapChain {
    /// Create the swap chain of `window`
    ///
    /// Uses the device's best MSAA descriptor and the display refresh rate
    /// matching the window size (when vsync is on).
    pub fn new(graphics_device: &GraphicsDevice, window: &dyn RenderWindow, config: &DeviceConfig) -> Result<Self> {
        let extent = window.client_size();
        let sample = graphics_device.query_supported_sample_count(config.back_buffer_format)?;
        let refresh_rate = graphics_device.query_refresh_rate(extent, config.vsync)?;

        let desc = SwapChainDesc {
            width: extent.width,
            height: extent.height,
            format: config.back_buffer_format,
            refresh_rate,
            sample,
            buffer_count: config.swap_chain_buffer_count,
            swap_effect: SwapEffect::FlipDiscard,
            windowed: true,
            flags: SwapChainFlags::ALLOW_MODE_SWITCH,
        };

        let surface = graphics_device
            .device()
            .create_present_surface(&desc, window.raw_window_handle()?)?;

        dx_info!(
            "dx11::SwapChain",
            "Created {}x{} swap chain ({} buffers, {}x MSAA)",
            extent.width, extent.height, desc.buffer_count, sample.count
        );

        Ok(Self { surface, generation: 0 })
    }

    /// Resize every buffer to the window's current client size
    ///
    /// Every RenderPass built on the previous buffers must already be dropped
    /// (see `RenderPass::resize`).
    pub fn resize(&mut self, window: &dyn RenderWindow) -> Result<()> {
        let extent = window.client_size();
        self.surface.resize_buffers(extent.width, extent.height)?;
        self.generation += 1;
        dx_info!("dx11::SwapChain", "Resized to {}x{}", extent.width, extent.height);
        Ok(())
    }

    /// Present the current back buffer
    ///
    /// Waits for the vertical blank when `vsync`; otherwise a busy GPU yields
    /// `PresentOutcome::StillDrawing` and the frame is skipped.
    pub fn present(&mut self, vsync: bool) -> Result<PresentOutcome> {
        let sync_interval = if vsync { 1 } else { 0 };
        self.surface.present(sync_interval, PresentFlags::DO_NOT_WAIT)
    }

    pub fn desc(&self) -> &SwapChainDesc {
        self.surface.desc()
    }

    pub fn extent(&self) -> Extent2D {
        let desc = self.surface.desc();
        Extent2D::new(desc.width, desc.height)
    }

    pub fn back_buffer(&self, index: u32) -> Result<Box<dyn Texture>> {
        self.surface.back_buffer(index)
    }

    /// Number of completed resizes
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Backend surface (e.g. for a native overlay integration)
    pub fn surface(&self) -> &dyn PresentSurface {
        self.surface.as_ref()
    }
}

#[cfg(test)]
#[path = "swap_chain_tests.rs"]
mod tests;
