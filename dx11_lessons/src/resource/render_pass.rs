/// RenderPass - viewport, color target and depth target of a swap chain

use crate::error::Result;
use crate::graphics_device::{
    BindFlags, ClearFlags, CommandContext, CpuAccessFlags, DepthStencilView, Device, Format,
    RenderTargetView, ResourceMiscFlags, Texture, TextureDesc, Usage, Viewport,
};
use crate::resource::{GraphicsDevice, SwapChain};
use crate::window::RenderWindow;

/// Output targets derived from back buffer 0 of a swap chain
///
/// Valid only for the swap-chain size it was built against; rebuild after
/// every resize.
pub struct RenderPass {
    viewport: Viewport,
    // Views are declared before the textures they reference
    render_target_view: Box<dyn RenderTargetView>,
    depth_stencil_view: Box<dyn DepthStencilView>,
    _depth_texture: Box<dyn Texture>,
    _back_buffer: Box<dyn Texture>,
    generation: u64,
}

impl RenderPass {
    /// Build the viewport, RTV and a matching depth/stencil target
    pub fn new(device: &dyn Device, swap_chain: &SwapChain) -> Result<Self> {
        let desc = swap_chain.desc();

        let viewport = Viewport {
            x: 0.0,
            y: 0.0,
            width: desc.width as f32,
            height: desc.height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        };

        let back_buffer = swap_chain.back_buffer(0)?;
        let render_target_view = device.create_render_target_view(back_buffer.as_ref())?;

        let depth_texture = device.create_texture_2d(
            &TextureDesc {
                width: desc.width,
                height: desc.height,
                mip_levels: 1,
                array_size: 1,
                format: Format::D24_UNORM_S8_UINT,
                sample: desc.sample,
                usage: Usage::Default,
                bind_flags: BindFlags::DEPTH_STENCIL,
                cpu_access: CpuAccessFlags::empty(),
                misc_flags: ResourceMiscFlags::empty(),
            },
            &[],
        )?;
        let depth_stencil_view = device.create_depth_stencil_view(depth_texture.as_ref())?;

        Ok(Self {
            viewport,
            render_target_view,
            depth_stencil_view,
            _depth_texture: depth_texture,
            _back_buffer: back_buffer,
            generation: swap_chain.generation(),
        })
    }

    /// Drop this pass, resize the swap chain to the window, rebuild
    pub fn resize(
        self,
        graphics_device: &GraphicsDevice,
        swap_chain: &mut SwapChain,
        window: &dyn RenderWindow,
    ) -> Result<RenderPass> {
        drop(self);
        swap_chain.resize(window)?;
        RenderPass::new(graphics_device.device(), swap_chain)
    }

    /// Bind the color and depth targets, then the viewport
    pub fn activate(&self, context: &mut dyn CommandContext) {
        context.set_render_targets(self.render_target_view.as_ref(), self.depth_stencil_view.as_ref());
        context.set_viewport(&self.viewport);
    }

    /// Clear color to `color`, then depth to 1.0 and stencil to 0
    pub fn clear(&self, context: &mut dyn CommandContext, color: [f32; 4]) {
        context.clear_render_target(self.render_target_view.as_ref(), color);
        context.clear_depth_stencil(
            self.depth_stencil_view.as_ref(),
            ClearFlags::DEPTH | ClearFlags::STENCIL,
            1.0,
            0,
        );
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Whether this pass matches the swap chain's current buffers
    pub fn is_current(&self, swap_chain: &SwapChain) -> bool {
        self.generation == swap_chain.generation()
    }
}

#[cfg(test)]
#[path = "render_pass_tests.rs"]
mod tests;
