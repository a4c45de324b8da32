/// Device trait - factory for every native GPU object

use std::any::Any;
use raw_window_handle::RawWindowHandle;
use crate::error::Result;
use super::buffer::{Buffer, BufferDesc};
use super::format::{DisplayMode, Format};
use super::present_surface::{PresentSurface, SwapChainDesc};
use super::state::{
    BlendDesc, BlendState, DepthStencilDesc, DepthStencilState, InputElementDesc, InputLayout,
    PixelShader, RasterizerDesc, RasterizerState, SamplerDesc, SamplerState, VertexShader,
};
use super::texture::{
    DepthStencilView, RenderTargetView, ShaderResourceView, SrvDimension, SubresourceData,
    Texture, TextureDesc,
};

/// Downcast support for backend objects
///
/// Backends receive core objects as `&dyn Trait` and recover their own
/// concrete type with `as_any().downcast_ref()`. Call it on a `&dyn Trait`,
/// never on a `&Box<dyn Trait>`.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Logical GPU device
///
/// Every GPU object is created through this trait and must not outlive it.
/// Creation failures are fatal to the caller: descriptors are deterministic
/// and a failure means a broken environment or a corrupt asset.
pub trait Device: AsAny {
    // ===== RESOURCES =====

    /// Create a buffer, optionally filled with `initial_data`
    fn create_buffer(&self, desc: &BufferDesc, initial_data: Option<&[u8]>)
        -> Result<Box<dyn Buffer>>;

    /// Create a 2D texture (array); `initial_data` holds one entry per
    /// subresource or is empty
    fn create_texture_2d(
        &self,
        desc: &TextureDesc,
        initial_data: &[SubresourceData<'_>],
    ) -> Result<Box<dyn Texture>>;

    fn create_render_target_view(&self, texture: &dyn Texture) -> Result<Box<dyn RenderTargetView>>;

    fn create_depth_stencil_view(&self, texture: &dyn Texture) -> Result<Box<dyn DepthStencilView>>;

    fn create_shader_resource_view(
        &self,
        texture: &dyn Texture,
        dimension: SrvDimension,
    ) -> Result<Box<dyn ShaderResourceView>>;

    // ===== STATE OBJECTS =====

    fn create_blend_state(&self, desc: &BlendDesc) -> Result<Box<dyn BlendState>>;

    fn create_depth_stencil_state(&self, desc: &DepthStencilDesc)
        -> Result<Box<dyn DepthStencilState>>;

    fn create_rasterizer_state(&self, desc: &RasterizerDesc) -> Result<Box<dyn RasterizerState>>;

    fn create_sampler_state(&self, desc: &SamplerDesc) -> Result<Box<dyn SamplerState>>;

    /// Create an input layout; fails if `elements` disagree with the input
    /// signature embedded in `vertex_shader_bytecode`
    fn create_input_layout(
        &self,
        elements: &[InputElementDesc],
        vertex_shader_bytecode: &[u8],
    ) -> Result<Box<dyn InputLayout>>;

    fn create_vertex_shader(&self, bytecode: &[u8]) -> Result<Box<dyn VertexShader>>;

    fn create_pixel_shader(&self, bytecode: &[u8]) -> Result<Box<dyn PixelShader>>;

    // ===== CAPABILITIES =====

    /// Number of quality levels for `sample_count` samples of `format` (0 = unsupported)
    fn check_multisample_quality_levels(&self, format: Format, sample_count: u32) -> Result<u32>;

    /// Display modes of the primary output for `format`
    fn display_modes(&self, format: Format) -> Result<Vec<DisplayMode>>;

    /// Whether the validation/debug layer was requested at creation
    fn debug_layer_enabled(&self) -> bool;

    // ===== PRESENTATION =====

    /// Create the swap chain of `window` and disable the OS alt-enter and
    /// window-message handling for it
    fn create_present_surface(
        &self,
        desc: &SwapChainDesc,
        window: RawWindowHandle,
    ) -> Result<Box<dyn PresentSurface>>;
}
