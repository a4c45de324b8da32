/// CommandContext trait - the immediate GPU command stream

use bitflags::bitflags;
use crate::error::Result;
use super::buffer::Buffer;
use super::device::AsAny;
use super::format::Format;
use super::state::{
    BlendState, DepthStencilState, InputLayout, PixelShader, RasterizerState, SamplerState,
    VertexShader,
};
use super::texture::{DepthStencilView, RenderTargetView, ShaderResourceView};

/// Viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
    TriangleStrip,
    LineList,
    PointList,
}

bitflags! {
    /// Which planes of a depth/stencil view to clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const DEPTH   = 0x1;
        const STENCIL = 0x2;
    }
}

/// Immediate-mode command stream
///
/// Binding calls cannot fail natively; only mapped writes report errors.
/// Exactly one context exists per device and it is used from one thread.
pub trait CommandContext: AsAny {
    // ===== OUTPUT MERGER =====

    /// Bind one color target and one depth/stencil target
    fn set_render_targets(&mut self, rtv: &dyn RenderTargetView, dsv: &dyn DepthStencilView);

    fn set_viewport(&mut self, viewport: &Viewport);

    fn clear_render_target(&mut self, rtv: &dyn RenderTargetView, color: [f32; 4]);

    fn clear_depth_stencil(
        &mut self,
        dsv: &dyn DepthStencilView,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    );

    fn set_blend_state(&mut self, state: &dyn BlendState, blend_factor: [f32; 4], sample_mask: u32);

    fn set_depth_stencil_state(&mut self, state: &dyn DepthStencilState, stencil_ref: u32);

    // ===== RASTERIZER / INPUT ASSEMBLER =====

    fn set_rasterizer_state(&mut self, state: &dyn RasterizerState);

    fn set_primitive_topology(&mut self, topology: PrimitiveTopology);

    fn set_input_layout(&mut self, layout: &dyn InputLayout);

    /// Bind vertex streams starting at `start_slot` (one stride/offset per buffer)
    fn set_vertex_buffers(
        &mut self,
        start_slot: u32,
        buffers: &[&dyn Buffer],
        strides: &[u32],
        offsets: &[u32],
    );

    fn set_index_buffer(&mut self, buffer: &dyn Buffer, format: Format, offset: u32);

    // ===== SHADER STAGES =====

    fn vs_set_shader(&mut self, shader: &dyn VertexShader);

    fn ps_set_shader(&mut self, shader: &dyn PixelShader);

    fn vs_set_constant_buffer(&mut self, slot: u32, buffer: &dyn Buffer);

    fn ps_set_constant_buffer(&mut self, slot: u32, buffer: &dyn Buffer);

    fn vs_set_shader_resource(&mut self, slot: u32, view: &dyn ShaderResourceView);

    fn ps_set_shader_resource(&mut self, slot: u32, view: &dyn ShaderResourceView);

    fn ps_set_sampler(&mut self, slot: u32, sampler: &dyn SamplerState);

    // ===== RESOURCES / DRAWS =====

    /// Map with discard semantics, copy `data` at offset 0, unmap
    fn write_discard(&mut self, buffer: &dyn Buffer, data: &[u8]) -> Result<()>;

    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32);

    fn draw_indexed_instanced(
        &mut self,
        index_count: u32,
        instance_count: u32,
        start_index: u32,
        base_vertex: i32,
        start_instance: u32,
    );
}
