/// D3D11Context - the immediate device context behind CommandContext
///
/// Binding calls receive core trait objects and downcast them to the D3D11
/// wrappers. Objects from another backend are skipped with a warning since
/// binding calls cannot fail.

use std::any::Any;

use dx11_lessons::dx11::device::{
    BlendState, Buffer, ClearFlags, CommandContext, DepthStencilState, DepthStencilView, Format,
    InputLayout, PixelShader, PrimitiveTopology, RasterizerState, RenderTargetView, SamplerState,
    ShaderResourceView, VertexShader, Viewport,
};
use dx11_lessons::dx11::Result;
use dx11_lessons::{dx_bail, dx_warn};
use windows::Win32::Graphics::Direct3D11::{
    ID3D11Buffer, ID3D11DeviceContext, D3D11_MAPPED_SUBRESOURCE, D3D11_MAP_WRITE_DISCARD,
};

use crate::d3d11_convert::{
    clear_flags_to_d3d11, format_to_dxgi, native_error, topology_to_d3d11, viewport_to_d3d11,
};
use crate::d3d11_resources::{
    D3D11BlendState, D3D11Buffer, D3D11DepthStencilState, D3D11DepthStencilView,
    D3D11InputLayout, D3D11PixelShader, D3D11RasterizerState, D3D11RenderTargetView,
    D3D11SamplerState, D3D11ShaderResourceView, D3D11VertexShader,
};

const SOURCE: &str = "dx11::d3d11::Context";

/// Recover the backend type of a core object
fn native<'a, T: 'static>(object: &'a dyn Any, what: &str) -> Option<&'a T> {
    let concrete = object.downcast_ref::<T>();
    if concrete.is_none() {
        dx_warn!(SOURCE, "Ignoring {} created by another backend", what);
    }
    concrete
}

/// Immediate command stream of the D3D11 device
pub struct D3D11Context {
    context: ID3D11DeviceContext,
}

impl D3D11Context {
    pub(crate) fn new(context: ID3D11DeviceContext) -> Self {
        Self { context }
    }

    pub fn native(&self) -> &ID3D11DeviceContext {
        &self.context
    }
}

impl CommandContext for D3D11Context {
    // ===== OUTPUT MERGER =====

    fn set_render_targets(&mut self, rtv: &dyn RenderTargetView, dsv: &dyn DepthStencilView) {
        let (Some(rtv), Some(dsv)) = (
            native::<D3D11RenderTargetView>(rtv.as_any(), "render target view"),
            native::<D3D11DepthStencilView>(dsv.as_any(), "depth stencil view"),
        ) else {
            return;
        };
        unsafe {
            self.context.OMSetRenderTargets(Some(&[Some(rtv.view.clone())]), &dsv.view);
        }
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        unsafe {
            self.context.RSSetViewports(Some(&[viewport_to_d3d11(viewport)]));
        }
    }

    fn clear_render_target(&mut self, rtv: &dyn RenderTargetView, color: [f32; 4]) {
        if let Some(rtv) = native::<D3D11RenderTargetView>(rtv.as_any(), "render target view") {
            unsafe {
                self.context.ClearRenderTargetView(&rtv.view, &color);
            }
        }
    }

    fn clear_depth_stencil(
        &mut self,
        dsv: &dyn DepthStencilView,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    ) {
        if let Some(dsv) = native::<D3D11DepthStencilView>(dsv.as_any(), "depth stencil view") {
            unsafe {
                self.context
                    .ClearDepthStencilView(&dsv.view, clear_flags_to_d3d11(flags), depth, stencil);
            }
        }
    }

    fn set_blend_state(&mut self, state: &dyn BlendState, blend_factor: [f32; 4], sample_mask: u32) {
        if let Some(state) = native::<D3D11BlendState>(state.as_any(), "blend state") {
            unsafe {
                self.context.OMSetBlendState(&state.state, Some(&blend_factor), sample_mask);
            }
        }
    }

    fn set_depth_stencil_state(&mut self, state: &dyn DepthStencilState, stencil_ref: u32) {
        if let Some(state) = native::<D3D11DepthStencilState>(state.as_any(), "depth stencil state") {
            unsafe {
                self.context.OMSetDepthStencilState(&state.state, stencil_ref);
            }
        }
    }

    // ===== RASTERIZER / INPUT ASSEMBLER =====

    fn set_rasterizer_state(&mut self, state: &dyn RasterizerState) {
        if let Some(state) = native::<D3D11RasterizerState>(state.as_any(), "rasterizer state") {
            unsafe {
                self.context.RSSetState(&state.state);
            }
        }
    }

    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) {
        unsafe {
            self.context.IASetPrimitiveTopology(topology_to_d3d11(topology));
        }
    }

    fn set_input_layout(&mut self, layout: &dyn InputLayout) {
        if let Some(layout) = native::<D3D11InputLayout>(layout.as_any(), "input layout") {
            unsafe {
                self.context.IASetInputLayout(&layout.layout);
            }
        }
    }

    fn set_vertex_buffers(
        &mut self,
        start_slot: u32,
        buffers: &[&dyn Buffer],
        strides: &[u32],
        offsets: &[u32],
    ) {
        if buffers.len() != strides.len() || buffers.len() != offsets.len() {
            dx_warn!(SOURCE, "Vertex buffer, stride and offset counts differ; nothing bound");
            return;
        }

        let natives: Option<Vec<Option<ID3D11Buffer>>> = buffers
            .iter()
            .map(|b| native::<D3D11Buffer>(b.as_any(), "vertex buffer").map(|b| Some(b.buffer.clone())))
            .collect();
        let Some(natives) = natives else {
            return;
        };

        unsafe {
            self.context.IASetVertexBuffers(
                start_slot,
                natives.len() as u32,
                Some(natives.as_ptr()),
                Some(strides.as_ptr()),
                Some(offsets.as_ptr()),
            );
        }
    }

    fn set_index_buffer(&mut self, buffer: &dyn Buffer, format: Format, offset: u32) {
        if let Some(buffer) = native::<D3D11Buffer>(buffer.as_any(), "index buffer") {
            unsafe {
                self.context.IASetIndexBuffer(&buffer.buffer, format_to_dxgi(format), offset);
            }
        }
    }

    // ===== SHADER STAGES =====

    fn vs_set_shader(&mut self, shader: &dyn VertexShader) {
        if let Some(shader) = native::<D3D11VertexShader>(shader.as_any(), "vertex shader") {
            unsafe {
                self.context.VSSetShader(&shader.shader, None);
            }
        }
    }

    fn ps_set_shader(&mut self, shader: &dyn PixelShader) {
        if let Some(shader) = native::<D3D11PixelShader>(shader.as_any(), "pixel shader") {
            unsafe {
                self.context.PSSetShader(&shader.shader, None);
            }
        }
    }

    fn vs_set_constant_buffer(&mut self, slot: u32, buffer: &dyn Buffer) {
        if let Some(buffer) = native::<D3D11Buffer>(buffer.as_any(), "constant buffer") {
            unsafe {
                self.context.VSSetConstantBuffers(slot, Some(&[Some(buffer.buffer.clone())]));
            }
        }
    }

    fn ps_set_constant_buffer(&mut self, slot: u32, buffer: &dyn Buffer) {
        if let Some(buffer) = native::<D3D11Buffer>(buffer.as_any(), "constant buffer") {
            unsafe {
                self.context.PSSetConstantBuffers(slot, Some(&[Some(buffer.buffer.clone())]));
            }
        }
    }

    fn vs_set_shader_resource(&mut self, slot: u32, view: &dyn ShaderResourceView) {
        if let Some(view) = native::<D3D11ShaderResourceView>(view.as_any(), "shader resource view") {
            unsafe {
                self.context.VSSetShaderResources(slot, Some(&[Some(view.view.clone())]));
            }
        }
    }

    fn ps_set_shader_resource(&mut self, slot: u32, view: &dyn ShaderResourceView) {
        if let Some(view) = native::<D3D11ShaderResourceView>(view.as_any(), "shader resource view") {
            unsafe {
                self.context.PSSetShaderResources(slot, Some(&[Some(view.view.clone())]));
            }
        }
    }

    fn ps_set_sampler(&mut self, slot: u32, sampler: &dyn SamplerState) {
        if let Some(sampler) = native::<D3D11SamplerState>(sampler.as_any(), "sampler state") {
            unsafe {
                self.context.PSSetSamplers(slot, Some(&[Some(sampler.state.clone())]));
            }
        }
    }

    // ===== RESOURCES / DRAWS =====

    fn write_discard(&mut self, buffer: &dyn Buffer, data: &[u8]) -> Result<()> {
        let Some(target) = buffer.as_any().downcast_ref::<D3D11Buffer>() else {
            dx_bail!(SOURCE, "Cannot map a buffer created by another backend");
        };
        if data.len() > target.desc().byte_width as usize {
            dx_bail!(
                SOURCE,
                "Write of {} bytes exceeds the {}-byte buffer",
                data.len(),
                target.desc().byte_width
            );
        }

        unsafe {
            let mut mapped = D3D11_MAPPED_SUBRESOURCE::default();
            self.context
                .Map(&target.buffer, 0, D3D11_MAP_WRITE_DISCARD, 0, Some(&mut mapped))
                .map_err(|e| native_error(SOURCE, "Map", e))?;
            std::ptr::copy_nonoverlapping(data.as_ptr(), mapped.pData as *mut u8, data.len());
            self.context.Unmap(&target.buffer, 0);
        }
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32) {
        unsafe {
            self.context.DrawIndexed(index_count, start_index, base_vertex);
        }
    }

    fn draw_indexed_instanced(
        &mut self,
        index_count: u32,
        instance_count: u32,
        start_index: u32,
        base_vertex: i32,
        start_instance: u32,
    ) {
        unsafe {
            self.context.DrawIndexedInstanced(
                index_count,
                instance_count,
                start_index,
                base_vertex,
                start_instance,
            );
        }
    }
}
