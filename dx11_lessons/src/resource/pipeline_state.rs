/// PipelineState - fixed-function state bundle compiled from closed style enums
///
/// The `*_desc` functions are the translation tables from style enums to
/// native descriptors. They are pure so they can be checked without a GPU.

use crate::error::{Error, Result};
use crate::graphics_device::{
    Blend, BlendDesc, BlendOp, BlendState, CommandContext, ComparisonFunc, CullMode,
    DepthStencilDesc, DepthStencilOpDesc, DepthStencilState, DepthWriteMask, Device, FillMode,
    Filter, Format, InputClassification, InputElementDesc, InputLayout, PixelShader,
    PrimitiveTopology, RasterizerDesc, RasterizerState, RenderTargetBlendDesc, SamplerDesc,
    SamplerState, StencilOp, TextureAddressMode, VertexShader, APPEND_ALIGNED_ELEMENT,
    COLOR_WRITE_ENABLE_ALL, DEFAULT_STENCIL_MASK,
};
use crate::dx_error;

// ===== STYLE ENUMS =====

/// Color blending preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Replace destination
    Opaque,
    /// Premultiplied alpha
    Alpha,
    /// Source added on top of destination
    Additive,
    /// Straight (non-premultiplied) alpha
    NonPremultiplied,
}

/// Depth/stencil preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthStencilMode {
    /// No depth test, no depth write
    None,
    /// Depth test and depth write
    ReadWrite,
    /// Depth test only
    ReadOnly,
}

/// Rasterizer preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterizerMode {
    CullNone,
    CullClockwise,
    CullAntiClockwise,
    Wireframe,
}

/// Sampler preset (filter x address mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerMode {
    PointWrap,
    PointClamp,
    LinearWrap,
    LinearClamp,
    AnisotropicWrap,
    AnisotropicClamp,
}

/// Vertex input element semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputElement {
    /// 3 x f32
    Position,
    /// 3 x f32
    Normal,
    /// 4 x f32
    Color,
    /// 2 x f32
    Texcoord,
    /// One row (4 x f32) of a per-instance 4x4 transform; use four in a row
    InstanceTransformRow,
}

/// Position, normal, texcoord
pub const VERTEX_ELEMENTS: [InputElement; 3] =
    [InputElement::Position, InputElement::Normal, InputElement::Texcoord];

/// Position, normal, texcoord + a per-instance 4x4 transform
pub const INSTANCED_VERTEX_ELEMENTS: [InputElement; 7] = [
    InputElement::Position,
    InputElement::Normal,
    InputElement::Texcoord,
    InputElement::InstanceTransformRow,
    InputElement::InstanceTransformRow,
    InputElement::InstanceTransformRow,
    InputElement::InstanceTransformRow,
];

/// Everything needed to build a PipelineState
#[derive(Debug, Clone)]
pub struct PipelineStateDescription {
    pub blend: BlendMode,
    pub depth_stencil: DepthStencilMode,
    pub rasterizer: RasterizerMode,
    pub sampler: SamplerMode,
    pub input_layout: Vec<InputElement>,
    pub vertex_shader: Vec<u8>,
    pub pixel_shader: Vec<u8>,
    pub topology: PrimitiveTopology,
}

// ===== TRANSLATION TABLES =====

/// Blend descriptor; every preset except `Opaque` enables blending
pub fn blend_desc(mode: BlendMode) -> BlendDesc {
    let (src, dest, enabled) = match mode {
        // One/Zero output equals disabled blending; an "src != One || dest != One" rule would enable it
        BlendMode::Opaque => (Blend::One, Blend::Zero, false),
        BlendMode::Alpha => (Blend::One, Blend::InvSrcAlpha, true),
        BlendMode::Additive => (Blend::SrcAlpha, Blend::One, true),
        BlendMode::NonPremultiplied => (Blend::SrcAlpha, Blend::InvSrcAlpha, true),
    };

    BlendDesc {
        alpha_to_coverage_enable: false,
        independent_blend_enable: false,
        render_target: RenderTargetBlendDesc {
            blend_enable: enabled,
            src_blend: src,
            dest_blend: dest,
            blend_op: BlendOp::Add,
            src_blend_alpha: src,
            dest_blend_alpha: dest,
            blend_op_alpha: BlendOp::Add,
            render_target_write_mask: COLOR_WRITE_ENABLE_ALL,
        },
    }
}

/// Depth/stencil descriptor; LESS_EQUAL, stencil always off
pub fn depth_stencil_desc(mode: DepthStencilMode) -> DepthStencilDesc {
    let (depth_enable, write) = match mode {
        DepthStencilMode::None => (false, false),
        DepthStencilMode::ReadWrite => (true, true),
        DepthStencilMode::ReadOnly => (true, false),
    };

    let face = DepthStencilOpDesc {
        stencil_fail_op: StencilOp::Keep,
        stencil_depth_fail_op: StencilOp::Keep,
        stencil_pass_op: StencilOp::Keep,
        stencil_func: ComparisonFunc::Always,
    };

    DepthStencilDesc {
        depth_enable,
        depth_write_mask: if write { DepthWriteMask::All } else { DepthWriteMask::Zero },
        depth_func: ComparisonFunc::LessEqual,
        stencil_enable: false,
        stencil_read_mask: DEFAULT_STENCIL_MASK,
        stencil_write_mask: DEFAULT_STENCIL_MASK,
        front_face: face,
        back_face: face,
    }
}

/// Rasterizer descriptor; depth clip and multisampling always on
pub fn rasterizer_desc(mode: RasterizerMode) -> RasterizerDesc {
    let (cull_mode, fill_mode) = match mode {
        RasterizerMode::CullNone => (CullMode::None, FillMode::Solid),
        RasterizerMode::CullClockwise => (CullMode::Front, FillMode::Solid),
        RasterizerMode::CullAntiClockwise => (CullMode::Back, FillMode::Solid),
        RasterizerMode::Wireframe => (CullMode::Back, FillMode::Wireframe),
    };

    RasterizerDesc {
        fill_mode,
        cull_mode,
        front_counter_clockwise: false,
        depth_bias: 0,
        depth_bias_clamp: 0.0,
        slope_scaled_depth_bias: 0.0,
        depth_clip_enable: true,
        scissor_enable: false,
        multisample_enable: true,
        antialiased_line_enable: false,
    }
}

/// Maximum anisotropy of the anisotropic presets
pub const MAX_ANISOTROPY: u32 = 16;

/// Sampler descriptor; unbounded LOD, no comparison
pub fn sampler_desc(mode: SamplerMode) -> SamplerDesc {
    let (filter, address) = match mode {
        SamplerMode::PointWrap => (Filter::MinMagMipPoint, TextureAddressMode::Wrap),
        SamplerMode::PointClamp => (Filter::MinMagMipPoint, TextureAddressMode::Clamp),
        SamplerMode::LinearWrap => (Filter::MinMagMipLinear, TextureAddressMode::Wrap),
        SamplerMode::LinearClamp => (Filter::MinMagMipLinear, TextureAddressMode::Clamp),
        SamplerMode::AnisotropicWrap => (Filter::Anisotropic, TextureAddressMode::Wrap),
        SamplerMode::AnisotropicClamp => (Filter::Anisotropic, TextureAddressMode::Clamp),
    };

    SamplerDesc {
        filter,
        address_u: address,
        address_v: address,
        address_w: address,
        mip_lod_bias: 0.0,
        max_anisotropy: MAX_ANISOTROPY,
        comparison_func: ComparisonFunc::Never,
        border_color: [0.0; 4],
        min_lod: 0.0,
        max_lod: f32::MAX,
    }
}

/// Semantic name of the per-instance transform rows
pub const INSTANCE_TRANSFORM_SEMANTIC: &str = "INSTANCE_TRANSFORM";

/// Native input elements for an ordered semantic list
///
/// Semantic indices count repeated names. Per-vertex data lives in slot 0,
/// instance rows in slot 1. Instance rows must come as a full 4x4 matrix.
pub fn input_element_descs(elements: &[InputElement]) -> Result<Vec<InputElementDesc>> {
    if elements.is_empty() {
        return Err(Error::InvalidResource("empty input layout".to_string()));
    }

    let rows = elements.iter().filter(|e| **e == InputElement::InstanceTransformRow).count();
    if rows != 0 && rows != 4 {
        return Err(Error::InvalidResource(format!(
            "instance transform needs 4 rows, got {}",
            rows
        )));
    }

    let mut descs: Vec<InputElementDesc> = Vec::with_capacity(elements.len());
    for element in elements {
        let (semantic_name, format, input_slot, class, step_rate) = match element {
            InputElement::Position => ("POSITION", Format::R32G32B32_FLOAT, 0, InputClassification::PerVertexData, 0),
            InputElement::Normal => ("NORMAL", Format::R32G32B32_FLOAT, 0, InputClassification::PerVertexData, 0),
            InputElement::Color => ("COLOR", Format::R32G32B32A32_FLOAT, 0, InputClassification::PerVertexData, 0),
            InputElement::Texcoord => ("TEXCOORD", Format::R32G32_FLOAT, 0, InputClassification::PerVertexData, 0),
            InputElement::InstanceTransformRow => (
                INSTANCE_TRANSFORM_SEMANTIC,
                Format::R32G32B32A32_FLOAT,
                1,
                InputClassification::PerInstanceData,
                1,
            ),
        };

        let semantic_index = descs.iter().filter(|d| d.semantic_name == semantic_name).count() as u32;

        descs.push(InputElementDesc {
            semantic_name,
            semantic_index,
            format,
            input_slot,
            aligned_byte_offset: APPEND_ALIGNED_ELEMENT,
            input_slot_class: class,
            instance_data_step_rate: step_rate,
        });
    }

    Ok(descs)
}

// ===== PIPELINE STATE =====

/// Immutable bundle of fixed-function state and shaders
pub struct PipelineState {
    blend_state: Box<dyn BlendState>,
    depth_stencil_state: Box<dyn DepthStencilState>,
    rasterizer_state: Box<dyn RasterizerState>,
    sampler_state: Box<dyn SamplerState>,
    input_layout: Box<dyn InputLayout>,
    vertex_shader: Box<dyn VertexShader>,
    pixel_shader: Box<dyn PixelShader>,
    topology: PrimitiveTopology,
}

impl PipelineState {
    /// Compile every state object of `description`
    ///
    /// Any failure is fatal for the caller: the descriptors are fixed
    /// translations, so a failure means broken shaders or a broken driver.
    pub fn new(device: &dyn Device, description: &PipelineStateDescription) -> Result<Self> {
        let blend_state = device.create_blend_state(&blend_desc(description.blend))?;
        let depth_stencil_state =
            device.create_depth_stencil_state(&depth_stencil_desc(description.depth_stencil))?;
        let rasterizer_state = device.create_rasterizer_state(&rasterizer_desc(description.rasterizer))?;
        let sampler_state = device.create_sampler_state(&sampler_desc(description.sampler))?;

        let elements = input_element_descs(&description.input_layout)?;
        let input_layout = device
            .create_input_layout(&elements, &description.vertex_shader)
            .map_err(|e| {
                dx_error!("dx11::PipelineState", "Input layout rejected: {}", e);
                e
            })?;

        let vertex_shader = device.create_vertex_shader(&description.vertex_shader)?;
        let pixel_shader = device.create_pixel_shader(&description.pixel_shader)?;

        Ok(Self {
            blend_state,
            depth_stencil_state,
            rasterizer_state,
            sampler_state,
            input_layout,
            vertex_shader,
            pixel_shader,
            topology: description.topology,
        })
    }

    /// Bind the whole bundle
    ///
    /// Order: blend, depth/stencil, rasterizer, pixel sampler 0, topology,
    /// input layout, vertex shader, pixel shader.
    pub fn activate(&self, context: &mut dyn CommandContext) {
        context.set_blend_state(self.blend_state.as_ref(), [0.0, 0.0, 0.0, 0.0], 0xFFFF_FFFF);
        context.set_depth_stencil_state(self.depth_stencil_state.as_ref(), 0);
        context.set_rasterizer_state(self.rasterizer_state.as_ref());
        context.ps_set_sampler(0, self.sampler_state.as_ref());
        context.set_primitive_topology(self.topology);
        context.set_input_layout(self.input_layout.as_ref());
        context.vs_set_shader(self.vertex_shader.as_ref());
        context.ps_set_shader(self.pixel_shader.as_ref());
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }
}

#[cfg(test)]
#[path = "pipeline_state_tests.rs"]
mod tests;
