/// Conversions from core descriptors to Direct3D 11 / DXGI structures
///
/// The core descriptors mirror the native layouts field by field, so every
/// function here is a plain table lookup without policy.

use dx11_lessons::dx11::device::{
    BindFlags, Blend, BlendDesc, BlendOp, BufferDesc, ClearFlags, ComparisonFunc, CpuAccessFlags,
    CullMode, DepthStencilDesc, DepthStencilOpDesc, DepthWriteMask, FillMode, Filter, Format,
    InputClassification, PrimitiveTopology, Rational, RasterizerDesc, RenderTargetBlendDesc,
    ResourceMiscFlags, SampleDesc, SamplerDesc, StencilOp, SwapEffect, TextureAddressMode,
    TextureDesc, Usage, Viewport,
};
use dx11_lessons::dx11::Error;
use dx11_lessons::dx_err;
use windows::Win32::Foundation::{BOOL, E_OUTOFMEMORY};
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

// ===== ERRORS =====

/// Translate a failed native call into a core error (logged)
pub(crate) fn native_error(source: &str, call: &str, error: windows::core::Error) -> Error {
    if error.code() == E_OUTOFMEMORY {
        dx11_lessons::dx_error!(source, "{} failed: out of memory", call);
        return Error::OutOfMemory;
    }
    dx_err!(source, "{} failed: {}", call, error)
}

/// Unwrap the out-parameter of a successful create call
pub(crate) fn created<T>(source: &str, call: &str, object: Option<T>) -> dx11_lessons::dx11::Result<T> {
    object.ok_or_else(|| dx_err!(source, "{} returned no object", call))
}

// ===== FORMATS =====

pub(crate) fn format_to_dxgi(format: Format) -> DXGI_FORMAT {
    match format {
        Format::UNKNOWN => DXGI_FORMAT_UNKNOWN,
        Format::R8G8B8A8_UNORM => DXGI_FORMAT_R8G8B8A8_UNORM,
        Format::B8G8R8A8_UNORM => DXGI_FORMAT_B8G8R8A8_UNORM,
        Format::D24_UNORM_S8_UINT => DXGI_FORMAT_D24_UNORM_S8_UINT,
        Format::R32G32B32A32_FLOAT => DXGI_FORMAT_R32G32B32A32_FLOAT,
        Format::R32G32B32_FLOAT => DXGI_FORMAT_R32G32B32_FLOAT,
        Format::R32G32_FLOAT => DXGI_FORMAT_R32G32_FLOAT,
        Format::R32_UINT => DXGI_FORMAT_R32_UINT,
        Format::R16_UINT => DXGI_FORMAT_R16_UINT,
    }
}

pub(crate) fn sample_desc_to_dxgi(sample: SampleDesc) -> DXGI_SAMPLE_DESC {
    DXGI_SAMPLE_DESC { Count: sample.count, Quality: sample.quality }
}

pub(crate) fn rational_to_dxgi(rate: Rational) -> DXGI_RATIONAL {
    DXGI_RATIONAL { Numerator: rate.numerator, Denominator: rate.denominator }
}

pub(crate) fn rational_from_dxgi(rate: DXGI_RATIONAL) -> Rational {
    Rational { numerator: rate.Numerator, denominator: rate.Denominator }
}

// ===== RESOURCE DESCRIPTORS =====

pub(crate) fn usage_to_d3d11(usage: Usage) -> D3D11_USAGE {
    match usage {
        Usage::Default => D3D11_USAGE_DEFAULT,
        Usage::Immutable => D3D11_USAGE_IMMUTABLE,
        Usage::Dynamic => D3D11_USAGE_DYNAMIC,
    }
}

pub(crate) fn bind_flags_to_d3d11(flags: BindFlags) -> u32 {
    let table = [
        (BindFlags::VERTEX_BUFFER, D3D11_BIND_VERTEX_BUFFER),
        (BindFlags::INDEX_BUFFER, D3D11_BIND_INDEX_BUFFER),
        (BindFlags::CONSTANT_BUFFER, D3D11_BIND_CONSTANT_BUFFER),
        (BindFlags::SHADER_RESOURCE, D3D11_BIND_SHADER_RESOURCE),
        (BindFlags::RENDER_TARGET, D3D11_BIND_RENDER_TARGET),
        (BindFlags::DEPTH_STENCIL, D3D11_BIND_DEPTH_STENCIL),
    ];
    table
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .fold(0, |bits, (_, native)| bits | native.0 as u32)
}

pub(crate) fn cpu_access_to_d3d11(access: CpuAccessFlags) -> u32 {
    let mut bits = 0;
    if access.contains(CpuAccessFlags::WRITE) {
        bits |= D3D11_CPU_ACCESS_WRITE.0 as u32;
    }
    if access.contains(CpuAccessFlags::READ) {
        bits |= D3D11_CPU_ACCESS_READ.0 as u32;
    }
    bits
}

pub(crate) fn misc_flags_to_d3d11(flags: ResourceMiscFlags) -> u32 {
    if flags.contains(ResourceMiscFlags::TEXTURE_CUBE) {
        D3D11_RESOURCE_MISC_TEXTURECUBE.0 as u32
    } else {
        0
    }
}

pub(crate) fn buffer_desc_to_d3d11(desc: &BufferDesc) -> D3D11_BUFFER_DESC {
    D3D11_BUFFER_DESC {
        ByteWidth: desc.byte_width,
        Usage: usage_to_d3d11(desc.usage),
        BindFlags: bind_flags_to_d3d11(desc.bind_flags),
        CPUAccessFlags: cpu_access_to_d3d11(desc.cpu_access),
        MiscFlags: 0,
        StructureByteStride: 0,
    }
}

pub(crate) fn texture_desc_to_d3d11(desc: &TextureDesc) -> D3D11_TEXTURE2D_DESC {
    D3D11_TEXTURE2D_DESC {
        Width: desc.width,
        Height: desc.height,
        MipLevels: desc.mip_levels,
        ArraySize: desc.array_size,
        Format: format_to_dxgi(desc.format),
        SampleDesc: sample_desc_to_dxgi(desc.sample),
        Usage: usage_to_d3d11(desc.usage),
        BindFlags: bind_flags_to_d3d11(desc.bind_flags),
        CPUAccessFlags: cpu_access_to_d3d11(desc.cpu_access),
        MiscFlags: misc_flags_to_d3d11(desc.misc_flags),
    }
}

// ===== BLEND =====

pub(crate) fn blend_to_d3d11(blend: Blend) -> D3D11_BLEND {
    match blend {
        Blend::Zero => D3D11_BLEND_ZERO,
        Blend::One => D3D11_BLEND_ONE,
        Blend::SrcColor => D3D11_BLEND_SRC_COLOR,
        Blend::InvSrcColor => D3D11_BLEND_INV_SRC_COLOR,
        Blend::SrcAlpha => D3D11_BLEND_SRC_ALPHA,
        Blend::InvSrcAlpha => D3D11_BLEND_INV_SRC_ALPHA,
        Blend::DestAlpha => D3D11_BLEND_DEST_ALPHA,
        Blend::InvDestAlpha => D3D11_BLEND_INV_DEST_ALPHA,
        Blend::DestColor => D3D11_BLEND_DEST_COLOR,
        Blend::InvDestColor => D3D11_BLEND_INV_DEST_COLOR,
    }
}

pub(crate) fn blend_op_to_d3d11(op: BlendOp) -> D3D11_BLEND_OP {
    match op {
        BlendOp::Add => D3D11_BLEND_OP_ADD,
        BlendOp::Subtract => D3D11_BLEND_OP_SUBTRACT,
        BlendOp::RevSubtract => D3D11_BLEND_OP_REV_SUBTRACT,
        BlendOp::Min => D3D11_BLEND_OP_MIN,
        BlendOp::Max => D3D11_BLEND_OP_MAX,
    }
}

fn render_target_blend_to_d3d11(desc: &RenderTargetBlendDesc) -> D3D11_RENDER_TARGET_BLEND_DESC {
    D3D11_RENDER_TARGET_BLEND_DESC {
        BlendEnable: BOOL::from(desc.blend_enable),
        SrcBlend: blend_to_d3d11(desc.src_blend),
        DestBlend: blend_to_d3d11(desc.dest_blend),
        BlendOp: blend_op_to_d3d11(desc.blend_op),
        SrcBlendAlpha: blend_to_d3d11(desc.src_blend_alpha),
        DestBlendAlpha: blend_to_d3d11(desc.dest_blend_alpha),
        BlendOpAlpha: blend_op_to_d3d11(desc.blend_op_alpha),
        RenderTargetWriteMask: desc.render_target_write_mask,
    }
}

/// Only render target 0 is described; the other seven stay zeroed
pub(crate) fn blend_desc_to_d3d11(desc: &BlendDesc) -> D3D11_BLEND_DESC {
    let mut render_target = [D3D11_RENDER_TARGET_BLEND_DESC::default(); 8];
    render_target[0] = render_target_blend_to_d3d11(&desc.render_target);

    D3D11_BLEND_DESC {
        AlphaToCoverageEnable: BOOL::from(desc.alpha_to_coverage_enable),
        IndependentBlendEnable: BOOL::from(desc.independent_blend_enable),
        RenderTarget: render_target,
    }
}

// ===== DEPTH / STENCIL =====

pub(crate) fn comparison_to_d3d11(func: ComparisonFunc) -> D3D11_COMPARISON_FUNC {
    match func {
        ComparisonFunc::Never => D3D11_COMPARISON_NEVER,
        ComparisonFunc::Less => D3D11_COMPARISON_LESS,
        ComparisonFunc::Equal => D3D11_COMPARISON_EQUAL,
        ComparisonFunc::LessEqual => D3D11_COMPARISON_LESS_EQUAL,
        ComparisonFunc::Greater => D3D11_COMPARISON_GREATER,
        ComparisonFunc::NotEqual => D3D11_COMPARISON_NOT_EQUAL,
        ComparisonFunc::GreaterEqual => D3D11_COMPARISON_GREATER_EQUAL,
        ComparisonFunc::Always => D3D11_COMPARISON_ALWAYS,
    }
}

pub(crate) fn stencil_op_to_d3d11(op: StencilOp) -> D3D11_STENCIL_OP {
    match op {
        StencilOp::Keep => D3D11_STENCIL_OP_KEEP,
        StencilOp::Zero => D3D11_STENCIL_OP_ZERO,
        StencilOp::Replace => D3D11_STENCIL_OP_REPLACE,
        StencilOp::IncrSat => D3D11_STENCIL_OP_INCR_SAT,
        StencilOp::DecrSat => D3D11_STENCIL_OP_DECR_SAT,
        StencilOp::Invert => D3D11_STENCIL_OP_INVERT,
        StencilOp::Incr => D3D11_STENCIL_OP_INCR,
        StencilOp::Decr => D3D11_STENCIL_OP_DECR,
    }
}

fn stencil_face_to_d3d11(face: &DepthStencilOpDesc) -> D3D11_DEPTH_STENCILOP_DESC {
    D3D11_DEPTH_STENCILOP_DESC {
        StencilFailOp: stencil_op_to_d3d11(face.stencil_fail_op),
        StencilDepthFailOp: stencil_op_to_d3d11(face.stencil_depth_fail_op),
        StencilPassOp: stencil_op_to_d3d11(face.stencil_pass_op),
        StencilFunc: comparison_to_d3d11(face.stencil_func),
    }
}

pub(crate) fn depth_stencil_desc_to_d3d11(desc: &DepthStencilDesc) -> D3D11_DEPTH_STENCIL_DESC {
    D3D11_DEPTH_STENCIL_DESC {
        DepthEnable: BOOL::from(desc.depth_enable),
        DepthWriteMask: match desc.depth_write_mask {
            DepthWriteMask::Zero => D3D11_DEPTH_WRITE_MASK_ZERO,
            DepthWriteMask::All => D3D11_DEPTH_WRITE_MASK_ALL,
        },
        DepthFunc: comparison_to_d3d11(desc.depth_func),
        StencilEnable: BOOL::from(desc.stencil_enable),
        StencilReadMask: desc.stencil_read_mask,
        StencilWriteMask: desc.stencil_write_mask,
        FrontFace: stencil_face_to_d3d11(&desc.front_face),
        BackFace: stencil_face_to_d3d11(&desc.back_face),
    }
}

// ===== RASTERIZER =====

pub(crate) fn rasterizer_desc_to_d3d11(desc: &RasterizerDesc) -> D3D11_RASTERIZER_DESC {
    D3D11_RASTERIZER_DESC {
        FillMode: match desc.fill_mode {
            FillMode::Wireframe => D3D11_FILL_WIREFRAME,
            FillMode::Solid => D3D11_FILL_SOLID,
        },
        CullMode: match desc.cull_mode {
            CullMode::None => D3D11_CULL_NONE,
            CullMode::Front => D3D11_CULL_FRONT,
            CullMode::Back => D3D11_CULL_BACK,
        },
        FrontCounterClockwise: BOOL::from(desc.front_counter_clockwise),
        DepthBias: desc.depth_bias,
        DepthBiasClamp: desc.depth_bias_clamp,
        SlopeScaledDepthBias: desc.slope_scaled_depth_bias,
        DepthClipEnable: BOOL::from(desc.depth_clip_enable),
        ScissorEnable: BOOL::from(desc.scissor_enable),
        MultisampleEnable: BOOL::from(desc.multisample_enable),
        AntialiasedLineEnable: BOOL::from(desc.antialiased_line_enable),
    }
}

// ===== SAMPLER =====

pub(crate) fn filter_to_d3d11(filter: Filter) -> D3D11_FILTER {
    match filter {
        Filter::MinMagMipPoint => D3D11_FILTER_MIN_MAG_MIP_POINT,
        Filter::MinMagMipLinear => D3D11_FILTER_MIN_MAG_MIP_LINEAR,
        Filter::Anisotropic => D3D11_FILTER_ANISOTROPIC,
    }
}

pub(crate) fn address_mode_to_d3d11(mode: TextureAddressMode) -> D3D11_TEXTURE_ADDRESS_MODE {
    match mode {
        TextureAddressMode::Wrap => D3D11_TEXTURE_ADDRESS_WRAP,
        TextureAddressMode::Mirror => D3D11_TEXTURE_ADDRESS_MIRROR,
        TextureAddressMode::Clamp => D3D11_TEXTURE_ADDRESS_CLAMP,
        TextureAddressMode::Border => D3D11_TEXTURE_ADDRESS_BORDER,
    }
}

pub(crate) fn sampler_desc_to_d3d11(desc: &SamplerDesc) -> D3D11_SAMPLER_DESC {
    D3D11_SAMPLER_DESC {
        Filter: filter_to_d3d11(desc.filter),
        AddressU: address_mode_to_d3d11(desc.address_u),
        AddressV: address_mode_to_d3d11(desc.address_v),
        AddressW: address_mode_to_d3d11(desc.address_w),
        MipLODBias: desc.mip_lod_bias,
        MaxAnisotropy: desc.max_anisotropy,
        ComparisonFunc: comparison_to_d3d11(desc.comparison_func),
        BorderColor: desc.border_color,
        MinLOD: desc.min_lod,
        MaxLOD: desc.max_lod,
    }
}

// ===== INPUT ASSEMBLER =====

pub(crate) fn classification_to_d3d11(class: InputClassification) -> D3D11_INPUT_CLASSIFICATION {
    match class {
        InputClassification::PerVertexData => D3D11_INPUT_PER_VERTEX_DATA,
        InputClassification::PerInstanceData => D3D11_INPUT_PER_INSTANCE_DATA,
    }
}

pub(crate) fn topology_to_d3d11(topology: PrimitiveTopology) -> D3D_PRIMITIVE_TOPOLOGY {
    match topology {
        PrimitiveTopology::TriangleList => D3D11_PRIMITIVE_TOPOLOGY_TRIANGLELIST,
        PrimitiveTopology::TriangleStrip => D3D11_PRIMITIVE_TOPOLOGY_TRIANGLESTRIP,
        PrimitiveTopology::LineList => D3D11_PRIMITIVE_TOPOLOGY_LINELIST,
        PrimitiveTopology::PointList => D3D11_PRIMITIVE_TOPOLOGY_POINTLIST,
    }
}

// ===== OUTPUT MERGER =====

pub(crate) fn viewport_to_d3d11(viewport: &Viewport) -> D3D11_VIEWPORT {
    D3D11_VIEWPORT {
        TopLeftX: viewport.x,
        TopLeftY: viewport.y,
        Width: viewport.width,
        Height: viewport.height,
        MinDepth: viewport.min_depth,
        MaxDepth: viewport.max_depth,
    }
}

pub(crate) fn clear_flags_to_d3d11(flags: ClearFlags) -> u32 {
    let mut bits = 0;
    if flags.contains(ClearFlags::DEPTH) {
        bits |= D3D11_CLEAR_DEPTH.0 as u32;
    }
    if flags.contains(ClearFlags::STENCIL) {
        bits |= D3D11_CLEAR_STENCIL.0 as u32;
    }
    bits
}

// ===== PRESENTATION =====

pub(crate) fn swap_effect_to_dxgi(effect: SwapEffect) -> DXGI_SWAP_EFFECT {
    match effect {
        SwapEffect::Discard => DXGI_SWAP_EFFECT_DISCARD,
        SwapEffect::FlipSequential => DXGI_SWAP_EFFECT_FLIP_SEQUENTIAL,
        SwapEffect::FlipDiscard => DXGI_SWAP_EFFECT_FLIP_DISCARD,
    }
}

#[cfg(test)]
#[path = "d3d11_convert_tests.rs"]
mod tests;
