/// Native fixed-function state descriptors and state-object traits
///
/// These structs mirror the Direct3D 11 descriptor layouts one-to-one so a
/// backend can translate them field by field.

use super::device::AsAny;
use super::format::Format;

// ===== BLEND =====

/// Blend factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Zero,
    One,
    SrcColor,
    InvSrcColor,
    SrcAlpha,
    InvSrcAlpha,
    DestAlpha,
    InvDestAlpha,
    DestColor,
    InvDestColor,
}

/// Blend operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendOp {
    Add,
    Subtract,
    RevSubtract,
    Min,
    Max,
}

/// Color channel write mask (RGBA = 0xF)
pub const COLOR_WRITE_ENABLE_ALL: u8 = 0x0F;

/// Blend settings of one render target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetBlendDesc {
    pub blend_enable: bool,
    pub src_blend: Blend,
    pub dest_blend: Blend,
    pub blend_op: BlendOp,
    pub src_blend_alpha: Blend,
    pub dest_blend_alpha: Blend,
    pub blend_op_alpha: BlendOp,
    pub render_target_write_mask: u8,
}

/// Blend state descriptor (render target 0 only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendDesc {
    pub alpha_to_coverage_enable: bool,
    pub independent_blend_enable: bool,
    pub render_target: RenderTargetBlendDesc,
}

// ===== DEPTH / STENCIL =====

/// Comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// Depth write mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthWriteMask {
    Zero,
    All,
}

/// Stencil operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    IncrSat,
    DecrSat,
    Invert,
    Incr,
    Decr,
}

/// Stencil behaviour of one face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStencilOpDesc {
    pub stencil_fail_op: StencilOp,
    pub stencil_depth_fail_op: StencilOp,
    pub stencil_pass_op: StencilOp,
    pub stencil_func: ComparisonFunc,
}

/// Default stencil read/write mask
pub const DEFAULT_STENCIL_MASK: u8 = 0xFF;

/// Depth/stencil state descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStencilDesc {
    pub depth_enable: bool,
    pub depth_write_mask: DepthWriteMask,
    pub depth_func: ComparisonFunc,
    pub stencil_enable: bool,
    pub stencil_read_mask: u8,
    pub stencil_write_mask: u8,
    pub front_face: DepthStencilOpDesc,
    pub back_face: DepthStencilOpDesc,
}

// ===== RASTERIZER =====

/// Triangle fill mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Wireframe,
    Solid,
}

/// Face culling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    None,
    Front,
    Back,
}

/// Rasterizer state descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizerDesc {
    pub fill_mode: FillMode,
    pub cull_mode: CullMode,
    pub front_counter_clockwise: bool,
    pub depth_bias: i32,
    pub depth_bias_clamp: f32,
    pub slope_scaled_depth_bias: f32,
    pub depth_clip_enable: bool,
    pub scissor_enable: bool,
    pub multisample_enable: bool,
    pub antialiased_line_enable: bool,
}

// ===== SAMPLER =====

/// Texture filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    MinMagMipPoint,
    MinMagMipLinear,
    Anisotropic,
}

/// Texture coordinate addressing outside [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureAddressMode {
    Wrap,
    Mirror,
    Clamp,
    Border,
}

/// Sampler state descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerDesc {
    pub filter: Filter,
    pub address_u: TextureAddressMode,
    pub address_v: TextureAddressMode,
    pub address_w: TextureAddressMode,
    pub mip_lod_bias: f32,
    pub max_anisotropy: u32,
    pub comparison_func: ComparisonFunc,
    pub border_color: [f32; 4],
    pub min_lod: f32,
    pub max_lod: f32,
}

// ===== INPUT LAYOUT =====

/// Per-vertex or per-instance element data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputClassification {
    PerVertexData,
    PerInstanceData,
}

/// Element offset directly after the previous element
pub const APPEND_ALIGNED_ELEMENT: u32 = 0xFFFF_FFFF;

/// One element of a vertex input layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputElementDesc {
    pub semantic_name: &'static str,
    pub semantic_index: u32,
    pub format: Format,
    pub input_slot: u32,
    pub aligned_byte_offset: u32,
    pub input_slot_class: InputClassification,
    pub instance_data_step_rate: u32,
}

// ===== STATE OBJECTS =====

/// Compiled blend state
pub trait BlendState: AsAny {}

/// Compiled depth/stencil state
pub trait DepthStencilState: AsAny {}

/// Compiled rasterizer state
pub trait RasterizerState: AsAny {}

/// Compiled sampler state
pub trait SamplerState: AsAny {}

/// Vertex input layout validated against a vertex shader signature
pub trait InputLayout: AsAny {}

/// Vertex shader object
pub trait VertexShader: AsAny {}

/// Pixel shader object
pub trait PixelShader: AsAny {}
