/// Resources - Direct3D 11 implementations of the core resource traits
///
/// Every wrapper owns one COM reference; dropping it releases the native
/// object.

use dx11_lessons::dx11::device::{
    BindFlags, BlendState, Buffer, BufferDesc, DepthStencilState, DepthStencilView, InputLayout,
    OverlaySurface, PixelShader, RasterizerState, RenderTargetView, SamplerState,
    ShaderResourceView, SrvDimension, Texture, TextureDesc, VertexShader,
};
use dx11_lessons::dx11::{Error, Extent2D, Result};
use windows::core::Interface;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::IDXGISurface1;

use crate::d3d11_convert::native_error;

// ===== BUFFER =====

/// D3D11 buffer (vertex, index or constant)
pub struct D3D11Buffer {
    pub(crate) buffer: ID3D11Buffer,
    desc: BufferDesc,
}

impl D3D11Buffer {
    pub(crate) fn new(buffer: ID3D11Buffer, desc: BufferDesc) -> Self {
        Self { buffer, desc }
    }

    pub fn native(&self) -> &ID3D11Buffer {
        &self.buffer
    }
}

impl Buffer for D3D11Buffer {
    fn desc(&self) -> &BufferDesc {
        &self.desc
    }
}

// ===== TEXTURE =====

/// D3D11 2D texture (or texture array)
pub struct D3D11Texture {
    pub(crate) texture: ID3D11Texture2D,
    desc: TextureDesc,
}

impl D3D11Texture {
    pub(crate) fn new(texture: ID3D11Texture2D, desc: TextureDesc) -> Self {
        Self { texture, desc }
    }

    pub fn native(&self) -> &ID3D11Texture2D {
        &self.texture
    }
}

impl Texture for D3D11Texture {
    fn desc(&self) -> &TextureDesc {
        &self.desc
    }

    fn surface(&self) -> Result<Box<dyn OverlaySurface>> {
        if !self.desc.bind_flags.contains(BindFlags::RENDER_TARGET) {
            return Err(Error::InvalidResource(
                "only render-target textures expose a surface".to_string(),
            ));
        }

        let surface = self
            .texture
            .cast::<IDXGISurface1>()
            .map_err(|e| native_error("dx11::d3d11::Texture", "QueryInterface(IDXGISurface1)", e))?;

        Ok(Box::new(D3D11OverlaySurface {
            surface,
            extent: Extent2D::new(self.desc.width, self.desc.height),
        }))
    }
}

/// DXGI surface of a render-target texture, handed to a 2D renderer
pub struct D3D11OverlaySurface {
    surface: IDXGISurface1,
    extent: Extent2D,
}

impl D3D11OverlaySurface {
    /// The native surface to bind a 2D render target to
    pub fn native(&self) -> &IDXGISurface1 {
        &self.surface
    }
}

impl OverlaySurface for D3D11OverlaySurface {
    fn extent(&self) -> Extent2D {
        self.extent
    }
}

// ===== VIEWS =====

pub struct D3D11RenderTargetView {
    pub(crate) view: ID3D11RenderTargetView,
}

impl RenderTargetView for D3D11RenderTargetView {}

pub struct D3D11DepthStencilView {
    pub(crate) view: ID3D11DepthStencilView,
}

impl DepthStencilView for D3D11DepthStencilView {}

pub struct D3D11ShaderResourceView {
    pub(crate) view: ID3D11ShaderResourceView,
    pub(crate) dimension: SrvDimension,
}

impl ShaderResourceView for D3D11ShaderResourceView {
    fn dimension(&self) -> SrvDimension {
        self.dimension
    }
}

// ===== STATE OBJECTS =====

pub struct D3D11BlendState {
    pub(crate) state: ID3D11BlendState,
}

impl BlendState for D3D11BlendState {}

pub struct D3D11DepthStencilState {
    pub(crate) state: ID3D11DepthStencilState,
}

impl DepthStencilState for D3D11DepthStencilState {}

pub struct D3D11RasterizerState {
    pub(crate) state: ID3D11RasterizerState,
}

impl RasterizerState for D3D11RasterizerState {}

pub struct D3D11SamplerState {
    pub(crate) state: ID3D11SamplerState,
}

impl SamplerState for D3D11SamplerState {}

pub struct D3D11InputLayout {
    pub(crate) layout: ID3D11InputLayout,
}

impl InputLayout for D3D11InputLayout {}

pub struct D3D11VertexShader {
    pub(crate) shader: ID3D11VertexShader,
}

impl VertexShader for D3D11VertexShader {}

pub struct D3D11PixelShader {
    pub(crate) shader: ID3D11PixelShader,
}

impl PixelShader for D3D11PixelShader {}
