/*!
# DX11 Lessons - Direct3D 11 Backend

Direct3D 11 / DXGI implementation of the `dx11_lessons` native seam.

This crate implements the core `Device`, `CommandContext` and resource traits
with the `windows` crate. Lessons call [`create_graphics_device`] once and
then work only with the core types; an overlay renderer may downcast an
`OverlaySurface` to [`D3D11OverlaySurface`] for the native DXGI surface.

The crate is empty on platforms other than Windows.
*/

#![cfg(windows)]

mod d3d11;
mod d3d11_context;
mod d3d11_convert;
mod d3d11_debug;
mod d3d11_present_surface;
mod d3d11_resources;

pub use d3d11::{create_graphics_device, D3D11Device};
pub use d3d11_context::D3D11Context;
pub use d3d11_present_surface::D3D11SwapChain;
pub use d3d11_resources::{
    D3D11BlendState, D3D11Buffer, D3D11DepthStencilState, D3D11DepthStencilView,
    D3D11InputLayout, D3D11OverlaySurface, D3D11PixelShader, D3D11RasterizerState,
    D3D11RenderTargetView, D3D11SamplerState, D3D11ShaderResourceView, D3D11Texture,
    D3D11VertexShader,
};

// Debug-layer statistics
pub use d3d11_debug::{print_validation_stats_report, validation_stats, ValidationStats};
