/// Texture trait, texture views and the 2D-overlay surface

use bitflags::bitflags;
use crate::error::Result;
use crate::window::Extent2D;
use super::buffer::{BindFlags, CpuAccessFlags, Usage};
use super::device::AsAny;
use super::format::{Format, SampleDesc};

bitflags! {
    /// Miscellaneous resource flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResourceMiscFlags: u32 {
        /// 6-slice array usable as a cubemap
        const TEXTURE_CUBE = 0x4;
    }
}

/// Descriptor for creating a 2D texture (or texture array)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub array_size: u32,
    pub format: Format,
    pub sample: SampleDesc,
    pub usage: Usage,
    pub bind_flags: BindFlags,
    pub cpu_access: CpuAccessFlags,
    pub misc_flags: ResourceMiscFlags,
}

/// Initial content of one subresource (one mip of one array slice)
#[derive(Debug, Clone, Copy)]
pub struct SubresourceData<'a> {
    pub bytes: &'a [u8],
    /// Bytes between two rows
    pub row_pitch: u32,
}

/// Shader-resource view dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrvDimension {
    Texture2D,
    TextureCube,
}

/// Texture resource trait
pub trait Texture: AsAny {
    /// Descriptor the texture was created with
    fn desc(&self) -> &TextureDesc;

    /// Presentable surface interface of this texture
    ///
    /// Only textures created with render-target binding expose one.
    fn surface(&self) -> Result<Box<dyn OverlaySurface>>;
}

/// Render-target view over a texture
pub trait RenderTargetView: AsAny {}

/// Depth/stencil view over a depth texture
pub trait DepthStencilView: AsAny {}

/// Shader-visible view over a texture
pub trait ShaderResourceView: AsAny {
    fn dimension(&self) -> SrvDimension;
}

/// Surface an external 2D renderer draws into
///
/// The backend's concrete type carries the native surface interface; the
/// overlay renderer downcasts through `as_any()`.
pub trait OverlaySurface: AsAny {
    fn extent(&self) -> Extent2D;
}
