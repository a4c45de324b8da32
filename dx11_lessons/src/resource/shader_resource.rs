/// ShaderResource - textures bound as shader inputs
///
/// Three sources: an encoded image (DDS, PNG), six cubemap face images, or a
/// render-target texture shared with the 2D overlay renderer.

use crate::error::{Error, Result};
use crate::graphics_device::{
    BindFlags, CommandContext, CpuAccessFlags, Device, Format, OverlaySurface, ResourceMiscFlags,
    SampleDesc, ShaderResourceView, SrvDimension, SubresourceData, Texture, TextureDesc, Usage,
};
use crate::resource::shader_stage::{ShaderSlot, ShaderStage, StageBinder};
use crate::window::Extent2D;
use crate::dx_error;

/// Cubemap face order expected by `from_cubemap_faces`
pub const CUBEMAP_FACE_NAMES: [&str; 6] = ["left", "right", "top", "bottom", "back", "front"];

/// Decoded RGBA8 image
struct DecodedImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

fn decode_image(bytes: &[u8]) -> Result<DecodedImage> {
    let image = image::load_from_memory(bytes).map_err(|e| {
        dx_error!("dx11::ShaderResource", "Image decode failed: {}", e);
        Error::InvalidResource(format!("image decode failed: {}", e))
    })?;

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage { width, height, rgba: rgba.into_raw() })
}

/// Texture + shader view bound to one stage and slot
pub struct ShaderResource {
    // View is declared before the texture it references
    view: Box<dyn ShaderResourceView>,
    texture: Box<dyn Texture>,
    binder: &'static dyn StageBinder,
    slot: u32,
}

impl ShaderResource {
    /// Decode `bytes` and upload a single 2D texture
    pub fn from_encoded_image(device: &dyn Device, stage: ShaderStage, slot: ShaderSlot, bytes: &[u8]) -> Result<Self> {
        let image = decode_image(bytes)?;
        let desc = sampled_texture_desc(image.width, image.height, 1, ResourceMiscFlags::empty());

        let texture = device.create_texture_2d(
            &desc,
            &[SubresourceData { bytes: &image.rgba, row_pitch: image.width * 4 }],
        )?;
        Self::with_view(device, stage, slot, texture, SrvDimension::Texture2D)
    }

    /// Decode six equally sized faces (left, right, top, bottom, back, front)
    /// into one cubemap; face i becomes array slice i
    pub fn from_cubemap_faces(device: &dyn Device, stage: ShaderStage, slot: ShaderSlot, faces: [&[u8]; 6]) -> Result<Self> {
        let mut decoded = Vec::with_capacity(6);
        for bytes in faces {
            decoded.push(decode_image(bytes)?);
        }

        let (width, height) = (decoded[0].width, decoded[0].height);
        for (index, face) in decoded.iter().enumerate() {
            if face.width != width || face.height != height {
                dx_error!(
                    "dx11::ShaderResource",
                    "Cubemap face {} is {}x{}, expected {}x{}",
                    CUBEMAP_FACE_NAMES[index], face.width, face.height, width, height
                );
                return Err(Error::InvalidResource(format!(
                    "cubemap face '{}' is {}x{}, expected {}x{}",
                    CUBEMAP_FACE_NAMES[index], face.width, face.height, width, height
                )));
            }
        }

        let desc = sampled_texture_desc(width, height, 6, ResourceMiscFlags::TEXTURE_CUBE);
        let subresources: Vec<SubresourceData<'_>> = decoded
            .iter()
            .map(|face| SubresourceData { bytes: &face.rgba, row_pitch: width * 4 })
            .collect();

        let texture = device.create_texture_2d(&desc, &subresources)?;
        Self::with_view(device, stage, slot, texture, SrvDimension::TextureCube)
    }

    /// Wrap an externally created texture (no data copy)
    pub fn from_render_target(device: &dyn Device, stage: ShaderStage, slot: ShaderSlot, texture: Box<dyn Texture>) -> Result<Self> {
        Self::with_view(device, stage, slot, texture, SrvDimension::Texture2D)
    }

    fn with_view(
        device: &dyn Device,
        stage: ShaderStage,
        slot: ShaderSlot,
        texture: Box<dyn Texture>,
        dimension: SrvDimension,
    ) -> Result<Self> {
        let view = device.create_shader_resource_view(texture.as_ref(), dimension)?;
        Ok(Self { view, texture, binder: stage.binder(), slot: slot.0 })
    }

    /// Bind the view to the stage and slot chosen at creation
    pub fn activate(&self, context: &mut dyn CommandContext) {
        self.binder.bind_shader_resource(context, self.slot, self.view.as_ref());
    }

    /// Surface of the wrapped texture for a 2D overlay renderer
    ///
    /// Only render-target-backed resources have one.
    pub fn underlying_surface(&self) -> Result<Box<dyn OverlaySurface>> {
        self.texture.surface()
    }

    pub fn texture(&self) -> &dyn Texture {
        self.texture.as_ref()
    }

    pub fn dimension(&self) -> SrvDimension {
        self.view.dimension()
    }

    pub fn stage(&self) -> ShaderStage {
        self.binder.stage()
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }
}

/// Immutable RGBA8 shader-resource texture, one mip
fn sampled_texture_desc(width: u32, height: u32, array_size: u32, misc_flags: ResourceMiscFlags) -> TextureDesc {
    TextureDesc {
        width,
        height,
        mip_levels: 1,
        array_size,
        format: Format::R8G8B8A8_UNORM,
        sample: SampleDesc::SINGLE,
        usage: Usage::Immutable,
        bind_flags: BindFlags::SHADER_RESOURCE,
        cpu_access: CpuAccessFlags::empty(),
        misc_flags,
    }
}

/// Texture a 2D overlay renderer draws into and shaders sample from
///
/// Rebuilt on resize together with the render pass.
pub fn create_overlay_texture(device: &dyn Device, extent: Extent2D) -> Result<Box<dyn Texture>> {
    device.create_texture_2d(
        &TextureDesc {
            width: extent.width,
            height: extent.height,
            mip_levels: 1,
            array_size: 1,
            format: Format::R8G8B8A8_UNORM,
            sample: SampleDesc::SINGLE,
            usage: Usage::Default,
            bind_flags: BindFlags::RENDER_TARGET | BindFlags::SHADER_RESOURCE,
            cpu_access: CpuAccessFlags::empty(),
            misc_flags: ResourceMiscFlags::empty(),
        },
        &[],
    )
}

#[cfg(test)]
#[path = "shader_resource_tests.rs"]
mod tests;
