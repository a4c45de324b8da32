use super::*;
use std::io::Cursor;
use crate::graphics_device::mock_graphics_device::{mock_device, test_config, MockCommand, MockCreated};

// ============================================================================
// Helpers
// ============================================================================

fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba(color));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .unwrap();
    bytes
}

fn six_faces(size: u32) -> Vec<Vec<u8>> {
    (0..6u8).map(|i| png_bytes(size, size, [i * 40, 0, 0, 255])).collect()
}

fn as_face_array(faces: &[Vec<u8>]) -> [&[u8]; 6] {
    [&faces[0], &faces[1], &faces[2], &faces[3], &faces[4], &faces[5]]
}

// ============================================================================
// Encoded image tests
// ============================================================================

#[test]
fn test_encoded_image_uploads_rgba8() {
    let (device, _context, recorder) = mock_device(&test_config());
    let bytes = png_bytes(4, 2, [10, 20, 30, 255]);
    let resource = ShaderResource::from_encoded_image(device.as_ref(), ShaderStage::Pixel, ShaderSlot::TEXTURE, &bytes).unwrap();

    assert_eq!(resource.dimension(), SrvDimension::Texture2D);
    let (desc, subresources) = recorder.last_texture().unwrap();
    assert_eq!((desc.width, desc.height), (4, 2));
    assert_eq!(desc.format, Format::R8G8B8A8_UNORM);
    assert_eq!(desc.usage, Usage::Immutable);
    assert_eq!(desc.bind_flags, BindFlags::SHADER_RESOURCE);
    assert_eq!(subresources.len(), 1);
    assert_eq!(subresources[0].len(), 4 * 2 * 4);
    assert_eq!(&subresources[0][0..4], &[10, 20, 30, 255]);
}

#[test]
fn test_undecodable_image_fails() {
    let (device, _context, _recorder) = mock_device(&test_config());
    let result = ShaderResource::from_encoded_image(device.as_ref(), ShaderStage::Pixel, ShaderSlot::TEXTURE, b"not an image");
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

// ============================================================================
// Cubemap tests
// ============================================================================

#[test]
fn test_six_equal_faces_build_cubemap() {
    let (device, _context, recorder) = mock_device(&test_config());
    let faces = six_faces(256);
    let resource = ShaderResource::from_cubemap_faces(device.as_ref(), ShaderStage::Pixel, ShaderSlot::TEXTURE, as_face_array(&faces)).unwrap();

    assert_eq!(resource.dimension(), SrvDimension::TextureCube);
    let (desc, subresources) = recorder.last_texture().unwrap();
    assert_eq!((desc.width, desc.height), (256, 256));
    assert_eq!(desc.array_size, 6);
    assert!(desc.misc_flags.contains(ResourceMiscFlags::TEXTURE_CUBE));
    assert_eq!(subresources.len(), 6);

    // Face i lands in array slice i
    for (i, slice) in subresources.iter().enumerate() {
        assert_eq!(slice[0], i as u8 * 40);
    }
}

#[test]
fn test_mismatched_face_is_rejected() {
    let (device, _context, recorder) = mock_device(&test_config());
    let mut faces = six_faces(256);
    faces[3] = png_bytes(128, 128, [0, 0, 0, 255]);

    let result = ShaderResource::from_cubemap_faces(device.as_ref(), ShaderStage::Pixel, ShaderSlot::TEXTURE, as_face_array(&faces));

    match result {
        Err(Error::InvalidResource(message)) => assert!(message.contains(CUBEMAP_FACE_NAMES[3])),
        _ => panic!("expected an invalid-resource error"),
    }
    assert!(recorder.last_texture().is_none());
}

// ============================================================================
// Render target tests
// ============================================================================

#[test]
fn test_render_target_exposes_surface() {
    let (device, _context, _recorder) = mock_device(&test_config());
    let texture = create_overlay_texture(device.as_ref(), Extent2D::new(1280, 800)).unwrap();
    let resource = ShaderResource::from_render_target(device.as_ref(), ShaderStage::Pixel, ShaderSlot::TEXTURE, texture).unwrap();

    let surface = resource.underlying_surface().unwrap();
    assert_eq!(surface.extent(), Extent2D::new(1280, 800));
    assert!(resource.texture().desc().bind_flags.contains(BindFlags::RENDER_TARGET | BindFlags::SHADER_RESOURCE));
}

#[test]
fn test_sampled_texture_has_no_surface() {
    let (device, _context, _recorder) = mock_device(&test_config());
    let bytes = png_bytes(2, 2, [0, 0, 0, 255]);
    let resource = ShaderResource::from_encoded_image(device.as_ref(), ShaderStage::Pixel, ShaderSlot::TEXTURE, &bytes).unwrap();
    assert!(resource.underlying_surface().is_err());
}

#[test]
fn test_render_target_without_shader_binding_fails() {
    let (device, _context, _recorder) = mock_device(&test_config());
    let texture = device
        .create_texture_2d(
            &TextureDesc {
                bind_flags: BindFlags::RENDER_TARGET,
                usage: Usage::Default,
                ..sampled_texture_desc(8, 8, 1, ResourceMiscFlags::empty())
            },
            &[],
        )
        .unwrap();
    let result = ShaderResource::from_render_target(device.as_ref(), ShaderStage::Pixel, ShaderSlot::TEXTURE, texture);
    assert!(result.is_err());
}

// ============================================================================
// Stage dispatch tests
// ============================================================================

#[test]
fn test_activate_binds_chosen_stage() {
    let (device, mut context, recorder) = mock_device(&test_config());
    let bytes = png_bytes(2, 2, [0, 0, 0, 255]);

    let pixel = ShaderResource::from_encoded_image(device.as_ref(), ShaderStage::Pixel, ShaderSlot(2), &bytes).unwrap();
    let vertex = ShaderResource::from_encoded_image(device.as_ref(), ShaderStage::Vertex, ShaderSlot(1), &bytes).unwrap();
    assert_eq!(pixel.stage(), ShaderStage::Pixel);
    assert_eq!(vertex.slot(), 1);

    pixel.activate(context.as_mut());
    vertex.activate(context.as_mut());

    let commands = recorder.commands();
    assert!(matches!(commands[0], MockCommand::PsSetShaderResource { slot: 2, .. }));
    assert!(matches!(commands[1], MockCommand::VsSetShaderResource { slot: 1, .. }));
}

#[test]
fn test_view_references_its_texture() {
    let (device, _context, recorder) = mock_device(&test_config());
    let bytes = png_bytes(2, 2, [0, 0, 0, 255]);
    let _resource = ShaderResource::from_encoded_image(device.as_ref(), ShaderStage::Pixel, ShaderSlot::TEXTURE, &bytes).unwrap();

    let created = recorder.created();
    let texture_id = created.iter().find_map(|c| match c {
        MockCreated::Texture { id, .. } => Some(*id),
        _ => None,
    });
    let view_texture = created.iter().find_map(|c| match c {
        MockCreated::ShaderResourceView { texture, .. } => Some(*texture),
        _ => None,
    });
    assert!(texture_id.is_some());
    assert_eq!(texture_id, view_texture);
}
