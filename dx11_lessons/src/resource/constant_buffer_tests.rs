use super::*;
use crate::graphics_device::mock_graphics_device::{mock_device, test_config, MockCommand};
use crate::resource::{LightBuffer, ProjectionBuffer, TransformBuffer, ViewBuffer};
use crate::window::Extent2D;
use glam::{Mat4, Vec3};

// ============================================================================
// Creation tests
// ============================================================================

#[test]
fn test_new_sizes_buffer_from_payload() {
    let (device, _context, recorder) = mock_device(&test_config());
    let payload = ProjectionBuffer::perspective(Extent2D::new(1280, 800), 60.0, 0.1, 100.0);
    let buffer = ConstantBuffer::new(device.as_ref(), ShaderStage::Vertex, ShaderSlot::PROJECTION, &payload).unwrap();

    assert_eq!(buffer.size(), 64);
    assert_eq!(buffer.stage(), ShaderStage::Vertex);
    assert_eq!(buffer.slot(), 0);

    let (desc, data) = recorder.last_buffer().unwrap();
    assert_eq!(desc.usage, Usage::Dynamic);
    assert_eq!(desc.bind_flags, BindFlags::CONSTANT_BUFFER);
    assert_eq!(desc.cpu_access, CpuAccessFlags::WRITE);
    assert_eq!(data.unwrap(), bytemuck::bytes_of(&payload).to_vec());
}

#[test]
fn test_empty_payload_fails() {
    let (device, _context, _recorder) = mock_device(&test_config());
    let result = ConstantBuffer::from_bytes(device.as_ref(), ShaderStage::Pixel, ShaderSlot(3), &[]);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

// ============================================================================
// Update tests
// ============================================================================

#[test]
fn test_update_rewrites_content() {
    let (device, mut context, recorder) = mock_device(&test_config());
    let buffer = ConstantBuffer::new(
        device.as_ref(),
        ShaderStage::Vertex,
        ShaderSlot::TRANSFORM,
        &TransformBuffer::from_matrix(Mat4::IDENTITY),
    )
    .unwrap();

    let moved = TransformBuffer::from_matrix(Mat4::from_rotation_y(0.5));
    buffer.update(context.as_mut(), &moved).unwrap();

    assert_eq!(recorder.writes(), vec![bytemuck::bytes_of(&moved).to_vec()]);
}

#[test]
fn test_smaller_update_is_allowed() {
    let (device, mut context, recorder) = mock_device(&test_config());
    let buffer = ConstantBuffer::from_bytes(device.as_ref(), ShaderStage::Pixel, ShaderSlot::LIGHT, &[0u8; 64]).unwrap();

    buffer.update_bytes(context.as_mut(), &[7u8; 16]).unwrap();
    assert_eq!(recorder.writes()[0].len(), 16);
}

#[test]
#[should_panic(expected = "exceeds allocated")]
fn test_update_overflow_panics() {
    let (device, mut context, _recorder) = mock_device(&test_config());
    let buffer = ConstantBuffer::new(
        device.as_ref(),
        ShaderStage::Vertex,
        ShaderSlot::TRANSFORM,
        &TransformBuffer::from_matrix(Mat4::IDENTITY),
    )
    .unwrap();

    let view = ViewBuffer::new(Mat4::IDENTITY, Vec3::ZERO);
    let _ = buffer.update(context.as_mut(), &view);
}

#[test]
#[should_panic(expected = "exceeds allocated")]
fn test_update_bytes_overflow_panics() {
    let (device, mut context, _recorder) = mock_device(&test_config());
    let buffer = ConstantBuffer::from_bytes(device.as_ref(), ShaderStage::Pixel, ShaderSlot(1), &[0u8; 16]).unwrap();
    let _ = buffer.update_bytes(context.as_mut(), &[0u8; 32]);
}

// ============================================================================
// Stage dispatch tests
// ============================================================================

#[test]
fn test_vertex_stage_binding() {
    let (device, mut context, recorder) = mock_device(&test_config());
    let buffer = ConstantBuffer::from_bytes(device.as_ref(), ShaderStage::Vertex, ShaderSlot::VIEW, &[0u8; 80]).unwrap();

    buffer.activate(context.as_mut());

    let commands = recorder.commands();
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], MockCommand::VsSetConstantBuffer { slot: 1, .. }));
}

#[test]
fn test_pixel_stage_binding() {
    let (device, mut context, recorder) = mock_device(&test_config());
    let light = LightBuffer::default();
    let buffer = ConstantBuffer::new(device.as_ref(), ShaderStage::Pixel, ShaderSlot::LIGHT, &light).unwrap();

    buffer.activate(context.as_mut());

    let commands = recorder.commands();
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], MockCommand::PsSetConstantBuffer { slot: 0, .. }));
}
