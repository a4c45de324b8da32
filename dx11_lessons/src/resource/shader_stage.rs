/// Shader stages, slots and the per-stage bind entry points

use crate::graphics_device::{Buffer, CommandContext, ShaderResourceView};

/// Programmable stage a resource is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

impl ShaderStage {
    /// Bind entry points of this stage
    pub(crate) fn binder(self) -> &'static dyn StageBinder {
        match self {
            ShaderStage::Vertex => &VertexStage,
            ShaderStage::Pixel => &PixelStage,
        }
    }
}

/// Register slot conventions shared by the lesson shaders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderSlot(pub u32);

impl ShaderSlot {
    pub const PROJECTION: ShaderSlot = ShaderSlot(0);
    pub const VIEW: ShaderSlot = ShaderSlot(1);
    pub const TRANSFORM: ShaderSlot = ShaderSlot(2);
    pub const TEXTURE: ShaderSlot = ShaderSlot(0);
    pub const LIGHT: ShaderSlot = ShaderSlot(0);
}

/// Stage-specific bind calls, selected once when a resource is created
pub(crate) trait StageBinder {
    fn stage(&self) -> ShaderStage;

    fn bind_constant_buffer(&self, context: &mut dyn CommandContext, slot: u32, buffer: &dyn Buffer);

    fn bind_shader_resource(
        &self,
        context: &mut dyn CommandContext,
        slot: u32,
        view: &dyn ShaderResourceView,
    );
}

struct VertexStage;

impl StageBinder for VertexStage {
    fn stage(&self) -> ShaderStage {
        ShaderStage::Vertex
    }

    fn bind_constant_buffer(&self, context: &mut dyn CommandContext, slot: u32, buffer: &dyn Buffer) {
        context.vs_set_constant_buffer(slot, buffer);
    }

    fn bind_shader_resource(&self, context: &mut dyn CommandContext, slot: u32, view: &dyn ShaderResourceView) {
        context.vs_set_shader_resource(slot, view);
    }
}

struct PixelStage;

impl StageBinder for PixelStage {
    fn stage(&self) -> ShaderStage {
        ShaderStage::Pixel
    }

    fn bind_constant_buffer(&self, context: &mut dyn CommandContext, slot: u32, buffer: &dyn Buffer) {
        context.ps_set_constant_buffer(slot, buffer);
    }

    fn bind_shader_resource(&self, context: &mut dyn CommandContext, slot: u32, view: &dyn ShaderResourceView) {
        context.ps_set_shader_resource(slot, view);
    }
}
