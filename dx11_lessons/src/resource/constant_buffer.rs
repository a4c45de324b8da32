/// ConstantBuffer - small CPU-written uniform block bound to one stage and slot

use bytemuck::Pod;
use crate::error::{Error, Result};
use crate::graphics_device::{BindFlags, Buffer, BufferDesc, CommandContext, CpuAccessFlags, Device, Usage};
use crate::resource::shader_stage::{ShaderSlot, ShaderStage, StageBinder};

/// Uniform block with a capacity fixed at creation
pub struct ConstantBuffer {
    buffer: Box<dyn Buffer>,
    binder: &'static dyn StageBinder,
    slot: u32,
    size: usize,
}

impl ConstantBuffer {
    /// Create a buffer sized and filled from `payload`
    pub fn new<T: Pod>(device: &dyn Device, stage: ShaderStage, slot: ShaderSlot, payload: &T) -> Result<Self> {
        Self::from_bytes(device, stage, slot, bytemuck::bytes_of(payload))
    }

    /// Create a buffer of exactly `initial_data.len()` bytes
    pub fn from_bytes(device: &dyn Device, stage: ShaderStage, slot: ShaderSlot, initial_data: &[u8]) -> Result<Self> {
        if initial_data.is_empty() {
            return Err(Error::InvalidResource("empty constant buffer".to_string()));
        }

        let buffer = device.create_buffer(
            &BufferDesc {
                byte_width: initial_data.len() as u32,
                usage: Usage::Dynamic,
                bind_flags: BindFlags::CONSTANT_BUFFER,
                cpu_access: CpuAccessFlags::WRITE,
            },
            Some(initial_data),
        )?;

        Ok(Self {
            buffer,
            binder: stage.binder(),
            slot: slot.0,
            size: initial_data.len(),
        })
    }

    /// Rewrite the buffer with `payload`
    ///
    /// # Panics
    ///
    /// Panics if `payload` is larger than the allocated size.
    pub fn update<T: Pod>(&self, context: &mut dyn CommandContext, payload: &T) -> Result<()> {
        self.update_bytes(context, bytemuck::bytes_of(payload))
    }

    /// Rewrite the buffer from offset 0 (discarding the old content)
    ///
    /// # Panics
    ///
    /// Panics if `data` is larger than the allocated size.
    pub fn update_bytes(&self, context: &mut dyn CommandContext, data: &[u8]) -> Result<()> {
        assert!(
            data.len() <= self.size,
            "constant buffer update of {} bytes exceeds allocated {} bytes",
            data.len(),
            self.size
        );
        context.write_discard(self.buffer.as_ref(), data)
    }

    /// Bind to the stage and slot chosen at creation
    pub fn activate(&self, context: &mut dyn CommandContext) {
        self.binder.bind_constant_buffer(context, self.slot, self.buffer.as_ref());
    }

    pub fn stage(&self) -> ShaderStage {
        self.binder.stage()
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Allocated size in bytes
    pub fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
#[path = "constant_buffer_tests.rs"]
mod tests;
