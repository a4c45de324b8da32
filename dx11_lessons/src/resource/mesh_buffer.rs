/// MeshBuffer - GPU vertex/index buffers with an optional instance stream

use std::mem::size_of;
use bytemuck::Pod;
use glam::Mat4;
use crate::error::{Error, Result};
use crate::graphics_device::{
    BindFlags, Buffer, BufferDesc, CommandContext, CpuAccessFlags, Device, Format, Usage,
};
use crate::resource::{InstancedMesh, Mesh};
use crate::dx_trace;

/// Bytes of one instance record (a 4x4 f32 matrix)
pub const INSTANCE_STRIDE: u32 = size_of::<Mat4>() as u32;

/// GPU copy of a mesh
///
/// Stream 0 holds the vertices. When built from an `InstancedMesh`, stream 1
/// holds one transform per instance and draws become instanced.
pub struct MeshBuffer {
    streams: Vec<Box<dyn Buffer>>,
    strides: Vec<u32>,
    offsets: Vec<u32>,
    index_buffer: Box<dyn Buffer>,
    index_count: u32,
    instance_count: u32,
}

impl MeshBuffer {
    /// Upload `mesh` as immutable vertex and index buffers
    pub fn from_mesh<V: Pod>(device: &dyn Device, mesh: &Mesh<V>) -> Result<Self> {
        if mesh.vertices.is_empty() || mesh.indices.is_empty() {
            return Err(Error::InvalidResource(format!(
                "mesh with {} vertices and {} indices",
                mesh.vertices.len(),
                mesh.indices.len()
            )));
        }

        let vertex_bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        let vertex_buffer = device.create_buffer(
            &BufferDesc {
                byte_width: vertex_bytes.len() as u32,
                usage: Usage::Immutable,
                bind_flags: BindFlags::VERTEX_BUFFER,
                cpu_access: CpuAccessFlags::empty(),
            },
            Some(vertex_bytes),
        )?;

        let index_bytes: &[u8] = bytemuck::cast_slice(&mesh.indices);
        let index_buffer = device.create_buffer(
            &BufferDesc {
                byte_width: index_bytes.len() as u32,
                usage: Usage::Immutable,
                bind_flags: BindFlags::INDEX_BUFFER,
                cpu_access: CpuAccessFlags::empty(),
            },
            Some(index_bytes),
        )?;

        Ok(Self {
            streams: vec![vertex_buffer],
            strides: vec![size_of::<V>() as u32],
            offsets: vec![0],
            index_buffer,
            index_count: mesh.indices.len() as u32,
            instance_count: 0,
        })
    }

    /// Upload `instanced` plus a CPU-writable instance stream
    ///
    /// The stream capacity is the transform count. With zero transforms the
    /// stream still exists (one record of storage) and draws zero instances.
    pub fn from_instanced_mesh<V: Pod>(device: &dyn Device, instanced: &InstancedMesh<V>) -> Result<Self> {
        let mut buffer = Self::from_mesh(device, &instanced.mesh)?;

        let instance_count = instanced.transforms.len() as u32;
        let instance_bytes: &[u8] = bytemuck::cast_slice(&instanced.transforms);
        let initial_data = if instance_bytes.is_empty() { None } else { Some(instance_bytes) };

        let instance_buffer = device.create_buffer(
            &BufferDesc {
                byte_width: instance_count.max(1) * INSTANCE_STRIDE,
                usage: Usage::Dynamic,
                bind_flags: BindFlags::VERTEX_BUFFER,
                cpu_access: CpuAccessFlags::WRITE,
            },
            initial_data,
        )?;

        buffer.streams.push(instance_buffer);
        buffer.strides.push(INSTANCE_STRIDE);
        buffer.offsets.push(0);
        buffer.instance_count = instance_count;
        Ok(buffer)
    }

    /// Overwrite the instance stream from offset 0
    ///
    /// # Panics
    ///
    /// Panics if this buffer has no instance stream or if `transforms` holds
    /// more records than the capacity fixed at construction.
    pub fn update_instances(&self, context: &mut dyn CommandContext, transforms: &[Mat4]) -> Result<()> {
        assert!(
            self.streams.len() == 2,
            "update_instances on a mesh buffer without an instance stream"
        );
        assert!(
            transforms.len() <= self.instance_count as usize,
            "instance update of {} transforms exceeds capacity {}",
            transforms.len(),
            self.instance_count
        );

        if transforms.is_empty() {
            return Ok(());
        }
        context.write_discard(self.streams[1].as_ref(), bytemuck::cast_slice(transforms))
    }

    /// Bind the vertex stream(s) at slot 0 and the 32-bit index buffer
    pub fn activate(&self, context: &mut dyn CommandContext) {
        let streams: Vec<&dyn Buffer> = self.streams.iter().map(|b| b.as_ref()).collect();
        context.set_vertex_buffers(0, &streams, &self.strides, &self.offsets);
        context.set_index_buffer(self.index_buffer.as_ref(), Format::R32_UINT, 0);
    }

    /// Indexed draw for one stream, indexed-instanced draw for two
    pub fn draw(&self, context: &mut dyn CommandContext) {
        if self.streams.len() == 1 {
            context.draw_indexed(self.index_count, 0, 0);
        } else {
            dx_trace!(
                "dx11::MeshBuffer",
                "Instanced draw: {} indices x {} instances",
                self.index_count, self.instance_count
            );
            context.draw_indexed_instanced(self.index_count, self.instance_count, 0, 0, 0);
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// 1 for plain meshes, 2 with an instance stream
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }
}

#[cfg(test)]
#[path = "mesh_buffer_tests.rs"]
mod tests;
