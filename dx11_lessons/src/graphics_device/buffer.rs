/// Buffer trait and buffer descriptor

use bitflags::bitflags;
use super::device::AsAny;

/// Resource usage (who reads and writes the memory)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    /// GPU read/write
    Default,
    /// GPU read only, content fixed at creation
    Immutable,
    /// GPU read, CPU write (map/discard)
    Dynamic,
}

bitflags! {
    /// Pipeline stages a resource can be bound to
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BindFlags: u32 {
        const VERTEX_BUFFER   = 0x1;
        const INDEX_BUFFER    = 0x2;
        const CONSTANT_BUFFER = 0x4;
        const SHADER_RESOURCE = 0x8;
        const RENDER_TARGET   = 0x20;
        const DEPTH_STENCIL   = 0x40;
    }
}

bitflags! {
    /// CPU access granted to a resource
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CpuAccessFlags: u32 {
        const WRITE = 0x10000;
        const READ  = 0x20000;
    }
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferDesc {
    /// Size in bytes
    pub byte_width: u32,
    pub usage: Usage,
    pub bind_flags: BindFlags,
    pub cpu_access: CpuAccessFlags,
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types (e.g., D3D11Buffer).
/// The buffer is released when dropped.
pub trait Buffer: AsAny {
    /// Descriptor the buffer was created with
    fn desc(&self) -> &BufferDesc;
}
