/*!
# DX11 Lessons

Core GPU resource and pipeline-state layer shared by the Direct3D 11 lessons.

This crate turns an immediate-mode GPU command interface into a small set of
value-typed abstractions with explicit activation/update contracts. The native
API sits behind trait objects (like a C++ virtual interface); the Direct3D 11
implementation lives in `dx11_lessons_renderer_d3d11`.

## Architecture

- **Device**: factory trait for native GPU objects
- **CommandContext**: the single immediate command stream
- **GraphicsDevice**: device + context + capability queries
- **SwapChain / RenderPass**: back buffers and the output targets derived from them
- **PipelineState**: fixed-function state bundle compiled from closed style enums
- **MeshBuffer / ConstantBuffer / ShaderResource**: GPU buffers bound to the pipeline
- **geometry**: procedural meshes (box, screen quad, sky dome)

Lesson glue (camera, clock, FPS counter, background file loading) is provided
next to the core so every lesson drives the same collaborators.
*/

// Internal modules
mod error;
mod config;
pub mod log;
pub mod graphics_device;
pub mod resource;
pub mod camera;
pub mod window;
pub mod clock;
pub mod telemetry;
pub mod loader;

// Main dx11 namespace module
pub mod dx11 {
    // Error types
    pub use crate::error::{Error, Result};

    // Configuration
    pub use crate::config::DeviceConfig;

    // Global logger entry points
    pub use crate::log::Log;

    // Window collaborator
    pub use crate::window::{RenderWindow, Extent2D};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Native seam implemented by backends
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // GPU resources and pipeline state
    pub mod render {
        pub use crate::resource::*;
    }

    // Lesson collaborators
    pub mod camera {
        pub use crate::camera::*;
    }
    pub mod clock {
        pub use crate::clock::*;
    }
    pub mod telemetry {
        pub use crate::telemetry::*;
    }
    pub mod loader {
        pub use crate::loader::*;
    }
}

// Re-export math library at crate root
pub use glam;
