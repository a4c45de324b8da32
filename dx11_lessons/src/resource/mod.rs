/// Resource module - GPU resources and pipeline state used by the lessons

// Module declarations
pub mod graphics_device;
pub mod swap_chain;
pub mod render_pass;
pub mod pipeline_state;
pub mod shader_stage;
pub mod gpu_types;
pub mod mesh_buffer;
pub mod constant_buffer;
pub mod shader_resource;
pub mod geometry;

// Re-export everything
pub use graphics_device::*;
pub use swap_chain::*;
pub use render_pass::*;
pub use pipeline_state::*;
pub use shader_stage::*;
pub use gpu_types::*;
pub use mesh_buffer::*;
pub use constant_buffer::*;
pub use shader_resource::*;
pub use geometry::*;
