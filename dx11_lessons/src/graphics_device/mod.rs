/// Graphics device module - the native seam implemented by backends

// Module declarations
pub mod device;
pub mod format;
pub mod buffer;
pub mod texture;
pub mod state;
pub mod command_context;
pub mod present_surface;

// Re-export everything from device.rs
pub use device::*;

// Re-export from other modules
pub use format::*;
pub use buffer::*;
pub use texture::*;
pub use state::*;
pub use command_context::*;
pub use present_surface::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
