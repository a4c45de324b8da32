/// Device and swap-chain configuration

use crate::graphics_device::Format;

/// Configuration for device and swap-chain creation
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Request the Direct3D debug layer (also disables MSAA probing)
    pub enable_debug_layer: bool,
    /// Application name (window title, log lines)
    pub app_name: String,
    /// Present on the vertical blank and match the display refresh rate
    pub vsync: bool,
    /// Highest multisample count probed
    pub msaa_target_samples: u32,
    /// Number of buffers in the flip-model swap chain
    pub swap_chain_buffer_count: u32,
    /// Back-buffer pixel format
    pub back_buffer_format: Format,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            enable_debug_layer: cfg!(debug_assertions),
            app_name: "dx11 lesson".to_string(),
            vsync: true,
            msaa_target_samples: 4,
            swap_chain_buffer_count: 3,
            back_buffer_format: Format::R8G8B8A8_UNORM,
        }
    }
}
