/// GraphicsDevice - device, immediate context and display-capability queries

use std::rc::Rc;
use crate::config::DeviceConfig;
use crate::error::Result;
use crate::graphics_device::{CommandContext, Device, Format, Rational, SampleDesc};
use crate::window::Extent2D;
use crate::dx_debug;

/// Logical GPU device plus its single immediate command context
///
/// Created once per process (by a backend, e.g.
/// `dx11_lessons_renderer_d3d11::create_graphics_device`) and destroyed last.
pub struct GraphicsDevice {
    device: Rc<dyn Device>,
    context: Box<dyn CommandContext>,
    config: DeviceConfig,
}

impl GraphicsDevice {
    /// Assemble a graphics device from a backend device/context pair
    pub fn new(device: Rc<dyn Device>, context: Box<dyn CommandContext>, config: DeviceConfig) -> Self {
        Self { device, context, config }
    }

    pub fn device(&self) -> &dyn Device {
        self.device.as_ref()
    }

    /// Shared handle to the device (for long-lived owners)
    pub fn shared_device(&self) -> Rc<dyn Device> {
        self.device.clone()
    }

    /// The immediate command context
    pub fn context(&mut self) -> &mut dyn CommandContext {
        self.context.as_mut()
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Highest supported multisample descriptor for `format`
    ///
    /// Probes sample counts from the configured target down to 2 (halving).
    /// Returns {1, 0} under the debug layer or when nothing is supported.
    pub fn query_supported_sample_count(&self, format: Format) -> Result<SampleDesc> {
        if self.device.debug_layer_enabled() {
            dx_debug!("dx11::GraphicsDevice", "Debug layer active, MSAA disabled");
            return Ok(SampleDesc::SINGLE);
        }

        let mut count = self.config.msaa_target_samples;
        while count >= 2 {
            let levels = self.device.check_multisample_quality_levels(format, count)?;
            if levels > 0 {
                dx_debug!("dx11::GraphicsDevice", "Using {}x MSAA ({} quality levels)", count, levels);
                return Ok(SampleDesc { count, quality: levels - 1 });
            }
            count /= 2;
        }

        dx_debug!("dx11::GraphicsDevice", "No MSAA support for {:?}", format);
        Ok(SampleDesc::SINGLE)
    }

    /// Refresh rate of the display mode matching `window_size` exactly
    ///
    /// Returns the unspecified rate {0, 1} when `vsync` is off or nothing
    /// matches. When several modes match, the last one enumerated wins.
    pub fn query_refresh_rate(&self, window_size: Extent2D, vsync: bool) -> Result<Rational> {
        if !vsync {
            return Ok(Rational::UNSPECIFIED);
        }

        let modes = self.device.display_modes(self.config.back_buffer_format)?;
        let rate = modes
            .iter()
            .rev()
            .find(|m| m.width == window_size.width && m.height == window_size.height)
            .map(|m| m.refresh_rate)
            .unwrap_or(Rational::UNSPECIFIED);

        dx_debug!(
            "dx11::GraphicsDevice",
            "Refresh rate for {}x{}: {}/{}",
            window_size.width, window_size.height, rate.numerator, rate.denominator
        );
        Ok(rate)
    }
}

#[cfg(test)]
#[path = "graphics_device_tests.rs"]
mod tests;
