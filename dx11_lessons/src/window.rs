/// Window collaborator - native handle and client-area size

use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use crate::error::{Error, Result};

/// Size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent2D {
    pub width: u32,
    pub height: u32,
}

impl Extent2D {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// width / height (1.0 for a degenerate extent)
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// A window the swap chain presents into
///
/// The owner of the window reacts to resize notifications by rebuilding the
/// render pass, projection buffers and overlay textures.
pub trait RenderWindow {
    /// Stable native handle of the window
    fn raw_window_handle(&self) -> Result<RawWindowHandle>;

    /// Current client-area size
    fn client_size(&self) -> Extent2D;
}

impl RenderWindow for winit::window::Window {
    fn raw_window_handle(&self) -> Result<RawWindowHandle> {
        self.window_handle()
            .map(|handle| handle.as_raw())
            .map_err(|e| Error::InitializationFailed(format!("window handle unavailable: {}", e)))
    }

    fn client_size(&self) -> Extent2D {
        let size = self.inner_size();
        Extent2D::new(size.width, size.height)
    }
}
