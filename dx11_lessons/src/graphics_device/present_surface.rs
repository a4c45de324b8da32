/// PresentSurface trait - the native back-buffer chain of one window

use bitflags::bitflags;
use crate::error::Result;
use super::device::AsAny;
use super::format::{Format, Rational, SampleDesc};
use super::texture::Texture;

/// Presentation model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapEffect {
    Discard,
    FlipSequential,
    FlipDiscard,
}

bitflags! {
    /// Swap-chain behaviour flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SwapChainFlags: u32 {
        /// Allow display-mode switches to match the chain
        const ALLOW_MODE_SWITCH = 0x2;
    }
}

bitflags! {
    /// Present call flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PresentFlags: u32 {
        /// Return immediately if the GPU is still busy
        const DO_NOT_WAIT = 0x8;
    }
}

/// Description of a swap chain and its buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapChainDesc {
    pub width: u32,
    pub height: u32,
    pub format: Format,
    pub refresh_rate: Rational,
    pub sample: SampleDesc,
    pub buffer_count: u32,
    pub swap_effect: SwapEffect,
    pub windowed: bool,
    pub flags: SwapChainFlags,
}

/// Outcome of a present call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    /// The back buffer was queued for display
    Presented,
    /// The GPU is still busy with an earlier frame; this frame was skipped
    StillDrawing,
}

/// Native swap chain bound to one window
pub trait PresentSurface: AsAny {
    /// Current buffer description
    fn desc(&self) -> &SwapChainDesc;

    /// Texture of back buffer `index`
    fn back_buffer(&self, index: u32) -> Result<Box<dyn Texture>>;

    /// Resize every buffer, keeping buffer count and format
    ///
    /// All views over the old buffers must have been dropped.
    fn resize_buffers(&mut self, width: u32, height: u32) -> Result<()>;

    fn present(&mut self, sync_interval: u32, flags: PresentFlags) -> Result<PresentOutcome>;
}
