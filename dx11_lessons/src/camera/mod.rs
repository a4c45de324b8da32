//! Camera module - first-person camera driven by the lesson's input handling.
//!
//! The camera only owns a position and an orientation; the caller maps input
//! to `translate`/`rotate` and uploads `view_buffer()` once per frame.

mod camera;

pub use camera::Camera;
