/// Camera - first-person position + orientation
///
/// Left-handed: +X right, +Y up, +Z forward. The orientation rotates world
/// space into view space.

use glam::{Mat4, Quat, Vec3};
use crate::resource::ViewBuffer;

/// First-person camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    orientation: Quat,
}

impl Camera {
    /// Camera at `eye` looking at `target`
    pub fn new(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut camera = Self { position: eye, orientation: Quat::IDENTITY };
        camera.look_at(eye, target, up);
        camera
    }

    /// Move to `eye` and face `target`
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.position = eye;
        self.orientation = Quat::from_mat4(&Mat4::look_at_lh(eye, target, up)).normalize();
    }

    /// Move along the camera's own axes: forward, right, up
    pub fn translate(&mut self, dolly: f32, pan: f32, crane: f32) {
        self.position += self.forward() * dolly + self.right() * pan + self.up() * crane;
    }

    /// Pitch about the camera's right axis, yaw about world up, roll about
    /// the camera's forward axis (radians)
    pub fn rotate(&mut self, roll: f32, pitch: f32, yaw: f32) {
        let forward = self.forward();
        let right = self.right();

        let pitch = Quat::from_axis_angle(right, pitch);
        let yaw = Quat::from_axis_angle(Vec3::Y, yaw);
        let roll = Quat::from_axis_angle(forward, roll);

        self.orientation = (self.orientation * pitch * yaw * roll).normalize();
    }

    // ===== AXES =====

    /// World-space forward direction
    pub fn forward(&self) -> Vec3 {
        self.to_world(Vec3::Z)
    }

    /// World-space right direction
    pub fn right(&self) -> Vec3 {
        self.to_world(Vec3::X)
    }

    /// World-space up direction
    pub fn up(&self) -> Vec3 {
        self.to_world(Vec3::Y)
    }

    fn to_world(&self, axis: Vec3) -> Vec3 {
        (self.orientation.conjugate() * axis).normalize()
    }

    // ===== OUTPUT =====

    /// World-to-view transform (translate by -position, then rotate)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation) * Mat4::from_translation(-self.position)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Constant-buffer payload for the view slot
    pub fn view_buffer(&self) -> ViewBuffer {
        ViewBuffer::new(self.view_matrix(), self.position)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
