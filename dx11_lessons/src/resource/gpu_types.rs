/// CPU-side vertex/mesh value types and constant-buffer payload layouts
///
/// Payloads are `#[repr(C)]` + `Pod` so they upload byte for byte. Matrices
/// are stored transposed to match the lesson shaders' register layout.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::window::Extent2D;

// ===== VERTICES =====

/// Position, normal, texcoord (the lessons' canonical vertex)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub texcoord: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, texcoord: Vec2) -> Self {
        Self { position, normal, texcoord }
    }
}

/// Position, texcoord
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: Vec3,
    pub texcoord: Vec2,
}

/// Position, RGBA color
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct ColoredVertex {
    pub position: Vec3,
    pub color: [f32; 4],
}

// ===== MESHES =====

/// Vertices plus a triangle-list index sequence
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh<V = Vertex> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

impl<V> Mesh<V> {
    pub fn new(vertices: Vec<V>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A mesh drawn once per instance transform
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstancedMesh<V = Vertex> {
    pub mesh: Mesh<V>,
    pub transforms: Vec<Mat4>,
}

impl<V> InstancedMesh<V> {
    pub fn new(mesh: Mesh<V>, transforms: Vec<Mat4>) -> Self {
        Self { mesh, transforms }
    }
}

// ===== CONSTANT BUFFER PAYLOADS =====

/// Reference horizontal field of view of the lessons (degrees)
pub const DEFAULT_FOV_DEGREES: f32 = 60.0;
pub const DEFAULT_NEAR_PLANE: f32 = 0.1;
pub const DEFAULT_FAR_PLANE: f32 = 100.0;

/// Projection matrix (64 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ProjectionBuffer {
    pub matrix: Mat4,
}

impl ProjectionBuffer {
    pub fn from_matrix(projection: Mat4) -> Self {
        Self { matrix: projection.transpose() }
    }

    /// Left-handed perspective from a horizontal field of view
    ///
    /// vertical fov = 2 * atan(tan(hfov / 2) * aspect), aspect = w / h
    pub fn perspective(extent: Extent2D, horizontal_fov_degrees: f32, near: f32, far: f32) -> Self {
        let aspect = extent.aspect_ratio();
        let half = horizontal_fov_degrees.to_radians() / 2.0;
        let vertical_fov = 2.0 * (half.tan() * aspect).atan();
        Self::from_matrix(Mat4::perspective_lh(vertical_fov, aspect, near, far))
    }

    /// Left-handed orthographic projection (screen-space overlays), depth -1..1
    pub fn orthographic(extent: Extent2D) -> Self {
        let half_width = extent.width as f32 / 2.0;
        let half_height = extent.height as f32 / 2.0;
        Self::from_matrix(Mat4::orthographic_lh(
            -half_width,
            half_width,
            -half_height,
            half_height,
            -1.0,
            1.0,
        ))
    }

    /// The matrix as used on the CPU (undoes the upload transpose)
    pub fn projection(&self) -> Mat4 {
        self.matrix.transpose()
    }
}

/// World transform of one object (64 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TransformBuffer {
    pub matrix: Mat4,
}

impl TransformBuffer {
    pub fn from_matrix(transform: Mat4) -> Self {
        Self { matrix: transform.transpose() }
    }
}

/// View matrix and world-space eye position (80 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ViewBuffer {
    pub matrix: Mat4,
    pub eye_position: Vec4,
}

impl ViewBuffer {
    pub fn new(view: Mat4, eye_position: Vec3) -> Self {
        Self {
            matrix: view.transpose(),
            eye_position: eye_position.extend(1.0),
        }
    }
}

/// Point light parameters (64 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightBuffer {
    pub diffuse: Vec4,
    pub ambient: Vec4,
    pub light_position: Vec3,
    pub specular_power: f32,
    pub specular: Vec4,
}

impl Default for LightBuffer {
    fn default() -> Self {
        Self {
            diffuse: Vec4::ONE,
            ambient: Vec4::new(0.1, 0.1, 0.1, 1.0),
            light_position: Vec3::new(0.0, 10.0, -10.0),
            specular_power: 32.0,
            specular: Vec4::ONE,
        }
    }
}

#[cfg(test)]
#[path = "gpu_types_tests.rs"]
mod tests;
