/// Procedural geometry - box, screen quad, sky dome and instance grids
///
/// Pure CPU-side data builders; the results are uploaded through MeshBuffer.

use glam::{Mat4, Vec2, Vec3};
use crate::resource::{Mesh, Vertex};

// ===== FACE TABLE =====

/// One cube face: outward normal and corner signs in winding order
struct Face {
    normal: [f32; 3],
    corners: [[f32; 3]; 4],
}

/// Faces of the unit cube (corners at +-1), wound 0,1,2 / 0,2,3
const CUBE_FACES: [Face; 6] = [
    // Front
    Face {
        normal: [0.0, 0.0, 1.0],
        corners: [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
    },
    // Bottom
    Face {
        normal: [0.0, -1.0, 0.0],
        corners: [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
    },
    // Right
    Face {
        normal: [1.0, 0.0, 0.0],
        corners: [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
    },
    // Left
    Face {
        normal: [-1.0, 0.0, 0.0],
        corners: [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
    },
    // Back
    Face {
        normal: [0.0, 0.0, -1.0],
        corners: [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]],
    },
    // Top
    Face {
        normal: [0.0, 1.0, 0.0],
        corners: [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]],
    },
];

const CORNER_TEXCOORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

// ===== BUILDERS =====

/// Axis-aligned box centered on the origin (24 vertices, 36 indices)
pub fn make_box(width: f32, height: f32, depth: f32) -> Mesh {
    let half = Vec3::new(width, height, depth) / 2.0;
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for face in &CUBE_FACES {
        let base = vertices.len() as u32;
        for (corner, uv) in face.corners.iter().zip(CORNER_TEXCOORDS) {
            vertices.push(Vertex::new(
                Vec3::from(*corner) * half,
                Vec3::from(face.normal),
                Vec2::from(uv),
            ));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(vertices, indices)
}

/// Screen-space quad on z = 0 facing +Z
pub fn make_screen_quad(width: f32, height: f32) -> Mesh {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let normal = Vec3::Z;
    let vertices = vec![
        Vertex::new(Vec3::new(-hw, -hh, 0.0), normal, Vec2::new(0.0, 0.0)),
        Vertex::new(Vec3::new(hw, -hh, 0.0), normal, Vec2::new(1.0, 0.0)),
        Vertex::new(Vec3::new(hw, hh, 0.0), normal, Vec2::new(1.0, 1.0)),
        Vertex::new(Vec3::new(-hw, hh, 0.0), normal, Vec2::new(0.0, 1.0)),
    ];
    Mesh::new(vertices, vec![0, 1, 2, 0, 2, 3])
}

/// Unit cube with 4 triangles per face fanned around the face center
///
/// 30 vertices, 24 triangles, outward face normals.
pub fn make_cube_base() -> Mesh {
    let mut vertices = Vec::with_capacity(30);
    let mut indices = Vec::with_capacity(72);

    for face in &CUBE_FACES {
        let normal = Vec3::from(face.normal);
        let center = vertices.len() as u32;
        vertices.push(Vertex::new(normal, normal, Vec2::new(0.5, 0.5)));
        for (corner, uv) in face.corners.iter().zip(CORNER_TEXCOORDS) {
            vertices.push(Vertex::new(Vec3::from(*corner), normal, Vec2::from(uv)));
        }
        for i in 0..4 {
            let current = center + 1 + i;
            let next = center + 1 + (i + 1) % 4;
            indices.extend_from_slice(&[center, current, next]);
        }
    }

    Mesh::new(vertices, indices)
}

/// Midpoint of two vertices, keeping the first vertex's normal
fn midpoint(a: &Vertex, b: &Vertex) -> Vertex {
    Vertex::new((a.position + b.position) / 2.0, a.normal, (a.texcoord + b.texcoord) / 2.0)
}

/// Split every triangle into 4, `levels` times, then push all positions onto
/// the unit sphere and flip every normal inward
///
/// Triangle (v0, v1, v2) becomes [v0, m01, v1, m12, v2, m20] with triangles
/// (0,1,5) (1,2,3) (3,4,5) (1,3,5).
pub fn spherify_and_invert(mesh: &Mesh, levels: u32) -> Mesh {
    let mut current = mesh.clone();

    for _ in 0..levels {
        let mut vertices = Vec::with_capacity(current.indices.len() * 2);
        let mut indices = Vec::with_capacity(current.indices.len() * 4);

        for (i, triangle) in current.indices.chunks_exact(3).enumerate() {
            let v0 = current.vertices[triangle[0] as usize];
            let v1 = current.vertices[triangle[1] as usize];
            let v2 = current.vertices[triangle[2] as usize];

            vertices.extend_from_slice(&[
                v0,
                midpoint(&v0, &v1),
                v1,
                midpoint(&v1, &v2),
                v2,
                midpoint(&v2, &v0),
            ]);

            let base = (i * 6) as u32;
            for local in [0, 1, 5, 1, 2, 3, 3, 4, 5, 1, 3, 5] {
                indices.push(base + local);
            }
        }

        current = Mesh::new(vertices, indices);
    }

    for vertex in &mut current.vertices {
        vertex.position = vertex.position.normalize();
        vertex.normal = -vertex.normal;
    }

    current
}

/// Inverted, tessellated sphere seen from inside (24 * 4^levels triangles)
pub fn make_sky_dome(levels: u32) -> Mesh {
    spherify_and_invert(&make_cube_base(), levels)
}

/// Translations laid out on the XZ plane, `columns` per row
pub fn make_instance_grid(count: usize, columns: usize, spacing: f32, origin: Vec3) -> Vec<Mat4> {
    let columns = columns.max(1);
    (0..count)
        .map(|i| {
            let x = origin.x + spacing * (i % columns) as f32;
            let z = origin.z + spacing * (i / columns) as f32;
            Mat4::from_translation(Vec3::new(x, origin.y, z))
        })
        .collect()
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
