use glam::{Mat4, Vec3};

use crate::math::AABB;
use crate::types::Vertex;

/// Indexed triangle list in model space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Option<AABB> {
        AABB::from_points(self.vertices.iter().map(|v| Vec3::from_array(v.position)))
    }

    /// Append another mesh, re-basing its indices
    pub fn extend(&mut self, other: Mesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices.extend(other.indices.into_iter().map(|i| i + base));
    }

    /// Bake a transform into positions and normals
    pub fn transformed(mut self, transform: Mat4) -> Self {
        let normal_matrix = transform.inverse().transpose();
        for v in &mut self.vertices {
            v.position = transform.transform_point3(Vec3::from_array(v.position)).to_array();
            v.normal = normal_matrix
                .transform_vector3(Vec3::from_array(v.normal))
                .normalize_or_zero()
                .to_array();
        }
        self
    }

    /// Mark every vertex as sampling the court texture
    pub fn textured(mut self) -> Self {
        for v in &mut self.vertices {
            v.textured = 1.0;
        }
        self
    }
}

/// Axis-aligned box with flat-shaded faces
pub fn cuboid(center: Vec3, half: Vec3, tint: [f32; 3]) -> Mesh {
    // (normal, u axis, v axis) per face, u x v = normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut mesh = Mesh::new();
    for (normal, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        let face_center = center + normal * half;
        let du = u * half;
        let dv = v * half;
        let corners = [
            (face_center - du - dv, [0.0, 1.0]),
            (face_center + du - dv, [1.0, 1.0]),
            (face_center + du + dv, [1.0, 0.0]),
            (face_center - du + dv, [0.0, 0.0]),
        ];
        for (position, uv) in corners {
            mesh.vertices
                .push(Vertex::new(position.to_array(), normal.to_array(), uv, tint));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Horizontal rectangle facing +Y, UVs spanning [0, 1]
pub fn ground_quad(center: Vec3, width: f32, depth: f32, tint: [f32; 3]) -> Mesh {
    let hw = width * 0.5;
    let hd = depth * 0.5;
    let normal = Vec3::Y.to_array();
    let corner = |dx: f32, dz: f32| (center + Vec3::new(dx, 0.0, dz)).to_array();

    Mesh {
        vertices: vec![
            Vertex::new(corner(-hw, hd), normal, [0.0, 1.0], tint),
            Vertex::new(corner(hw, hd), normal, [1.0, 1.0], tint),
            Vertex::new(corner(hw, -hd), normal, [1.0, 0.0], tint),
            Vertex::new(corner(-hw, -hd), normal, [0.0, 0.0], tint),
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_six_faces() {
        let mesh = cuboid(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), [1.0; 3]);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn cuboid_winding_is_counter_clockwise_outward() {
        let mesh = cuboid(Vec3::ZERO, Vec3::ONE, [1.0; 3]);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
            let face_normal = (b - a).cross(c - a).normalize();
            let stored = Vec3::from_array(mesh.vertices[tri[0] as usize].normal);
            assert!(face_normal.dot(stored) > 0.99);
        }
    }

    #[test]
    fn extend_rebases_indices() {
        let mut mesh = ground_quad(Vec3::ZERO, 2.0, 2.0, [1.0; 3]);
        mesh.extend(ground_quad(Vec3::Y, 2.0, 2.0, [1.0; 3]));
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn ground_quad_faces_up() {
        let mesh = ground_quad(Vec3::new(0.0, -20.0, 0.0), 400.0, 200.0, [1.0; 3]);
        let [a, b, c] = [0, 1, 2].map(|i| Vec3::from_array(mesh.vertices[i].position));
        assert!((b - a).cross(c - a).y > 0.0);
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-200.0, -20.0, -100.0));
    }
}
