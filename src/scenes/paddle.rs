use glam::Vec3;

use crate::mesh::{cuboid, Mesh};

/// Rubber face color, linear
const BLADE_RED: [f32; 3] = [0.62, 0.03, 0.03];
const BLADE_BLACK: [f32; 3] = [0.02, 0.02, 0.02];
const WOOD: [f32; 3] = [0.52, 0.30, 0.12];

/// Table tennis paddle built from boxes, about 0.27 units tall
///
/// Stands in for the model asset when it cannot be loaded. The blade lies in
/// the XY plane with the handle pointing down -Y.
pub fn procedural_paddle() -> Mesh {
    let mut mesh = Mesh::new();

    // Wooden core with a rubber sheet on each side
    mesh.extend(cuboid(Vec3::new(0.0, 0.05, 0.0), Vec3::new(0.075, 0.08, 0.004), WOOD));
    mesh.extend(cuboid(Vec3::new(0.0, 0.05, 0.006), Vec3::new(0.074, 0.079, 0.002), BLADE_RED));
    mesh.extend(cuboid(Vec3::new(0.0, 0.05, -0.006), Vec3::new(0.074, 0.079, 0.002), BLADE_BLACK));

    // Handle
    mesh.extend(cuboid(Vec3::new(0.0, -0.085, 0.0), Vec3::new(0.014, 0.055, 0.012), WOOD));

    mesh
}
