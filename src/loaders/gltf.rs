use anyhow::{bail, Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use crate::mesh::Mesh;
use crate::types::Vertex;

/// Loads every mesh in a glTF/GLB file into one triangle list
///
/// Node transforms are baked in. Each primitive is tinted with its material's
/// base color factor; missing normals are replaced with flat face normals.
pub fn load_paddle_mesh(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let (gltf, buffers, _images) = gltf::import(path)
        .with_context(|| format!("Failed to load glTF file: {}", path.display()))?;

    let mut mesh = Mesh::new();
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, Mat4::IDENTITY, &mut mesh)?;
        }
    }

    if mesh.is_empty() {
        bail!("glTF file {} contains no triangles", path.display());
    }

    log::info!(
        "Loaded model {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

fn process_node(node: &gltf::Node, buffers: &[gltf::buffer::Data], parent: Mat4, out: &mut Mesh) -> Result<()> {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!("Skipping non-triangle primitive in mesh {:?}", mesh.name());
                continue;
            }
            out.extend(read_primitive(&primitive, buffers)?.transformed(transform));
        }
    }

    for child in node.children() {
        process_node(&child, buffers, transform, out)?;
    }
    Ok(())
}

fn read_primitive(primitive: &gltf::Primitive, buffers: &[gltf::buffer::Data]) -> Result<Mesh> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .context("Mesh primitive has no positions")?
        .collect();
    let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|n| n.collect());
    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|uv| uv.into_f32().collect())
        .unwrap_or_default();
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let [r, g, b, _] = primitive.material().pbr_metallic_roughness().base_color_factor();
    assemble(positions, normals, uvs, indices, [r, g, b])
}

/// Build a mesh from raw attribute streams
///
/// UVs are padded with zeros or truncated to the position count; normals of
/// the wrong length are replaced by flat face normals.
fn assemble(
    positions: Vec<[f32; 3]>,
    normals: Option<Vec<[f32; 3]>>,
    mut uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
    tint: [f32; 3],
) -> Result<Mesh> {
    if indices.iter().any(|&i| i as usize >= positions.len()) {
        bail!("Primitive index out of range ({} vertices)", positions.len());
    }
    uvs.resize(positions.len(), [0.0, 0.0]);

    match normals {
        Some(normals) if normals.len() == positions.len() => {
            let vertices = positions
                .iter()
                .zip(&normals)
                .zip(&uvs)
                .map(|((p, n), uv)| Vertex::new(*p, *n, *uv, tint))
                .collect();
            Ok(Mesh { vertices, indices })
        }
        _ => Ok(flat_shaded(&positions, &uvs, &indices, tint)),
    }
}

/// Unshares vertices so each triangle gets its own face normal
fn flat_shaded(positions: &[[f32; 3]], uvs: &[[f32; 2]], indices: &[u32], tint: [f32; 3]) -> Mesh {
    let mut mesh = Mesh::new();
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(positions[i as usize]));
        let normal = (b - a).cross(c - a).normalize_or_zero().to_array();
        for &i in tri {
            mesh.indices.push(mesh.vertices.len() as u32);
            mesh.vertices.push(Vertex::new(positions[i as usize], normal, uvs[i as usize], tint));
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_error() {
        let err = load_paddle_mesh("does/not/exist.glb").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.glb"));
    }

    #[test]
    fn short_uv_stream_keeps_every_vertex() {
        let positions = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]];
        let normals = vec![[0.0, 0.0, 1.0]; 4];
        let uvs = vec![[0.5, 0.5]];

        let smooth = assemble(positions.clone(), Some(normals), uvs.clone(), vec![0, 1, 2, 2, 1, 3], [1.0; 3]).unwrap();
        assert_eq!(smooth.vertices.len(), 4);
        assert_eq!(smooth.vertices[0].uv, [0.5, 0.5]);
        assert_eq!(smooth.vertices[3].uv, [0.0, 0.0]);

        let flat = assemble(positions, None, uvs, vec![0, 1, 2, 2, 1, 3], [1.0; 3]).unwrap();
        assert_eq!(flat.vertices.len(), 6);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let positions = vec![[0.0; 3]; 3];
        assert!(assemble(positions, None, Vec::new(), vec![0, 1, 3], [1.0; 3]).is_err());
    }

    #[test]
    fn flat_shading_uses_face_normals() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let uvs = [[0.0; 2]; 4];
        let mesh = flat_shaded(&positions, &uvs, &[0, 1, 2, 0, 3, 1], [1.0; 3]);

        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices[3].normal, [0.0, 1.0, 0.0]);
    }
}
