use std::path::Path;

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::error::{FrostpackError, Result};
use crate::types::TriangleSoup;

/// Load an OBJ file into one triangle soup per mesh object.
///
/// Faces are triangulated on load, and position/texcoord indices are kept
/// separate (`single_index: false`) so every corner carries its authored
/// per-loop UV. Materials are ignored; packing only needs geometry.
pub fn load_obj(path: &Path) -> Result<Vec<(String, TriangleSoup)>> {
    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path, &load_options)
        .map_err(|e| FrostpackError::Input(format!("Failed to load OBJ: {e}")))?;

    debug!(model_count = models.len(), "Loaded OBJ models");

    models
        .into_iter()
        .map(|model| {
            let soup = convert_mesh(&model.mesh).map_err(|e| match e {
                FrostpackError::MalformedMesh(msg) => {
                    FrostpackError::MalformedMesh(format!("object '{}': {msg}", model.name))
                }
                other => other,
            })?;
            Ok((model.name, soup))
        })
        .collect()
}

/// Convert a `tobj::Mesh` into a per-corner triangle soup.
fn convert_mesh(mesh: &tobj::Mesh) -> Result<TriangleSoup> {
    if mesh.texcoords.is_empty() {
        return Err(FrostpackError::MalformedMesh("missing UV layer".into()));
    }
    if mesh.texcoord_indices.len() != mesh.indices.len() {
        return Err(FrostpackError::MalformedMesh(format!(
            "corner count mismatch: {} position indices vs {} UV indices",
            mesh.indices.len(),
            mesh.texcoord_indices.len()
        )));
    }

    let mut soup = TriangleSoup {
        positions: Vec::with_capacity(mesh.indices.len()),
        uvs: Vec::with_capacity(mesh.indices.len()),
    };

    for (&pi, &ti) in mesh.indices.iter().zip(&mesh.texcoord_indices) {
        let pi = pi as usize * 3;
        let ti = ti as usize * 2;

        let (Some(pos), Some(uv)) = (
            mesh.positions.get(pi..pi + 3),
            mesh.texcoords.get(ti..ti + 2),
        ) else {
            return Err(FrostpackError::MalformedMesh(
                "face index out of range".into(),
            ));
        };

        soup.positions.push(Vec3::new(pos[0], pos[1], pos[2]));
        soup.uvs.push(Vec2::new(uv[0], uv[1]));
    }

    soup.validate()?;
    Ok(soup)
}
