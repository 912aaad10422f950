pub mod atlas;
pub mod islands;
pub mod mask;

pub use atlas::{Atlas, Placement};
pub use islands::{Island, extract_islands, texel_density};
pub use mask::{BitGrid, raster_island};

use glam::Vec2;
use tracing::{debug, info};

use crate::config::AtlasConfig;
use crate::error::Result;
use crate::types::TriangleSoup;

/// A mask together with the atlas origin it was placed at.
///
/// Keeps the occupancy bitmap alive so the debug renderer can paint the
/// island's actual footprint rather than its bounding rectangle.
#[derive(Debug)]
pub struct PlacedMask {
    /// Index of the source island.
    pub island: usize,
    pub mask: BitGrid,
    pub placement: Placement,
}

/// Output of a packing run over one mesh object.
///
/// The source soup is never mutated; `uvs` is a full replacement buffer
/// the caller commits in one batch via [`TriangleSoup::apply_uvs`], so a
/// failed run leaves the mesh exactly as it was.
#[derive(Debug)]
pub struct PackResult {
    /// One atlas-normalized UV per corner.
    pub uvs: Vec<Vec2>,
    pub placements: Vec<PlacedMask>,
    pub islands: Vec<Island>,
    pub atlas_size: u32,
}

/// Pack one mesh object's UV islands into a fixed-size atlas.
///
/// Staged pipeline with a hard barrier between phases: extract all
/// islands, rasterize every island to a mask at the global scale, sort
/// masks by descending sort key (ties by island index, so placement
/// order is reproducible), place them sequentially, then remap every
/// corner UV into atlas-normalized space.
pub fn pack_mesh(soup: &TriangleSoup, config: &AtlasConfig) -> Result<PackResult> {
    soup.validate()?;

    let islands = extract_islands(soup);
    info!(
        triangles = soup.triangle_count(),
        islands = islands.len(),
        "Extracted UV islands"
    );

    // Rasterize every island before ordering anything: placement order
    // depends on the full set of masks existing.
    let scale = config.scale;
    let mut masks: Vec<(BitGrid, usize)> = Vec::with_capacity(islands.len());
    for (i, island) in islands.iter().enumerate() {
        let tris: Vec<[Vec2; 3]> = island
            .triangles
            .iter()
            .map(|&t| soup.triangle_uvs(t).map(|uv| uv * scale))
            .collect();
        let mask = raster_island(&tris);

        debug!(
            island = i,
            triangles = island.len(),
            width = mask.width,
            height = mask.height,
            texels = mask.count_ones(),
            density = texel_density(soup, island),
            "Rasterized island"
        );

        masks.push((mask, i));
    }

    masks.sort_by(|a, b| b.0.sort_key().cmp(&a.0.sort_key()).then(a.1.cmp(&b.1)));

    // Placement is strictly sequential: the occupancy left by each mask
    // determines where the next one lands. Any overflow aborts here,
    // before a single UV has been remapped.
    let mut atlas = Atlas::new(config.size);
    let mut placements = Vec::with_capacity(masks.len());
    for (mask, island) in masks {
        let placement = atlas.place(&mask)?;
        placements.push(PlacedMask {
            island,
            mask,
            placement,
        });
    }

    // Remap into a fresh buffer. A corner's new texel is its scaled UV
    // translated from mask space to the placed origin, normalized by the
    // atlas dimensions.
    let mut uvs = soup.uvs.clone();
    let atlas_dims = Vec2::new(atlas.width() as f32, atlas.height() as f32);
    for placed in &placements {
        let origin = Vec2::new(placed.placement.x as f32, placed.placement.y as f32);
        let offset = origin - placed.mask.uv_min;

        for &tri in &islands[placed.island].triangles {
            for corner in tri * 3..tri * 3 + 3 {
                uvs[corner] = (soup.uvs[corner] * scale + offset) / atlas_dims;
            }
        }
    }

    info!(
        placed = placements.len(),
        atlas_size = config.size,
        "Packed islands into atlas"
    );

    Ok(PackResult {
        uvs,
        placements,
        islands,
        atlas_size: config.size,
    })
}
