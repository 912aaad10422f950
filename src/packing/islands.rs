use std::collections::HashMap;

use glam::Vec2;

use crate::types::TriangleSoup;

/// Hash key identifying a UV-space point bit-for-bit.
///
/// Two corners belong to the same point iff their coordinates compare
/// exactly equal. No epsilon: seam vertices must have been unwelded or
/// explicitly merged upstream, not approximately equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct UvKey(u32, u32);

impl UvKey {
    fn new(uv: Vec2) -> Self {
        Self(uv.x.to_bits(), uv.y.to_bits())
    }
}

/// A maximal set of triangles connected through shared UV-space points.
///
/// Indices are in depth-first visit order. Islands partition the soup:
/// every triangle belongs to exactly one, and extraction never mutates
/// them afterwards.
#[derive(Debug, Clone)]
pub struct Island {
    /// Triangle indices into the source soup.
    pub triangles: Vec<usize>,
}

impl Island {
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Segment a triangle soup into UV-connected islands.
///
/// Builds a map from each exact UV point to the triangles touching it,
/// then runs an iterative depth-first traversal from every unvisited
/// triangle. Two triangles are adjacent when they share both endpoints
/// of an edge in UV space. The traversal uses an explicit stack so large
/// meshes cannot overflow the call stack.
pub fn extract_islands(soup: &TriangleSoup) -> Vec<Island> {
    let tri_count = soup.triangle_count();

    // UV point -> every triangle with a corner at that exact coordinate.
    // A triangle's corners are inserted back to back, so checking the last
    // entry is enough to dedupe degenerate triangles that repeat a corner.
    let mut point_to_tris: HashMap<UvKey, Vec<usize>> = HashMap::new();
    for tri in 0..tri_count {
        for uv in soup.triangle_uvs(tri) {
            let entry = point_to_tris.entry(UvKey::new(uv)).or_default();
            if entry.last() != Some(&tri) {
                entry.push(tri);
            }
        }
    }

    let mut visited = vec![false; tri_count];
    let mut islands = Vec::new();
    let mut stack = Vec::new();

    for start in 0..tri_count {
        if visited[start] {
            continue;
        }

        let mut triangles = Vec::new();
        stack.push(start);

        while let Some(tri) = stack.pop() {
            if visited[tri] {
                continue;
            }
            visited[tri] = true;
            triangles.push(tri);

            let uvs = soup.triangle_uvs(tri);
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                let a_tris = &point_to_tris[&UvKey::new(uvs[a])];
                let b_tris = &point_to_tris[&UvKey::new(uvs[b])];

                // Neighbours share both endpoints of this edge.
                for &neighbour in a_tris {
                    if neighbour != tri && !visited[neighbour] && b_tris.contains(&neighbour) {
                        stack.push(neighbour);
                    }
                }
            }
        }

        islands.push(Island { triangles });
    }

    islands
}

/// Linear scale factor mapping a unit of world-space surface onto UV space
/// at uniform density: `sqrt(total UV area / total world area)`.
///
/// Returns 0.0 for islands whose world-space area is exactly zero.
/// Advisory in the current pipeline; packing rasterizes at a fixed global
/// scale regardless.
pub fn texel_density(soup: &TriangleSoup, island: &Island) -> f32 {
    let mut world_area = 0.0f32;
    let mut uv_area = 0.0f32;

    for &tri in &island.triangles {
        let [p0, p1, p2] = soup.triangle_positions(tri);
        world_area += (p1 - p0).cross(p2 - p0).length() / 2.0;

        let [u0, u1, u2] = soup.triangle_uvs(tri);
        uv_area += (u1 - u0).perp_dot(u2 - u0).abs() / 2.0;
    }

    if world_area == 0.0 {
        return 0.0;
    }

    (uv_area / world_area).sqrt()
}
