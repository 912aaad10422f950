use glam::Vec2;

/// Row-major occupancy bitmap stored as 64-bit chunks per row.
///
/// Used both for per-island masks and for the atlas backing array, so the
/// packer can test a whole mask row against the atlas 64 texels at a time.
#[derive(Debug, Clone)]
pub struct BitGrid {
    pub width: u32,
    pub height: u32,
    /// Minimum of the rasterized island's scaled UVs.
    /// `placement + scaled_uv - uv_min` recovers a corner's atlas texel.
    pub uv_min: Vec2,
    data: Vec<u64>,
}

impl BitGrid {
    pub fn new(width: u32, height: u32, uv_min: Vec2) -> Self {
        let chunks = (width + 63) / 64;
        Self {
            width,
            height,
            uv_min,
            data: vec![0; (chunks * height) as usize],
        }
    }

    pub fn width_in_chunks(&self) -> u32 {
        (self.width + 63) / 64
    }

    /// Packing priority: larger masks place first.
    pub fn sort_key(&self) -> u32 {
        self.width + self.height
    }

    /// Read a whole 64-bit chunk. Out-of-range chunks read as empty, which
    /// lets the overlap test probe one chunk past a mask's spill without a
    /// bounds branch at every call site.
    pub fn chunk(&self, chunk_x: u32, y: u32) -> u64 {
        if chunk_x >= self.width_in_chunks() || y >= self.height {
            return 0;
        }
        self.data[(y * self.width_in_chunks() + chunk_x) as usize]
    }

    /// OR `bits` into a chunk. Writes of zero bits to out-of-range chunks
    /// are dropped; non-zero out-of-range writes indicate a placement that
    /// violated the packer contract.
    pub fn or_chunk(&mut self, chunk_x: u32, y: u32, bits: u64) {
        if bits == 0 {
            return;
        }
        debug_assert!(chunk_x < self.width_in_chunks() && y < self.height);
        let chunks = self.width_in_chunks();
        self.data[(y * chunks + chunk_x) as usize] |= bits;
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        let mask = 1u64 << (x % 64);
        self.chunk(x / 64, y) & mask != 0
    }

    pub fn set(&mut self, x: u32, y: u32) {
        let mask = 1u64 << (x % 64);
        let chunks = self.width_in_chunks();
        self.data[(y * chunks + x / 64) as usize] |= mask;
    }

    /// Number of occupied texels. Diagnostic only.
    pub fn count_ones(&self) -> u64 {
        self.data.iter().map(|c| c.count_ones() as u64).sum()
    }
}

/// The equivalent of `cross2d(x - y, z - w)`
/// where cross2d is `a.x * b.y - a.y * b.x`.
fn cross2d_points(x: Vec2, y: Vec2, z: Vec2, w: Vec2) -> f32 {
    (x - y).perp_dot(z - w)
}

fn point_in_tri(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d0 = cross2d_points(b, a, p, a);
    let d1 = cross2d_points(c, b, p, b);
    let d2 = cross2d_points(a, c, p, c);
    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}

fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let d0 = cross2d_points(b, a, c, a);
    let d1 = cross2d_points(b, a, d, a);
    let d2 = cross2d_points(d, c, a, c);
    let d3 = cross2d_points(d, c, b, c);
    ((d0 > 0.0 && d1 < 0.0) || (d0 < 0.0 && d1 > 0.0))
        && ((d2 > 0.0 && d3 < 0.0) || (d2 < 0.0 && d3 > 0.0))
}

/// Conservative triangle/box overlap: vertex in box, box corner in
/// triangle, or any edge pair crossing.
fn tri_intersects_box(tri: &[Vec2; 3], box_center: Vec2, half_size: Vec2) -> bool {
    let b_min = box_center - half_size;
    let b_max = box_center + half_size;

    let box_corners = [
        b_min,
        Vec2::new(b_min.x, b_max.y),
        b_max,
        Vec2::new(b_max.x, b_min.y),
    ];

    for v in tri {
        if v.x > b_min.x && v.x < b_max.x && v.y > b_min.y && v.y < b_max.y {
            return true;
        }
    }

    for corner in box_corners {
        if point_in_tri(corner, tri[0], tri[1], tri[2]) {
            return true;
        }
    }

    let tri_edges = [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])];
    for (ta, tb) in tri_edges {
        for i in 0..4 {
            if segments_intersect(ta, tb, box_corners[i], box_corners[(i + 1) % 4]) {
                return true;
            }
        }
    }

    false
}

/// Rasterize an island's scaled UV triangles into an occupancy mask.
///
/// The mask footprint is the island's integer UV bounds padded by one
/// texel on every side; `uv_min` records the padded minimum so UV
/// remapping can translate corners into mask space. Each texel is set if
/// its 1-texel-inflated box overlaps any triangle, which over-covers by
/// up to a texel to avoid bleeding at island borders.
pub fn raster_island(tris: &[[Vec2; 3]]) -> BitGrid {
    debug_assert!(!tris.is_empty());

    let mut x_min = f32::MAX;
    let mut y_min = f32::MAX;
    let mut x_max = f32::MIN;
    let mut y_max = f32::MIN;

    for tri in tris {
        for v in tri {
            x_min = x_min.min(v.x);
            y_min = y_min.min(v.y);
            x_max = x_max.max(v.x);
            y_max = y_max.max(v.y);
        }
    }

    let x_min_i = x_min.round() as i32 - 1;
    let y_min_i = y_min.round() as i32 - 1;
    let x_max_i = x_max.round() as i32 + 1;
    let y_max_i = y_max.round() as i32 + 1;

    let mut mask = BitGrid::new(
        (x_max_i - x_min_i) as u32,
        (y_max_i - y_min_i) as u32,
        Vec2::new(x_min_i as f32, y_min_i as f32),
    );

    for t in tris {
        let tri_x_min = t[0].x.min(t[1].x).min(t[2].x).round() as i32 - 1;
        let tri_x_max = t[0].x.max(t[1].x).max(t[2].x).round() as i32 + 1;
        let tri_y_min = t[0].y.min(t[1].y).min(t[2].y).round() as i32 - 1;
        let tri_y_max = t[0].y.max(t[1].y).max(t[2].y).round() as i32 + 1;

        for y in tri_y_min..tri_y_max {
            for x in tri_x_min..tri_x_max {
                let mask_x = (x - x_min_i) as u32;
                let mask_y = (y - y_min_i) as u32;

                if !mask.get(mask_x, mask_y) {
                    let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                    if tri_intersects_box(t, center, Vec2::ONE) {
                        mask.set(mask_x, mask_y);
                    }
                }
            }
        }
    }

    mask
}
