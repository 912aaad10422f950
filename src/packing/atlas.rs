use glam::Vec2;

use crate::error::{FrostpackError, Result};
use crate::packing::mask::BitGrid;

/// Atlas-space origin assigned to a mask by the packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
}

/// Fixed-size square mask packer.
///
/// Masks are expected in descending sort-key order; the packer keeps a
/// per-key row cache so the linear scan does not restart at the top of
/// the atlas for every mask of the same size class. The atlas never
/// grows: a mask that cannot be placed within the fixed bounds is an
/// error the caller must surface.
pub struct Atlas {
    grid: BitGrid,
    last_key: u32,
    last_y: u32,
}

impl Atlas {
    pub fn new(size: u32) -> Self {
        Self {
            grid: BitGrid::new(size, size, Vec2::ZERO),
            last_key: 0,
            last_y: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.grid.width
    }

    pub fn height(&self) -> u32 {
        self.grid.height
    }

    /// Whether the atlas texel at (x, y) is occupied.
    pub fn occupied(&self, x: u32, y: u32) -> bool {
        self.grid.get(x, y)
    }

    /// Place a mask at the first free origin and mark its texels occupied.
    ///
    /// Sequential and order-dependent: the occupancy left by each call
    /// determines where the next mask lands.
    pub fn place(&mut self, mask: &BitGrid) -> Result<Placement> {
        if mask.width > self.grid.width || mask.height > self.grid.height {
            return Err(self.overflow(mask));
        }

        // The scan resumes from the last row that accepted a mask of the
        // same sort key; a new key restarts from the top.
        if mask.sort_key() != self.last_key {
            self.last_y = 0;
            self.last_key = mask.sort_key();
        }

        let location = self
            .find_placement(mask)
            .ok_or_else(|| self.overflow(mask))?;

        self.copy_mask(mask, location);
        self.last_y = location.y;

        Ok(location)
    }

    fn overflow(&self, mask: &BitGrid) -> FrostpackError {
        FrostpackError::AtlasOverflow {
            mask_width: mask.width,
            mask_height: mask.height,
            atlas_size: self.grid.width,
        }
    }

    fn find_placement(&self, mask: &BitGrid) -> Option<Placement> {
        let max_y = self.grid.height - mask.height;
        let max_x = self.grid.width - mask.width;

        for y in self.last_y..=max_y {
            for x in 0..=max_x {
                if self.check_placement(mask, x, y) {
                    return Some(Placement { x, y });
                }
            }
        }
        None
    }

    /// Test whether `mask` overlaps existing occupancy at origin (x, y).
    ///
    /// Works a chunk-row at a time: each 64-bit mask chunk is shifted into
    /// atlas alignment, with the spill past the chunk boundary tested
    /// against the next atlas chunk.
    fn check_placement(&self, mask: &BitGrid, x: u32, y: u32) -> bool {
        let chunk_offset = x / 64;
        let bit_offset = x % 64;

        for mask_y in 0..mask.height {
            for mask_x in 0..mask.width_in_chunks() {
                let mask_chunk = mask.chunk(mask_x, mask_y);

                if self.grid.chunk(chunk_offset + mask_x, y + mask_y) & (mask_chunk << bit_offset)
                    != 0
                {
                    return false;
                }

                if bit_offset > 0
                    && self.grid.chunk(chunk_offset + mask_x + 1, y + mask_y)
                        & (mask_chunk >> (64 - bit_offset))
                        != 0
                {
                    return false;
                }
            }
        }
        true
    }

    fn copy_mask(&mut self, mask: &BitGrid, location: Placement) {
        let chunk_offset = location.x / 64;
        let bit_offset = location.x % 64;

        for y in 0..mask.height {
            for x in 0..mask.width_in_chunks() {
                let mask_chunk = mask.chunk(x, y);

                self.grid
                    .or_chunk(chunk_offset + x, location.y + y, mask_chunk << bit_offset);
                if bit_offset > 0 {
                    self.grid.or_chunk(
                        chunk_offset + x + 1,
                        location.y + y,
                        mask_chunk >> (64 - bit_offset),
                    );
                }
            }
        }
    }
}
