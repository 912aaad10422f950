use image::{Rgba, Rgba32FImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::packing::PlacedMask;

/// Fixed seed so debug images are reproducible across runs.
const COLOR_SEED: u64 = 42;

/// Render a colored visualization of packed placements.
///
/// Each placement gets a distinct color from a fixed-seed RNG and is
/// painted only into the texels its mask actually occupies, not its
/// bounding rectangle. Unoccupied atlas texels stay transparent black.
/// Purely diagnostic: atlas and mesh state are unaffected and skipping
/// the render changes nothing about the packing result.
pub fn render_placements(placements: &[PlacedMask], atlas_size: u32) -> Rgba32FImage {
    let mut img = Rgba32FImage::new(atlas_size, atlas_size);
    let mut rng = StdRng::seed_from_u64(COLOR_SEED);

    for placed in placements {
        // Bright-ish channels, matching the 80..=255 byte range the
        // packing visualizations conventionally use.
        let color = Rgba([
            rng.gen_range(80..=255) as f32 / 255.0,
            rng.gen_range(80..=255) as f32 / 255.0,
            rng.gen_range(80..=255) as f32 / 255.0,
            1.0,
        ]);

        let mask = &placed.mask;
        for y in 0..mask.height {
            for x in 0..mask.width {
                if !mask.get(x, y) {
                    continue;
                }
                let ax = placed.placement.x + x;
                let ay = placed.placement.y + y;
                if ax < atlas_size && ay < atlas_size {
                    img.put_pixel(ax, ay, color);
                }
            }
        }
    }

    img
}

/// Quantize the float visualization to 8-bit RGBA for PNG output.
pub fn to_rgba8(img: &Rgba32FImage) -> image::RgbaImage {
    image::RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y);
        image::Rgba([
            (p[0].clamp(0.0, 1.0) * 255.0).round() as u8,
            (p[1].clamp(0.0, 1.0) * 255.0).round() as u8,
            (p[2].clamp(0.0, 1.0) * 255.0).round() as u8,
            (p[3].clamp(0.0, 1.0) * 255.0).round() as u8,
        ])
    })
}
