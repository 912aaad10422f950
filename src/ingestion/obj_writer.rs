use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::types::TriangleSoup;

/// Write mesh objects with their (repacked) UVs to an OBJ file.
///
/// Corners are written unwelded, three vertices and three texcoords per
/// triangle, with faces referencing them sequentially. That loses vertex
/// sharing but preserves the exact per-corner UVs the packer produced.
pub fn write_obj(path: &Path, objects: &[(String, TriangleSoup)]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# frostpack repacked atlas UVs")?;

    // OBJ indices are global across objects and 1-based.
    let mut next_index = 1usize;

    for (name, soup) in objects {
        writeln!(writer, "o {name}")?;

        for p in &soup.positions {
            writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
        }
        for uv in &soup.uvs {
            writeln!(writer, "vt {} {}", uv.x, uv.y)?;
        }

        for tri in 0..soup.triangle_count() {
            let a = next_index + tri * 3;
            let (b, c) = (a + 1, a + 2);
            writeln!(writer, "f {a}/{a} {b}/{b} {c}/{c}")?;
        }

        next_index += soup.positions.len();
    }

    writer.flush()?;
    debug!(path = %path.display(), objects = objects.len(), "Wrote OBJ");

    Ok(())
}
