use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::info;

use crate::config::PackConfig;
use crate::error::Result;
use crate::ingestion;
use crate::packing::{self, PackResult};
use crate::render;

/// Summary of a completed pipeline run.
#[derive(Debug)]
pub struct ProcessingResult {
    pub object_count: usize,
    pub island_count: usize,
    pub duration: Duration,
}

/// Pipeline orchestrator -- drives the load, pack, and write stages.
pub struct Pipeline;

impl Pipeline {
    /// Run the full repacking pipeline.
    pub fn run(config: &PackConfig) -> Result<ProcessingResult> {
        let start = Instant::now();

        info!(input = %config.input.display(), "Starting pipeline");

        info!("Stage 1/3: Load");
        let mut objects = ingestion::load_obj(&config.input)?;

        info!("Stage 2/3: Pack");
        // Objects are independent and pack in parallel; each object's own
        // pipeline stays strictly sequential. The first failed object
        // aborts the run, with every soup still unmodified.
        let results: Vec<PackResult> = objects
            .par_iter()
            .enumerate()
            .map(|(i, (name, soup))| {
                info!(
                    object = i,
                    name = %name,
                    triangles = soup.triangle_count(),
                    "Packing object"
                );
                packing::pack_mesh(soup, &config.atlas)
            })
            .collect::<Result<Vec<_>>>()?;

        let island_count: usize = results.iter().map(|r| r.islands.len()).sum();

        info!("Stage 3/3: Write");
        let object_count = objects.len();
        for (i, ((name, soup), result)) in objects.iter_mut().zip(results).enumerate() {
            info!(
                object = i,
                name = %name.as_str(),
                islands = result.islands.len(),
                "Committing remapped UVs"
            );

            if let Some(ref base) = config.debug_image {
                let image = render::render_placements(&result.placements, result.atlas_size);
                let path = indexed_path(base, i, object_count);
                render::to_rgba8(&image).save(&path)?;
                info!(path = %path.display(), "Wrote debug atlas image");
            }

            soup.apply_uvs(result.uvs)?;
        }

        ingestion::write_obj(&config.output, &objects)?;

        let duration = start.elapsed();
        info!(
            objects = object_count,
            islands = island_count,
            elapsed = ?duration,
            "Pipeline complete"
        );

        Ok(ProcessingResult {
            object_count,
            island_count,
            duration,
        })
    }
}

/// Debug image path for object `index`: the configured path as-is for a
/// single object, otherwise suffixed with the object index before the
/// extension (`atlas.png` -> `atlas.1.png`).
fn indexed_path(base: &Path, index: usize, object_count: usize) -> PathBuf {
    if object_count <= 1 {
        return base.to_path_buf();
    }

    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("atlas");
    let name = match base.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{index}.{ext}"),
        None => format!("{stem}.{index}"),
    };
    base.with_file_name(name)
}
