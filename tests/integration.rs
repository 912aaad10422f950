//! End-to-end integration tests.
//!
//! These tests write synthetic OBJ inputs, run the full pipeline, and
//! validate the repacked output and debug imagery.

use std::fs;
use std::path::Path;

use frostpack::config::{AtlasConfig, PackConfig};
use frostpack::ingestion::load_obj;
use frostpack::{FrostpackError, Pipeline};

/// A quad split along its diagonal (one two-triangle island) plus a
/// distant triangle (a singleton island).
const TWO_ISLAND_OBJ: &str = "\
o packed
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 3 0 0
v 3.5 0 0
v 3 0.5 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vt 2 2
vt 2.5 2
vt 2 2.5
f 1/1 2/2 3/3
f 1/1 3/3 4/4
f 5/5 6/6 7/7
";

/// Two separate objects, each a single textured triangle.
const TWO_OBJECT_OBJ: &str = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
f 1/1 2/2 3/3
o second
v 2 0 0
v 3 0 0
v 2 1 0
vt 0 0
vt 1 0
vt 0 1
f 4/4 5/5 6/6
";

fn config(input: &Path, output: &Path) -> PackConfig {
    PackConfig {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        atlas: AtlasConfig {
            scale: 64.0,
            size: 256,
        },
        ..Default::default()
    }
}

#[test]
fn full_pipeline_two_islands() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("model.obj");
    let output = tmp.path().join("packed.obj");
    fs::write(&input, TWO_ISLAND_OBJ).unwrap();

    let result = Pipeline::run(&config(&input, &output)).expect("pipeline should succeed");
    assert_eq!(result.object_count, 1);
    assert_eq!(result.island_count, 2);

    // The output must load back and carry atlas-normalized UVs.
    let objects = load_obj(&output).unwrap();
    assert_eq!(objects.len(), 1);
    let soup = &objects[0].1;
    assert_eq!(soup.triangle_count(), 3);
    for uv in &soup.uvs {
        assert!(uv.x >= 0.0 && uv.x <= 1.0, "u out of range: {uv:?}");
        assert!(uv.y >= 0.0 && uv.y <= 1.0, "v out of range: {uv:?}");
    }

    // Geometry passes through untouched.
    let original = load_obj(&input).unwrap();
    assert_eq!(soup.positions, original[0].1.positions);
}

#[test]
fn debug_image_is_written_and_decodable() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("model.obj");
    let output = tmp.path().join("packed.obj");
    let atlas_png = tmp.path().join("atlas.png");
    fs::write(&input, TWO_ISLAND_OBJ).unwrap();

    let mut config = config(&input, &output);
    config.debug_image = Some(atlas_png.clone());

    Pipeline::run(&config).expect("pipeline should succeed");

    assert!(atlas_png.exists(), "debug image should exist");
    let img = image::open(&atlas_png).expect("debug image should decode");
    assert_eq!(img.width(), 256);
    assert_eq!(img.height(), 256);

    // At least one island texel should be colored.
    let rgba = img.to_rgba8();
    assert!(rgba.pixels().any(|p| p[3] > 0));
}

#[test]
fn multiple_objects_get_indexed_debug_images() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("model.obj");
    let output = tmp.path().join("packed.obj");
    fs::write(&input, TWO_OBJECT_OBJ).unwrap();

    let mut config = config(&input, &output);
    config.debug_image = Some(tmp.path().join("atlas.png"));

    let result = Pipeline::run(&config).expect("pipeline should succeed");
    assert_eq!(result.object_count, 2);

    assert!(tmp.path().join("atlas.0.png").exists());
    assert!(tmp.path().join("atlas.1.png").exists());
    assert!(!tmp.path().join("atlas.png").exists());
}

#[test]
fn overflow_aborts_without_writing_output() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("model.obj");
    let output = tmp.path().join("packed.obj");
    fs::write(&input, TWO_ISLAND_OBJ).unwrap();

    // The quad island needs ~scale texels on a side; a 64-texel atlas
    // cannot hold it at scale 1024.
    let mut config = config(&input, &output);
    config.atlas = AtlasConfig {
        scale: 1024.0,
        size: 64,
    };

    let err = Pipeline::run(&config).unwrap_err();
    assert!(matches!(err, FrostpackError::AtlasOverflow { .. }));
    assert!(!output.exists(), "no output may be written on overflow");
}

#[test]
fn mesh_without_uvs_fails_fast() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("model.obj");
    let output = tmp.path().join("packed.obj");
    fs::write(&input, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

    let err = Pipeline::run(&config(&input, &output)).unwrap_err();
    assert!(matches!(err, FrostpackError::MalformedMesh(_)));
    assert!(!output.exists());
}
