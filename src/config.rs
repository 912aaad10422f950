use std::path::PathBuf;

use clap::Parser;

/// Atlas packing parameters.
#[derive(Debug, Clone)]
pub struct AtlasConfig {
    /// Texels per UV unit applied to every island before rasterization.
    pub scale: f32,
    /// Side length of the fixed square atlas, in texels.
    pub size: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            scale: 1024.0,
            size: 1024,
        }
    }
}

/// Fully resolved pipeline configuration (constructed from CLI args).
#[derive(Debug, Clone)]
pub struct PackConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub atlas: AtlasConfig,
    pub debug_image: Option<PathBuf>,
    pub verbose: bool,
    pub threads: Option<usize>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            atlas: AtlasConfig::default(),
            debug_image: None,
            verbose: false,
            threads: None,
        }
    }
}

/// CLI argument definition (clap derive).
#[derive(Parser, Debug)]
#[command(
    name = "frostpack",
    about = "UV-island texture atlas repacker for triangle meshes",
    version
)]
pub struct CliArgs {
    /// Input OBJ file
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Output OBJ file
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Texels per UV unit when rasterizing islands
    #[arg(long, default_value_t = 1024.0)]
    pub scale: f32,

    /// Atlas side length in texels
    #[arg(long, default_value_t = 1024)]
    pub atlas_size: u32,

    /// Write a colored visualization of the packed atlas to this PNG path
    #[arg(long)]
    pub debug_image: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Worker thread count (default: all cores)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

impl From<CliArgs> for PackConfig {
    fn from(args: CliArgs) -> Self {
        PackConfig {
            input: args.input,
            output: args.output,
            atlas: AtlasConfig {
                scale: args.scale,
                size: args.atlas_size,
            },
            debug_image: args.debug_image,
            verbose: args.verbose,
            threads: args.threads,
        }
    }
}
