pub mod config;
pub mod error;
pub mod ingestion;
pub mod packing;
pub mod pipeline;
pub mod render;
pub mod types;

pub use config::{AtlasConfig, PackConfig};
pub use error::{FrostpackError, Result};
pub use pipeline::Pipeline;
pub use types::TriangleSoup;
