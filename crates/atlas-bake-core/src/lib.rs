//! Core library for baking folders of small rasters into one texture atlas.
//!
//! - Packing: greedy first-fit over a binary partition tree that grows along
//!   its shorter axis, with LRU eviction once the configured cap is reached
//! - Pipeline: `pack_images` takes decoded sources and returns the composited
//!   page plus placement records in cache order
//! - Exporters: plain-text sidecar (`atlasMetadata.txt` format) and JSON
//!
//! Quick example:
//! ```ignore
//! use atlas_bake_core::{pack_images, PackerConfig, SourceImage};
//! # fn main() -> atlas_bake_core::Result<()> {
//! let a = SourceImage::new("a", vec![0u8; 16 * 16 * 4], 16, 16, 4)?;
//! let b = SourceImage::new("b", vec![0u8; 8 * 8 * 4], 8, 8, 4)?;
//! let cfg = PackerConfig { max_width: 64, max_height: 64, ..Default::default() };
//! let out = pack_images(vec![a, b], &cfg)?;
//! println!("atlas: {}x{}", out.width, out.height);
//! # Ok(()) }
//! ```

pub mod arena;
pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod lru;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod tree;

pub use config::*;
pub use error::*;
pub use model::*;
pub use pipeline::*;

/// Convenience prelude for the primary APIs.
pub mod prelude {
    pub use crate::config::{PackerConfig, PackerConfigBuilder};
    pub use crate::error::{AtlasBakeError, Result};
    pub use crate::export::{to_json, write_metadata_txt};
    pub use crate::model::{Block, PackStats, Placement, SourceImage};
    pub use crate::pipeline::{pack_images, PackOutput};
}
