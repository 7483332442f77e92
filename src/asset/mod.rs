//! Asset processing: the per-file build pipeline.
//!
//! Each static source file becomes an [`Asset`]: its content is run through
//! the transformation and optimization registries, fingerprinted when
//! eligible, and given a deterministic output path and public URL.

mod build;
mod error;
pub mod external;
pub mod minify;
mod plugin;
mod resolve;

pub use build::build_asset;
pub use error::AssetError;
pub use plugin::{Optimizer, Processor, default_optimizers, default_processors};
pub use resolve::Asset;
