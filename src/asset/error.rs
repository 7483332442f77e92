//! Asset pipeline error types.

use thiserror::Error;

/// Errors raised while resolving an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// A file without an extension cannot be classified into a processing chain.
    #[error("no file extension for `{0}`")]
    MissingExtension(String),
}
