//! Plugin capability traits and the stock registries.
//!
//! A registry is a plain ordered list passed into [`crate::asset::Asset::resolve`];
//! there is no global registration state. Order is the sole tie-break: the
//! first plugin that claims the extension and reports success wins, and at
//! most one plugin per registry ever succeeds for a given asset. Multi-stage
//! chains are deliberately unsupported - write a new plugin instead.

use std::path::Path;

use anyhow::Result;

use super::external::{LessProcessor, SassProcessor};
use super::minify::{CssMinifier, JsMinifier};

/// A transformation capability: converts content from one source format to
/// another, potentially changing the logical extension (e.g. `scss` → `css`).
pub trait Processor {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Source extensions this processor claims.
    fn supported_extensions(&self) -> &[&'static str];

    /// Extension of the produced content.
    fn output_extension(&self) -> &'static str;

    /// Attempt the transformation: read `input`, write the result to `output`.
    ///
    /// `Ok(true)` means output was produced and should replace the working
    /// file. `Ok(false)` is a clean "could not process" - the pipeline falls
    /// through to the next candidate. `Err` is a fault and aborts the build.
    fn run(&self, input: &Path, output: &Path) -> Result<bool>;
}

/// An optimization capability: rewrites content in place of the working file
/// without changing its logical extension (e.g. minification).
pub trait Optimizer {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Extensions this optimizer claims.
    fn supported_extensions(&self) -> &[&'static str];

    /// Attempt the optimization; same contract as [`Processor::run`].
    fn run(&self, input: &Path, output: &Path) -> Result<bool>;
}

/// Stock transformation chain, in priority order.
pub fn default_processors() -> Vec<Box<dyn Processor>> {
    vec![Box::new(SassProcessor), Box::new(LessProcessor)]
}

/// Stock optimization chain, in priority order.
pub fn default_optimizers() -> Vec<Box<dyn Optimizer>> {
    vec![Box::new(CssMinifier), Box::new(JsMinifier)]
}
