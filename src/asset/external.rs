//! Transformation plugins that shell out to ecosystem preprocessors.
//!
//! Sass and Less compilers are external tools. A missing binary or a
//! nonzero exit is a clean decline (`Ok(false)`), letting the asset pass
//! through untouched; only spawn/IO errors fault.

use std::path::Path;
use std::process::Command;

use anyhow::Result;
use which::which;

use crate::debug;

use super::plugin::Processor;

/// Run an external compiler as `program [extra..] input output`.
fn run_tool(
    program: &str,
    name: &str,
    extra: &[&str],
    input: &Path,
    output: &Path,
) -> Result<bool> {
    let Ok(bin) = which(program) else {
        debug!("asset"; "`{}` not found, skipping {} processor", program, name);
        return Ok(false);
    };

    let result = Command::new(bin)
        .args(extra)
        .arg(input)
        .arg(output)
        .output()?;

    if result.status.success() {
        Ok(true)
    } else {
        debug!(
            "asset";
            "{} failed: {}",
            name,
            String::from_utf8_lossy(&result.stderr).trim()
        );
        Ok(false)
    }
}

/// Compiles `.scss`/`.sass` stylesheets with the `sass` CLI.
pub struct SassProcessor;

impl Processor for SassProcessor {
    fn name(&self) -> &'static str {
        "sass"
    }

    fn supported_extensions(&self) -> &[&'static str] {
        &["scss", "sass"]
    }

    fn output_extension(&self) -> &'static str {
        "css"
    }

    fn run(&self, input: &Path, output: &Path) -> Result<bool> {
        run_tool("sass", self.name(), &["--no-source-map"], input, output)
    }
}

/// Compiles `.less` stylesheets with the `lessc` CLI.
pub struct LessProcessor;

impl Processor for LessProcessor {
    fn name(&self) -> &'static str {
        "less"
    }

    fn supported_extensions(&self) -> &[&'static str] {
        &["less"]
    }

    fn output_extension(&self) -> &'static str {
        "css"
    }

    fn run(&self, input: &Path, output: &Path) -> Result<bool> {
        run_tool("lessc", self.name(), &[], input, output)
    }
}
