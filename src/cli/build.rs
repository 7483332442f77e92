//! Build command: run every static file through the asset pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;

use crate::asset::{Asset, build_asset, default_optimizers, default_processors};
use crate::cli::BuildArgs;
use crate::config::SiteConfig;
use crate::log;

/// Build all assets under the static root into the output directory.
///
/// Each file is resolved (transform → optimize → fingerprint) and copied to
/// its final build path. A file the pipeline cannot classify (no extension)
/// fails the build.
pub fn build_site(config: &SiteConfig, args: &BuildArgs) -> Result<()> {
    let static_root = config.static_root();
    if !static_root.is_dir() {
        bail!(
            "static directory `{}` does not exist",
            static_root.display()
        );
    }

    let output_dir = config.output_dir();
    if args.clean && output_dir.exists() {
        fs::remove_dir_all(&output_dir)
            .with_context(|| format!("failed to clean `{}`", output_dir.display()))?;
    }

    let processors = default_processors();
    let optimizers = default_optimizers();

    let mut count = 0usize;
    for source in collect_static_files(&static_root) {
        let rel = source.strip_prefix(&static_root).unwrap_or(&source);

        let asset = Asset::resolve(config, &processors, &optimizers, rel)
            .with_context(|| format!("failed to process asset `{}`", rel.display()))?;
        build_asset(&asset, config)?;

        if args.verbose {
            log!("assets"; "{} -> {}", rel.display(), asset.build_url);
        }
        count += 1;
    }

    log!("build"; "{count} assets built to `{}`", config.build.output.display());
    Ok(())
}

/// Collect all files under the static root, in a stable order.
fn collect_static_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .collect()
}
