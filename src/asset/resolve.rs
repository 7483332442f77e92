//! Asset resolution: the transform → optimize → fingerprint pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::debug;
use crate::utils::hash::checksum_file;
use crate::utils::swap::StagedFile;

use super::error::AssetError;
use super::plugin::{Optimizer, Processor};

/// A static asset resolved through the build pipeline.
///
/// Constructed once per source file. The pipeline runs during construction
/// and writes the processed content into a private working area; everything
/// below is immutable afterwards. The working area lives as long as the
/// Asset and is removed when it drops, so each Asset is a single-use,
/// single-owner value for one build pass.
#[derive(Debug)]
pub struct Asset {
    /// Source directory relative to the project root (includes the static prefix)
    pub source_dir: PathBuf,
    /// Original file name (`style.less`)
    pub source_filename: String,
    /// File name without extension (`style`)
    pub source_name: String,
    /// Extension of the source file (`less`)
    pub source_extension: String,
    /// Extension after the transformation stage (`css`)
    pub final_extension: String,
    /// Final file name, fingerprinted when eligible (`style.a1b2c3d4e5f60718.css`)
    pub final_name: String,
    /// Stable reference path for authored content - never fingerprinted
    pub link_url: String,
    /// Output path relative to the build root
    pub build_path: PathBuf,
    /// Public URL of the built file
    pub build_url: String,
    /// Fully processed content, owned by this asset
    preprocessed_path: PathBuf,
    work_dir: TempDir,
}

impl Asset {
    /// Resolve a source file (relative to the static root) into an Asset.
    ///
    /// Registries are ordered: the first processor that claims
    /// `source_extension` and succeeds decides `final_extension`; the first
    /// optimizer that claims `final_extension` and succeeds rewrites the
    /// content. At most one plugin per registry ever succeeds. Clean plugin
    /// failures fall through to the next candidate; faults propagate.
    ///
    /// # Errors
    ///
    /// [`AssetError::MissingExtension`] when the filename has no extension;
    /// IO errors when the source cannot be read; plugin faults unchanged.
    pub fn resolve(
        config: &SiteConfig,
        processors: &[Box<dyn Processor>],
        optimizers: &[Box<dyn Optimizer>],
        rel_path: &Path,
    ) -> Result<Self> {
        let filename = rel_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AssetError::MissingExtension(rel_path.display().to_string()))?
            .to_string();

        let (name, extension) = filename
            .rsplit_once('.')
            .filter(|(_, ext)| !ext.is_empty())
            .ok_or_else(|| AssetError::MissingExtension(filename.clone()))?;
        let (name, extension) = (name.to_string(), extension.to_string());

        let rel_dir = rel_path.parent().unwrap_or_else(|| Path::new(""));
        let source_dir = Path::new(&config.build.static_dir).join(rel_dir);
        let full_source = config.get_root().join(&source_dir).join(&filename);

        // Private working copy; all stages swap against this file, the
        // original source is never touched.
        let work_dir = TempDir::new()?;
        let work_file = work_dir.path().join("file");
        fs::copy(&full_source, &work_file)
            .with_context(|| format!("failed to read asset source `{}`", full_source.display()))?;

        debug!("asset"; "pre-processing {}", filename);

        let final_extension = run_processors(processors, &extension, &work_file)?
            .unwrap_or_else(|| extension.clone());

        if config.build.optimize.contains(&final_extension) {
            run_optimizers(optimizers, &final_extension, &work_file)?;
        }

        // Fingerprint over the fully processed bytes, never the raw source
        let final_name = if config.build.fingerprint.contains(&final_extension) {
            let checksum = checksum_file(&work_file)?;
            format!("{name}.{checksum}.{final_extension}")
        } else {
            format!("{name}.{final_extension}")
        };

        let url_dir = url_path(&source_dir);
        let link_url = format!("/{url_dir}/{name}.{final_extension}");
        let build_path = source_dir.join(&final_name);
        let build_url = format!("/{url_dir}/{final_name}");

        Ok(Self {
            source_dir,
            source_filename: filename,
            source_name: name,
            source_extension: extension,
            final_extension,
            final_name,
            link_url,
            build_path,
            build_url,
            preprocessed_path: work_file,
            work_dir,
        })
    }

    /// Location of the transformed + optimized content.
    pub fn preprocessed_path(&self) -> &Path {
        &self.preprocessed_path
    }

    /// Absolute path of the original source file.
    pub fn full_source_path(&self, config: &SiteConfig) -> PathBuf {
        config
            .get_root()
            .join(&self.source_dir)
            .join(&self.source_filename)
    }

    /// Absolute path the built file should be written to.
    pub fn full_build_path(&self, config: &SiteConfig) -> PathBuf {
        config.output_dir().join(&self.build_path)
    }
}

/// Transformation stage. Returns the new extension of the first successful
/// processor, or `None` when the loop completes without a success (the
/// caller then keeps the source extension).
fn run_processors(
    processors: &[Box<dyn Processor>],
    extension: &str,
    work_file: &Path,
) -> Result<Option<String>> {
    for processor in processors {
        if !processor.supported_extensions().iter().any(|e| *e == extension) {
            continue;
        }
        let staged = StagedFile::begin(work_file)?;
        if processor.run(work_file, staged.path())? {
            staged.commit()?;
            debug!("asset"; "{} processed by `{}`", work_file.display(), processor.name());
            // Do not run several processors (create a new plugin for this!)
            return Ok(Some(processor.output_extension().to_string()));
        }
        // Clean failure: staged slot is discarded, try the next candidate
    }
    Ok(None)
}

/// Optimization stage. First success wins; the extension never changes.
fn run_optimizers(
    optimizers: &[Box<dyn Optimizer>],
    extension: &str,
    work_file: &Path,
) -> Result<()> {
    for optimizer in optimizers {
        if !optimizer.supported_extensions().iter().any(|e| *e == extension) {
            continue;
        }
        let staged = StagedFile::begin(work_file)?;
        if optimizer.run(work_file, staged.path())? {
            staged.commit()?;
            debug!("asset"; "{} optimized by `{}`", work_file.display(), optimizer.name());
            // Do not run several optimizers (create a new plugin for this!)
            break;
        }
    }
    Ok(())
}

/// Render a relative directory as a URL segment (forward slashes everywhere).
fn url_path(dir: &Path) -> String {
    dir.to_string_lossy().replace('\\', "/")
}
