//! Site configuration management for `saguaro.toml`.
//!
//! # Sections
//!
//! | Section   | Purpose                                             |
//! |-----------|-----------------------------------------------------|
//! | `[site]`  | Site metadata (title, url)                          |
//! | `[build]` | Paths and asset policy (fingerprint/optimize sets)  |

mod error;

pub use error::ConfigError;

use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing saguaro.toml
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata
    #[serde(default)]
    pub site: SiteSection,

    /// Build settings
    #[serde(default)]
    pub build: BuildSection,
}

/// Site metadata (`[site]`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Site title
    pub title: Option<String>,

    /// Canonical site URL
    pub url: Option<String>,
}

/// Build settings (`[build]`)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// Static asset source directory, relative to the project root.
    ///
    /// Also the URL prefix under which assets are served.
    pub static_dir: String,

    /// Build output directory, relative to the project root
    pub output: PathBuf,

    /// Extensions eligible for checksum-based (fingerprinted) naming
    pub fingerprint: FxHashSet<String>,

    /// Extensions eligible for the optimization stage
    pub optimize: FxHashSet<String>,
}

impl Default for BuildSection {
    fn default() -> Self {
        let exts = |list: &[&str]| list.iter().map(|s| (*s).to_string()).collect();
        Self {
            static_dir: "static".into(),
            output: PathBuf::from("build"),
            fingerprint: exts(&["css", "js"]),
            optimize: exts(&["css", "js"]),
        }
    }
}

impl SiteConfig {
    /// Load configuration, searching upward from the current directory.
    pub fn load(config_name: &Path) -> Result<Self, ConfigError> {
        let path = find_config_file(config_name).ok_or_else(|| {
            ConfigError::Validation(format!(
                "config file `{}` not found in current or parent directories",
                config_name.display()
            ))
        })?;
        Self::from_file(&path)
    }

    /// Read and parse a specific config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let mut config: SiteConfig = toml::from_str(&content)?;
        config.config_path = path.to_path_buf();
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// Project root directory
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Absolute static asset source directory
    pub fn static_root(&self) -> PathBuf {
        self.root.join(&self.build.static_dir)
    }

    /// Absolute build output directory
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.build.output)
    }
}

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================
