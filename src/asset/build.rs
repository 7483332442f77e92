//! Builder: copy resolved asset content into the output tree.

use std::fs;

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::debug;

use super::resolve::Asset;

/// Copy an asset's fully preprocessed content to its build path.
///
/// Creates intermediate directories as needed (already-existing directories
/// are fine); all other filesystem errors propagate.
pub fn build_asset(asset: &Asset, config: &SiteConfig) -> Result<()> {
    debug!("build"; "{} -> {}", asset.source_filename, asset.build_url);

    let destination = asset.full_build_path(config);
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::copy(asset.preprocessed_path(), &destination)
        .with_context(|| format!("failed to write `{}`", destination.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("static")).unwrap();
        let config = SiteConfig {
            config_path: dir.path().join("saguaro.toml"),
            root: dir.path().to_path_buf(),
            site: Default::default(),
            build: Default::default(),
        };
        (dir, config)
    }

    #[test]
    fn test_build_creates_directories_and_copies() {
        let (_dir, config) = fixture();
        let nested = config.get_root().join("static/img/icons");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("logo.png"), "png bytes").unwrap();

        let asset =
            Asset::resolve(&config, &[], &[], Path::new("img/icons/logo.png")).unwrap();
        build_asset(&asset, &config).unwrap();

        let built = config.output_dir().join("static/img/icons/logo.png");
        assert_eq!(fs::read_to_string(built).unwrap(), "png bytes");
    }

    #[test]
    fn test_build_is_repeatable() {
        let (_dir, config) = fixture();
        fs::write(config.get_root().join("static/logo.png"), "png bytes").unwrap();

        let asset = Asset::resolve(&config, &[], &[], Path::new("logo.png")).unwrap();

        // Destination directory already exists on the second pass
        build_asset(&asset, &config).unwrap();
        build_asset(&asset, &config).unwrap();

        let built = config.output_dir().join("static/logo.png");
        assert_eq!(fs::read_to_string(built).unwrap(), "png bytes");
    }

    #[test]
    fn test_fingerprinted_name_on_disk() {
        let (_dir, config) = fixture();
        fs::write(
            config.get_root().join("static/style.css"),
            "body { color: red; }",
        )
        .unwrap();

        let asset = Asset::resolve(&config, &[], &[], Path::new("style.css")).unwrap();
        build_asset(&asset, &config).unwrap();

        assert!(asset.full_build_path(&config).exists());
        // The plain name is not written; only the fingerprinted one
        assert!(!config.output_dir().join("static/style.css").exists());
    }
}
