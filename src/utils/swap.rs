//! Staged file replacement: write to a temporary sibling, swap on success.
//!
//! Pipeline stages hand a plugin a fresh output slot next to the file it
//! should replace. Only an explicit [`StagedFile::commit`] moves the staged
//! content over the target (atomic rename); every other exit path, plugin
//! faults included, drops the staged file and leaves the target untouched.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

/// A temporary output slot bound to a target path.
///
/// The slot lives in the same directory as the target so the final rename
/// never crosses a filesystem boundary.
pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Acquire a staged slot for `target`.
    pub fn begin(target: &Path) -> io::Result<Self> {
        let dir = target.parent().unwrap_or_else(|| Path::new("."));
        let temp = Builder::new().prefix(".staged-").tempfile_in(dir)?;
        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    /// Path plugins should write their output to.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Replace the target with the staged content.
    pub fn commit(self) -> io::Result<()> {
        self.temp.persist(&self.target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_commit_replaces_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("work");
        fs::write(&target, "before").unwrap();

        let staged = StagedFile::begin(&target).unwrap();
        fs::write(staged.path(), "after").unwrap();
        staged.commit().unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "after");
    }

    #[test]
    fn test_drop_without_commit_keeps_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("work");
        fs::write(&target, "before").unwrap();

        let slot_path;
        {
            let staged = StagedFile::begin(&target).unwrap();
            fs::write(staged.path(), "partial garbage").unwrap();
            slot_path = staged.path().to_path_buf();
            // dropped uncommitted
        }

        assert_eq!(fs::read_to_string(&target).unwrap(), "before");
        assert!(!slot_path.exists());
    }

    #[test]
    fn test_slot_is_sibling_of_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("work");
        fs::write(&target, "x").unwrap();

        let staged = StagedFile::begin(&target).unwrap();
        assert_eq!(staged.path().parent(), target.parent());
    }
}
