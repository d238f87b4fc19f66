use crate::error::Result;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

const TEMPDIR_PREFIX: &str = "migrate-fixtures-";

/// A scratch directory removed, with everything under it, when the scope ends.
///
/// Removal happens on [`ScopedTempDir::close`] or, failing that, on drop,
/// including drops during unwinding. A directory the owner already deleted
/// is not an error.
#[derive(Debug)]
pub struct ScopedTempDir {
    path: PathBuf,
    dir: Option<TempDir>,
}

impl ScopedTempDir {
    /// Create a new, empty directory with a unique name under the system temp dir
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(TEMPDIR_PREFIX).tempdir()?;
        let path = dir.path().to_path_buf();
        debug!("Created temporary directory {}", path.display());

        Ok(Self {
            path,
            dir: Some(dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory now, reporting any failure
    pub fn close(mut self) -> Result<()> {
        self.remove()
    }

    fn remove(&mut self) -> Result<()> {
        let Some(dir) = self.dir.take() else {
            return Ok(());
        };

        match dir.close() {
            Ok(()) => {
                debug!("Removed temporary directory {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl AsRef<Path> for ScopedTempDir {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

impl Drop for ScopedTempDir {
    fn drop(&mut self) {
        if let Err(e) = self.remove() {
            warn!(
                "Failed to remove temporary directory {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Create a scoped scratch directory
pub fn tempdir() -> Result<ScopedTempDir> {
    ScopedTempDir::new()
}

/// Run `f` with a fresh scratch directory, removing it afterwards.
///
/// If `f` panics the directory is removed while unwinding and the panic
/// continues.
pub fn with_tempdir<F, R>(f: F) -> Result<R>
where
    F: FnOnce(&Path) -> R,
{
    let dir = ScopedTempDir::new()?;
    let result = f(dir.path());
    dir.close()?;
    Ok(result)
}
