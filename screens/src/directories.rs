use std::{fs, io, path::{Path, PathBuf}};

use thiserror::Error;
use tracing::debug;

use crate::paths::Layout;

/// Create the screens directory and the manifest's directory.
/// Directories that already exist are fine, any other failure is not.
pub fn prepare(layout: &Layout) -> Result<()> {
    for path in [layout.screens_dir.as_path(), layout.manifest_dir()] {
        create(path)?;
    }

    Ok(())
}

pub fn create(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| Error::Create(path.to_path_buf(), e))?;
    debug!(path = %path.display(), "Prepared directory");
    Ok(())
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to create directory {0:?}")]
    Create(PathBuf, #[source] io::Error),
}
