use std::path::Path;

use thiserror::Error;
use tracing::info;

pub mod config;
pub mod directories;
pub mod maker;
pub mod manifest;
pub mod paths;

mod toml_util;

pub use config::Config;
pub use maker::{CommandMaker, MakerError, ScreenMaker};
pub use manifest::ManifestEntry;
pub use paths::Layout;

/// Make every screen listed in `config` for the study at `study_dir` and write its manifest.
pub fn run<M>(study_dir: &Path, config: &Config, maker: &mut M) -> Result<Vec<ManifestEntry>>
where
    M: ScreenMaker + ?Sized,
{
    let layout = Layout::resolve(study_dir, config);
    directories::prepare(&layout)?;

    let entries = manifest::generate(&layout, &config.basenames, maker)?;
    info!(manifest = %layout.manifest.display(), rows = entries.len(), "Wrote manifest");

    Ok(entries)
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Directory(#[from] directories::Error),
    #[error(transparent)]
    Manifest(#[from] manifest::Error),
}
