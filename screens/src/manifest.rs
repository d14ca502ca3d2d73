use std::{fmt::Display, fs::{self, File}, io::{self, BufWriter, Write}, path::{Component, Path, PathBuf}, str::FromStr};

use derive_new::new;
use thiserror::Error;
use tracing::info;

use crate::{maker::{MakerError, ScreenMaker}, paths::Layout};

/// One manifest row: a basename and the path of its screen file relative to the manifest.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ManifestEntry {
    pub basename: String,
    pub screen: String,
}

impl Display for ManifestEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}", self.basename, self.screen)
    }
}

impl FromStr for ManifestEntry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (basename, screen) = s.split_once('\t')
            .ok_or_else(|| Error::MissingTab(s.to_string()))?;
        Ok(ManifestEntry::new(basename.to_string(), screen.to_string()))
    }
}

pub fn write_entry(writer: &mut impl Write, entry: &ManifestEntry) -> io::Result<()> {
    writeln!(writer, "{}", entry)
}

/// A basename must name a single directory below the root and fit on one manifest row.
pub fn check_basename(basename: &str) -> Result<()> {
    let mut components = Path::new(basename).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == basename
    );

    if !single || basename.contains(['\t', '\n', '\r']) {
        return Err(Error::InvalidBasename(basename.to_string()));
    }

    Ok(())
}

/// Check every basename, truncate the manifest, then make one screen per basename and record it.
/// Rows are flushed as they are written, so a failure leaves the rows made so far.
pub fn generate<M>(
    layout: &Layout,
    basenames: &[String],
    maker: &mut M,
) -> Result<Vec<ManifestEntry>>
where
    M: ScreenMaker + ?Sized,
{
    for basename in basenames {
        check_basename(basename)?;
    }

    let path = &layout.manifest;
    let file = File::create(path)
        .map_err(|e| Error::Create(path.clone(), e))?;
    let mut writer = BufWriter::new(file);
    let mut entries = Vec::with_capacity(basenames.len());

    for (i, basename) in basenames.iter().enumerate() {
        let source = layout.source_dir(basename);
        let destination = layout.screen_file(basename);
        info!("({}/{}) Making screen for {}", i + 1, basenames.len(), basename);

        maker.make_screen(&source, &destination, basename)
            .map_err(|e| Error::Maker(basename.clone(), e))?;

        let entry = ManifestEntry::new(basename.clone(), layout.relative_screen_file(basename));
        write_entry(&mut writer, &entry)
            .and_then(|_| writer.flush())
            .map_err(|e| Error::Write(path.clone(), e))?;
        entries.push(entry);
    }

    Ok(entries)
}

pub fn read(path: impl Into<PathBuf>) -> Result<Vec<ManifestEntry>> {
    let path = path.into();
    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Read(path.clone(), e))?;

    content.lines()
        .map(|line| line.parse())
        .collect()
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to create manifest {0:?}")]
    Create(PathBuf, #[source] io::Error),
    #[error("Failed to write to manifest {0:?}")]
    Write(PathBuf, #[source] io::Error),
    #[error("Failed to read manifest {0:?}")]
    Read(PathBuf, #[source] io::Error),
    #[error("Failed to make screen for '{0}'")]
    Maker(String, #[source] MakerError),
    #[error("Basename {0:?} is not a single directory name")]
    InvalidBasename(String),
    #[error("Manifest row has no tab: '{0}'")]
    MissingTab(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_row_format() {
        let entry = ManifestEntry::new(
            "10x images plate 1".to_string(),
            "../screens/10x images plate 1.screen".to_string(),
        );

        let mut row = Vec::new();
        write_entry(&mut row, &entry).unwrap();
        assert_eq!(String::from_utf8(row).unwrap(), "10x images plate 1\t../screens/10x images plate 1.screen\n");
    }

    #[test]
    fn parses_rows() {
        let entry: ManifestEntry = "plate\t../screens/plate.screen".parse().unwrap();
        assert_eq!(entry.basename, "plate");
        assert_eq!(entry.screen, "../screens/plate.screen");

        assert!(matches!("no tab here".parse::<ManifestEntry>(), Err(Error::MissingTab(_))));
    }

    #[test]
    fn basenames_name_one_directory() {
        for basename in ["10x images plate 1", "plate.v2", "..plate"] {
            assert!(check_basename(basename).is_ok(), "{basename}");
        }
        for basename in ["", ".", "..", "/data/plate", "plates/1", "plate/", "plate\t1", "plate\n1"] {
            assert!(matches!(check_basename(basename), Err(Error::InvalidBasename(b)) if b == basename), "{basename:?}");
        }
    }
}
