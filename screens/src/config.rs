use std::{fs, io, path::{Path, PathBuf}, str::FromStr};

use thiserror::Error;

use crate::toml_util::{self, get_str, get_strings};

/// Dataset root the source directories live under.
pub const DEFAULT_ROOT: &str = "/uod/idr/filesets/";
pub const DEFAULT_BASENAMES: [&str; 3] = [
    "10x images plate 1",
    "10x images plate 2",
    "10x images plate 3",
];
/// Screens directory, relative to the study directory.
pub const DEFAULT_SCREENS: &str = "screens";
/// Manifest file, relative to the study directory.
pub const DEFAULT_MANIFEST: &str = "screenA/plates.tsv";
pub const DEFAULT_MAKER: &str = "make_screen";

const KEYS: [&str; 6] = ["root", "basenames", "screens", "manifest", "maker", "maker_args"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub root: PathBuf,
    pub basenames: Vec<String>,
    pub screens: PathBuf,
    pub manifest: PathBuf,
    pub maker: String,
    pub maker_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            basenames: DEFAULT_BASENAMES.iter().map(|b| b.to_string()).collect(),
            screens: PathBuf::from(DEFAULT_SCREENS),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            maker: DEFAULT_MAKER.to_string(),
            maker_args: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Read(path.to_path_buf(), e))?;
        content.parse()
    }

    /// Build a config from a toml table. Keys that are absent keep their defaults.
    pub fn from_table(table: &toml::Table) -> Result<Self> {
        if let Some(key) = table.keys().find(|k| !KEYS.contains(&k.as_str())) {
            return Err(Error::UnknownKey(key.clone()));
        }

        let mut config = Config::default();
        if let Some(root) = get_str(table, "root")? {
            config.root = PathBuf::from(root);
        }
        if let Some(basenames) = get_strings(table, "basenames")? {
            config.basenames = basenames;
        }
        if let Some(screens) = get_str(table, "screens")? {
            config.screens = PathBuf::from(screens);
        }
        if let Some(manifest) = get_str(table, "manifest")? {
            config.manifest = PathBuf::from(manifest);
        }
        if let Some(maker) = get_str(table, "maker")? {
            config.maker = maker.to_string();
        }
        if let Some(maker_args) = get_strings(table, "maker_args")? {
            config.maker_args = maker_args;
        }

        Ok(config)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let table = s.parse::<toml::Table>()?;
        Config::from_table(&table)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to read config file {0:?}")]
    Read(PathBuf, #[source] io::Error),
    #[error("Config file is not valid toml")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Value(#[from] toml_util::Error),
    #[error("Unknown config key '{0}'")]
    UnknownKey(String),
}
