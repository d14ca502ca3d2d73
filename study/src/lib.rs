use std::{collections::BTreeMap, fs, io, path::{Path, PathBuf}};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

pub mod annotation;
pub mod component;
pub mod keys;
pub mod publication;

use component::{Component, ComponentKind};
use publication::Publication;

pub use annotation::Annotation;

pub type Fields = BTreeMap<String, String>;

/// Key based access to parsed values.
pub trait Lookup {
    fn lookup(&self, key: &str) -> Option<&str>;
}

/// A parsed IDR study file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Study {
    pub path: PathBuf,
    pub fields: Fields,
    pub publications: Vec<Publication>,
    pub components: Vec<Component>,
}

impl Study {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Parsing {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Read(path.to_path_buf(), e))?;
        Self::parse(path, &content)
    }

    /// Parse study file content. `path` locates annotation files next to the study.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let lines = content.lines().collect::<Vec<_>>();

        let fields = parse_keys(&lines, keys::STUDY_MANDATORY, keys::STUDY_OPTIONAL)?;
        let publications = publication::from_study(&fields)?;
        let dir = path.parent().unwrap_or(Path::new("")).to_path_buf();

        let mut components = Vec::new();
        for kind in ComponentKind::ALL {
            let count_key = kind.count_key();
            let count = match fields.get(&count_key) {
                Some(value) => value.trim().parse::<usize>()
                    .map_err(|_| Error::InvalidCount(count_key.clone(), value.clone()))?,
                None => 0,
            };

            for index in 1..=count {
                debug!("Parsing {kind} {index}");
                let block = component_lines(&lines, kind, index)?;
                let mut component_fields = parse_keys(&block, kind.mandatory_keys(), kind.optional_keys())?;
                component_fields.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));

                let mut component = Component::new(kind, component_fields, publications.clone());
                component.annotation_file = annotation_file(&dir, &component)?;
                components.push(component);
            }
        }

        if components.is_empty() {
            return Err(Error::NoComponents);
        }

        Ok(Self { path, fields, publications, components })
    }

    pub fn components_of(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.kind == kind)
    }
}

/// Value of the first line starting with `key` and a tab, trailing whitespace removed.
pub fn value<'a>(lines: &[&'a str], key: &str) -> Option<&'a str> {
    lines.iter()
        .copied()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix('\t'))
        .map(str::trim_end)
}

fn parse_keys(lines: &[&str], mandatory: &[&'static str], optional: &[&'static str]) -> Result<Fields> {
    let mut fields = Fields::new();

    for &key in mandatory {
        let value = value(lines, key).ok_or(Error::MissingKey(key))?;
        fields.insert(key.to_string(), value.to_string());
    }

    for &key in optional {
        if let Some(value) = value(lines, key).filter(|v| !v.is_empty()) {
            fields.insert(key.to_string(), value.to_string());
        }
    }

    Ok(fields)
}

/// Lines of the `index`th block of a kind. A block opens on `<kind> Number\t<index>`
/// and closes before the next `<kind> Number` line with another number.
fn component_lines<'a>(lines: &[&'a str], kind: ComponentKind, index: usize) -> Result<Vec<&'a str>> {
    let prefix = format!("{kind} Number\t");
    let mut found = false;
    let mut block = Vec::new();

    for &line in lines {
        if let Some(number) = line.strip_prefix(&prefix).and_then(leading_number) {
            if number == index {
                found = true;
            } else if found {
                return Ok(block);
            }
        }
        if found {
            block.push(line);
        }
    }

    if block.is_empty() {
        Err(Error::MissingComponent(kind, index))
    } else {
        Ok(block)
    }
}

fn leading_number(s: &str) -> Option<usize> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Split a component name of the form `<accession>-<word>-<word>/<word>`
/// into its repository and directory parts.
fn split_name<'a>(name: &'a str, accession: &str) -> Option<(&'a str, &'a str)> {
    let (repository, directory) = name.split_once('/')?;
    let (first, second) = repository.strip_prefix(accession)?
        .strip_prefix('-')?
        .split_once('-')?;

    [first, second, directory].iter()
        .all(|w| is_word(w))
        .then_some((repository, directory))
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn annotation_file(dir: &Path, component: &Component) -> Result<Option<String>> {
    let accession = component.lookup(keys::STUDY_ACCESSION)
        .ok_or(Error::MissingKey(keys::STUDY_ACCESSION))?;
    let name = component.name();
    let (repository, directory) = split_name(name, accession)
        .ok_or_else(|| Error::UnmatchedName(name.to_string()))?;

    let component_dir = dir.join(directory);
    let basename = format!("{accession}-{directory}-annotation");

    for extension in [".csv", ".csv.gz"] {
        let filename = format!("{basename}{extension}");
        let path = component_dir.join(&filename);
        if !path.exists() {
            debug!("Cannot find {}", path.display());
            continue;
        }

        let url = if dir.join(".git").exists() {
            format!("https://github.com/IDR/{repository}/blob/master/{directory}/{filename}")
        } else {
            format!("https://github.com/IDR/idr-metadata/blob/master/{name}/{filename}")
        };
        return Ok(Some(url));
    }

    Ok(None)
}

/// Study files at `path`: the path itself if it is a file, otherwise every
/// `*study.txt` below it in path order. A missing or unreadable path is an error.
pub fn find_study_files(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Walk(path.to_path_buf(), e))?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with("study.txt") {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to read study file {0:?}")]
    Read(PathBuf, #[source] io::Error),
    #[error("Unable to search {0:?} for study files")]
    Walk(PathBuf, #[source] walkdir::Error),
    #[error("Could not find value for key {0}")]
    MissingKey(&'static str),
    #[error("Could not find {0} {1}")]
    MissingComponent(ComponentKind, usize),
    #[error("Expected {0} to be a number, found '{1}'")]
    InvalidCount(String, String),
    #[error("Need to define at least one screen or experiment")]
    NoComponents,
    #[error("Unmatched name {0}")]
    UnmatchedName(String),
    #[error("Mismatching publication titles and authors ({0} titles, {1} author lists)")]
    MismatchedPublications(usize, usize),
    #[error("Invalid {0}: {1}")]
    InvalidId(&'static str, String),
    #[error("{0} {1} has no matching publication")]
    UnmatchedId(&'static str, String),
}
