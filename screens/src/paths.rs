use std::path::{Component, Path, PathBuf};

use crate::config::Config;

pub const SCREEN_EXTENSION: &str = "screen";

/// Every path a manifest run touches, resolved against one study directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub screens_dir: PathBuf,
    pub manifest: PathBuf,
    /// The screens directory as seen from the manifest's directory.
    pub relative_screens: PathBuf,
}

impl Layout {
    pub fn resolve(study_dir: &Path, config: &Config) -> Self {
        let screens_dir = study_dir.join(&config.screens);
        let manifest = study_dir.join(&config.manifest);
        let manifest_dir = manifest.parent().unwrap_or(study_dir);
        let relative_screens = relative_path(manifest_dir, &screens_dir);

        Self {
            root: config.root.clone(),
            screens_dir,
            manifest,
            relative_screens,
        }
    }

    pub fn manifest_dir(&self) -> &Path {
        self.manifest.parent().unwrap_or(Path::new("."))
    }

    /// `<root>/<basename>`
    pub fn source_dir(&self, basename: &str) -> PathBuf {
        self.root.join(basename)
    }

    /// `<screens>/<basename>.screen`
    pub fn screen_file(&self, basename: &str) -> PathBuf {
        self.screens_dir.join(screen_name(basename))
    }

    /// `<relative screens>/<basename>.screen`, as written to the manifest
    pub fn relative_screen_file(&self, basename: &str) -> String {
        self.relative_screens.join(screen_name(basename))
            .to_string_lossy()
            .into_owned()
    }
}

// Not `with_extension`: basenames may contain dots.
fn screen_name(basename: &str) -> String {
    format!("{basename}.{SCREEN_EXTENSION}")
}

/// Lexical path from the directory `from` to `to`. Neither path is touched on disk,
/// so both should be absolute or both relative to the same base.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from = normalize(from);
    let to = normalize(to);

    let common = from.iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut path = PathBuf::new();
    for _ in common..from.len() {
        path.push(Component::ParentDir);
    }
    for component in &to[common..] {
        path.push(component);
    }

    if path.as_os_str().is_empty() {
        path.push(Component::CurDir);
    }

    path
}

fn normalize(path: &Path) -> Vec<Component<'_>> {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => { components.pop(); },
                Some(Component::RootDir | Component::Prefix(_)) => {},
                _ => components.push(component),
            },
            _ => components.push(component),
        }
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_points_manifest_at_sibling_screens() {
        let layout = Layout::resolve(Path::new("/studies/idr0001"), &Config::default());

        assert_eq!(layout.screens_dir, PathBuf::from("/studies/idr0001/screens"));
        assert_eq!(layout.manifest, PathBuf::from("/studies/idr0001/screenA/plates.tsv"));
        assert_eq!(layout.manifest_dir(), Path::new("/studies/idr0001/screenA"));
        assert_eq!(layout.relative_screens, PathBuf::from("../screens"));
    }

    #[test]
    fn basename_paths() {
        let layout = Layout::resolve(Path::new("/studies/idr0001"), &Config::default());
        let basename = "10x images plate 1";

        assert_eq!(layout.source_dir(basename), PathBuf::from("/uod/idr/filesets/10x images plate 1"));
        assert_eq!(layout.screen_file(basename), PathBuf::from("/studies/idr0001/screens/10x images plate 1.screen"));
        assert_eq!(layout.relative_screen_file(basename), "../screens/10x images plate 1.screen");
        assert_eq!(layout.relative_screen_file("plate.v2"), "../screens/plate.v2.screen");
    }

    #[test]
    fn relative_paths() {
        assert_eq!(relative_path(Path::new("/a/b"), Path::new("/a/c")), PathBuf::from("../c"));
        assert_eq!(relative_path(Path::new("/a/b"), Path::new("/a/b/c/d")), PathBuf::from("c/d"));
        assert_eq!(relative_path(Path::new("/a/b/c"), Path::new("/a")), PathBuf::from("../.."));
        assert_eq!(relative_path(Path::new("/a/./b/../b"), Path::new("/a/b")), PathBuf::from("."));
        assert_eq!(relative_path(Path::new("x"), Path::new("y/z")), PathBuf::from("../y/z"));
    }

    #[test]
    fn manifest_in_study_dir_sees_screens_directly() {
        let config = Config {
            manifest: PathBuf::from("plates.tsv"),
            ..Config::default()
        };
        let layout = Layout::resolve(Path::new("/studies/idr0001"), &config);
        assert_eq!(layout.relative_screen_file("p1"), "screens/p1.screen");
    }
}
