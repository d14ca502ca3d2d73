use std::{fs, path::{Path, PathBuf}};

use screens::{Config, MakerError, manifest};

fn config(root: &Path) -> Config {
    Config {
        root: root.to_path_buf(),
        ..Config::default()
    }
}

/// Writes the label into the screen file, like a well-behaved make_screen.
fn write_label(_source: &Path, destination: &Path, label: &str) -> Result<(), MakerError> {
    fs::write(destination, label)?;
    Ok(())
}

#[test]
fn writes_one_row_per_basename_in_order() {
    let study = tempfile::tempdir().unwrap();
    let config = config(Path::new("/data"));
    let mut calls = Vec::new();

    let mut maker = |source: &Path, destination: &Path, label: &str| -> Result<(), MakerError> {
        calls.push((source.to_path_buf(), label.to_string()));
        write_label(source, destination, label)
    };
    let entries = screens::run(study.path(), &config, &mut maker).unwrap();

    let manifest_path = study.path().join("screenA/plates.tsv");
    let content = fs::read_to_string(&manifest_path).unwrap();
    assert_eq!(content, "\
10x images plate 1\t../screens/10x images plate 1.screen
10x images plate 2\t../screens/10x images plate 2.screen
10x images plate 3\t../screens/10x images plate 3.screen
");
    assert_eq!(manifest::read(&manifest_path).unwrap(), entries);

    assert_eq!(calls, [
        (PathBuf::from("/data/10x images plate 1"), "10x images plate 1".to_string()),
        (PathBuf::from("/data/10x images plate 2"), "10x images plate 2".to_string()),
        (PathBuf::from("/data/10x images plate 3"), "10x images plate 3".to_string()),
    ]);

    for basename in &config.basenames {
        let screen = study.path().join("screens").join(format!("{basename}.screen"));
        assert_eq!(fs::read_to_string(screen).unwrap(), *basename);
    }
}

#[test]
fn rerun_truncates_manifest() {
    let study = tempfile::tempdir().unwrap();
    let config = config(Path::new("/data"));

    screens::run(study.path(), &config, &mut write_label).unwrap();
    screens::run(study.path(), &config, &mut write_label).unwrap();

    let rows = manifest::read(study.path().join("screenA/plates.tsv")).unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn duplicate_basenames_are_written_twice() {
    let study = tempfile::tempdir().unwrap();
    let config = Config {
        basenames: vec!["p1".to_string(), "p1".to_string()],
        ..config(Path::new("/data"))
    };

    let entries = screens::run(study.path(), &config, &mut write_label).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], entries[1]);
}

#[test]
fn maker_failure_leaves_completed_rows() {
    let study = tempfile::tempdir().unwrap();
    let config = config(Path::new("/data"));

    let mut maker = |source: &Path, destination: &Path, label: &str| -> Result<(), MakerError> {
        if label.ends_with('2') {
            return Err("plate could not be read".into());
        }
        write_label(source, destination, label)
    };
    let err = screens::run(study.path(), &config, &mut maker).unwrap_err();

    assert!(matches!(
        err,
        screens::Error::Manifest(manifest::Error::Maker(ref basename, _)) if basename == "10x images plate 2"
    ));

    let rows = manifest::read(study.path().join("screenA/plates.tsv")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].basename, "10x images plate 1");
}

#[test]
fn directory_failure_aborts_before_manifest() {
    let study = tempfile::tempdir().unwrap();
    fs::write(study.path().join("screens"), "in the way").unwrap();
    let mut called = false;

    let mut maker = |_: &Path, _: &Path, _: &str| -> Result<(), MakerError> {
        called = true;
        Ok(())
    };
    let err = screens::run(study.path(), &config(Path::new("/data")), &mut maker).unwrap_err();

    assert!(matches!(err, screens::Error::Directory(_)));
    assert!(!called);
    assert!(!study.path().join("screenA/plates.tsv").exists());
}

#[test]
fn existing_directories_are_reused() {
    let study = tempfile::tempdir().unwrap();
    fs::create_dir_all(study.path().join("screens")).unwrap();
    fs::create_dir_all(study.path().join("screenA")).unwrap();

    let entries = screens::run(study.path(), &config(Path::new("/data")), &mut write_label).unwrap();
    assert_eq!(entries.len(), 3);
}

#[test]
fn basenames_outside_the_root_are_rejected_before_writing() {
    let study = tempfile::tempdir().unwrap();
    let outside = study.path().join("elsewhere");
    let mut called = false;

    for basename in [outside.to_string_lossy().into_owned(), "plates/1".to_string(), "plate\t1".to_string()] {
        let config = Config {
            basenames: vec!["10x images plate 1".to_string(), basename.clone()],
            ..config(Path::new("/data"))
        };

        let mut maker = |_: &Path, _: &Path, _: &str| -> Result<(), MakerError> {
            called = true;
            Ok(())
        };
        let err = screens::run(study.path(), &config, &mut maker).unwrap_err();

        assert!(matches!(
            err,
            screens::Error::Manifest(manifest::Error::InvalidBasename(ref b)) if *b == basename
        ));
    }

    assert!(!called);
    assert!(!study.path().join("screenA/plates.tsv").exists());
    assert!(!study.path().join("elsewhere.screen").exists());
}
