use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use screens::{CommandMaker, Config};
use study::{Annotation, Study, component::ComponentKind};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub mod cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli::Args::parse().command {
        cli::Command::Screens { basenames, config, study_dir, root, maker, maker_args } =>
            make_screens(basenames, config, study_dir, root, maker, maker_args),
        cli::Command::Study { paths, report } =>
            parse_studies(&paths, report),
    }
}

fn make_screens(
    basenames: Vec<String>,
    config_path: Option<PathBuf>,
    study_dir: Option<PathBuf>,
    root: Option<PathBuf>,
    maker: Option<String>,
    maker_args: Vec<String>,
) -> anyhow::Result<()> {
    let mut config = match &config_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {path:?}"))?,
        None => Config::default(),
    };

    if !basenames.is_empty() {
        config.basenames = basenames;
    }
    if let Some(root) = root {
        config.root = root;
    }
    if let Some(maker) = maker {
        config.maker = maker;
    }
    if !maker_args.is_empty() {
        config.maker_args = maker_args;
    }

    let study_dir = match study_dir {
        Some(dir) => dir,
        None => std::env::current_dir()
            .context("Failed to get current directory")?,
    };
    let study_dir = std::path::absolute(&study_dir)
        .with_context(|| format!("Failed to resolve {study_dir:?}"))?;

    let mut maker = CommandMaker::new(&config.maker, config.maker_args.clone())
        .with_context(|| format!("Failed to set up screen maker '{}'", config.maker))?;
    info!(maker = %maker.program().display(), root = %config.root.display(), "Making {} screens", config.basenames.len());

    screens::run(&study_dir, &config, &mut maker)
        .with_context(|| format!("Failed to make screens for {study_dir:?}"))?;

    Ok(())
}

fn parse_studies(paths: &[PathBuf], report: bool) -> anyhow::Result<()> {
    let mut files = Vec::new();
    for path in paths {
        let found = study::find_study_files(path)
            .with_context(|| format!("Failed to find study files at {path:?}"))?;
        files.extend(found);
    }

    anyhow::ensure!(!files.is_empty(), "No study files found in {paths:?}");

    for file in files {
        let study = Study::load(&file)
            .with_context(|| format!("Failed to parse {file:?}"))?;
        info!("Parsed {} components from {}", study.components.len(), file.display());

        if report {
            print_report(&study, &file);
        }
    }

    Ok(())
}

fn print_report(study: &Study, file: &Path) {
    for kind in ComponentKind::ALL {
        for component in study.components_of(kind) {
            let annotation = Annotation::new(component);
            info!("Generating annotations for {} ({})", annotation.name, file.display());
            print!("{}", annotation.report());
        }
    }
}
