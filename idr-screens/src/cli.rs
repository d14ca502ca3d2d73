use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tools for preparing IDR screen imports and study annotations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Make a screen file for every basename and write the plate manifest
    Screens {
        /// Basenames to process instead of the configured ones
        basenames: Vec<String>,

        /// TOML file with root, basenames, screens, manifest, maker and maker_args
        #[arg(short, long, default_value = None)]
        config: Option<PathBuf>,
        /// Directory the screens directory and manifest are placed in [default: current directory]
        #[arg(short, long, default_value = None)]
        study_dir: Option<PathBuf>,
        /// Dataset root holding one directory per basename
        #[arg(short, long, default_value = None)]
        root: Option<PathBuf>,
        /// Program producing a screen file from <source> <destination> <label>
        #[arg(short, long, default_value = None)]
        maker: Option<String>,
        /// Extra argument passed to the maker before the paths, may be repeated
        #[arg(long = "maker-arg", allow_hyphen_values = true)]
        maker_args: Vec<String>,
    },
    /// Parse study files, or directories containing them
    Study {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print the annotations generated for every experiment and screen
        #[arg(long, default_value_t = false)]
        report: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screens_arguments() {
        let args = Args::try_parse_from([
            "idr-screens", "screens", "plate 1", "plate 2",
            "--root", "/data", "--maker-arg", "--verbose", "--maker-arg", "-q",
        ]).unwrap();

        let Command::Screens { basenames, root, maker_args, config, .. } = args.command else {
            panic!("expected screens command");
        };
        assert_eq!(basenames, ["plate 1", "plate 2"]);
        assert_eq!(root, Some(PathBuf::from("/data")));
        assert_eq!(maker_args, ["--verbose", "-q"]);
        assert_eq!(config, None);
    }

    #[test]
    fn study_requires_a_path() {
        assert!(Args::try_parse_from(["idr-screens", "study", "--report"]).is_err());

        let args = Args::try_parse_from(["idr-screens", "study", "idr0001-study.txt", "--report"]).unwrap();
        assert!(matches!(args.command, Command::Study { report: true, ref paths } if paths.len() == 1));
    }
}
