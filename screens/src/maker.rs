use std::{ffi::OsStr, io, path::{Path, PathBuf}, process::{Command, ExitStatus, Stdio}};

use tracing::debug;
use which::which;

pub type MakerError = Box<dyn std::error::Error + Send + Sync>;

/// Produces the screen file for one source directory.
pub trait ScreenMaker {
    fn make_screen(&mut self, source: &Path, destination: &Path, label: &str) -> Result<(), MakerError>;
}

impl<F> ScreenMaker for F
where
    F: FnMut(&Path, &Path, &str) -> Result<(), MakerError>,
{
    fn make_screen(&mut self, source: &Path, destination: &Path, label: &str) -> Result<(), MakerError> {
        self(source, destination, label)
    }
}

/// Runs an external program as `<program> [args...] <source> <destination> <label>`.
#[derive(Debug, Clone)]
pub struct CommandMaker {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandMaker {
    pub fn new(program: impl AsRef<OsStr>, args: Vec<String>) -> Result<Self, CommandError> {
        let program = program.as_ref();
        let program = which(program)
            .map_err(|e| CommandError::NotFound(program.to_string_lossy().into_owned(), e))?;
        Ok(Self { program, args })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl ScreenMaker for CommandMaker {
    fn make_screen(&mut self, source: &Path, destination: &Path, label: &str) -> Result<(), MakerError> {
        debug!(program = %self.program.display(), label, "Running screen maker");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(source)
            .arg(destination)
            .arg(label)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| CommandError::Spawn(self.program.clone(), e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(label, "{}", stdout.trim_end());
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(CommandError::Failed(self.program.clone(), output.status, stderr).into());
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unable to find screen maker '{0}'")]
    NotFound(String, #[source] which::Error),
    #[error("Failed to run {0:?}")]
    Spawn(PathBuf, #[source] io::Error),
    #[error("{0:?} exited with {1}:\n\t{2}")]
    Failed(PathBuf, ExitStatus, String),
}
