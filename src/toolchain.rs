//! The external firmware build tool (PlatformIO by default).
//!
//! Runs blocking child processes in the project root. Success is decided by the
//! exit status alone; on failure the captured stderr is surfaced verbatim.
//! These commands never touch the version documents.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument};

use crate::error::{DevError, Result};

/// Where a successful `compile` leaves the firmware image, relative to the root
pub const FIRMWARE_ARTIFACT: &str = ".pio/build/watchy/firmware.bin";

/// Captured output of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs the configured build program
#[derive(Debug, Clone)]
pub struct BuildTool {
    program: String,
    workdir: PathBuf,
}

impl BuildTool {
    pub fn new(program: impl Into<String>, workdir: impl AsRef<Path>) -> Self {
        BuildTool {
            program: program.into(),
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `<program> test`
    pub fn run_tests(&self) -> Result<ToolOutput> {
        self.run(&["test"])
    }

    /// `<program> run`
    pub fn compile(&self) -> Result<ToolOutput> {
        self.run(&["run"])
    }

    /// Run the program with `args` and wait for it to finish
    ///
    /// # Returns
    /// * `Ok(ToolOutput)` - exit code 0
    /// * `Err(DevError::ToolNotFound)` - the program could not be started
    /// * `Err(DevError::ToolFailed)` - non-zero exit, with the captured stderr
    #[instrument(skip(self), fields(program = %self.program))]
    pub fn run(&self, args: &[&str]) -> Result<ToolOutput> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => DevError::ToolNotFound {
                    program: self.program.clone(),
                },
                _ => DevError::Io(e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(status = ?output.status, "tool finished");

        if !output.status.success() {
            return Err(DevError::ToolFailed {
                program: self.program.clone(),
                args: args.join(" "),
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        Ok(ToolOutput { stdout, stderr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_not_found() {
        let tool = BuildTool::new("watchy-dev-no-such-tool", ".");
        let err = tool.compile().unwrap_err();
        assert!(matches!(err, DevError::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_success_captures_stdout() {
        let tool = BuildTool::new("sh", ".");
        let output = tool.run(&["-c", "echo built"]).unwrap();
        assert_eq!(output.stdout, "built\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_surfaces_stderr_and_code() {
        let tool = BuildTool::new("sh", ".");
        let err = tool.run(&["-c", "echo broken >&2; exit 3"]).unwrap_err();
        match err {
            DevError::ToolFailed { code, stderr, args, .. } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "broken\n");
                assert_eq!(args, "-c echo broken >&2; exit 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_workdir() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("platformio.ini"), "").unwrap();
        let tool = BuildTool::new("sh", dir.path());
        assert!(tool.run(&["-c", "test -f platformio.ini"]).is_ok());
    }
}
