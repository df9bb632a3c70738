//! `TmuxCommandRunner` and the subprocess-backed `TmuxExecutor`.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use super::errors::TmuxError;

/// Runs tmux subcommands. Mockable for tests.
pub trait TmuxCommandRunner {
    /// Run a command and return its stdout.
    fn run(&self, args: &[&str]) -> Result<String, TmuxError>;

    /// Run a command that takes over the terminal (attach, switch-client).
    fn run_interactive(&self, args: &[&str]) -> Result<(), TmuxError>;
}

impl<T: TmuxCommandRunner + ?Sized> TmuxCommandRunner for &T {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        (**self).run(args)
    }

    fn run_interactive(&self, args: &[&str]) -> Result<(), TmuxError> {
        (**self).run_interactive(args)
    }
}

fn subcommand(args: &[&str]) -> String {
    args.first().copied().unwrap_or_default().to_string()
}

pub struct TmuxExecutor {
    tmux_bin: PathBuf,
}

impl TmuxExecutor {
    pub fn new(tmux_bin: impl Into<PathBuf>) -> Self {
        Self {
            tmux_bin: tmux_bin.into(),
        }
    }

    /// Locate `tmux` on PATH.
    pub fn locate() -> Result<Self, TmuxError> {
        which::which("tmux")
            .map(Self::new)
            .map_err(|_| TmuxError::BinaryNotFound)
    }
}

impl TmuxCommandRunner for TmuxExecutor {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        debug!(event = "core.tmux.run", args = ?args);

        let output = Command::new(&self.tmux_bin)
            .args(args)
            .output()
            .map_err(|source| TmuxError::Io {
                command: subcommand(args),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TmuxError::CommandFailed {
                command: subcommand(args),
                message: format!(
                    "exit code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_interactive(&self, args: &[&str]) -> Result<(), TmuxError> {
        debug!(event = "core.tmux.run_interactive", args = ?args);

        let status = Command::new(&self.tmux_bin)
            .args(args)
            .status()
            .map_err(|source| TmuxError::Io {
                command: subcommand(args),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(TmuxError::CommandFailed {
                command: subcommand(args),
                message: format!("exit code {}", status.code().unwrap_or(-1)),
            })
        }
    }
}
