//! Multiplexer primitives and their tmux implementation.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use tracing::{debug, info};

use crate::config::Orientation;

use super::errors::TmuxError;
use super::executor::TmuxCommandRunner;

/// Ids of a newly created window and its first pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWindow {
    pub window_id: String,
    pub pane_id: String,
}

/// The provisioning and introspection calls the session driver needs.
pub trait Multiplexer {
    fn session_exists(&self, name: &str) -> Result<bool, TmuxError>;

    fn list_sessions(&self) -> Result<Vec<String>, TmuxError>;

    /// Session currently attached to this terminal, if any.
    fn attached_session(&self) -> Option<String>;

    /// Create an empty session shell rooted at `base_path`.
    fn create_session(&self, name: &str, base_path: &Path) -> Result<(), TmuxError>;

    fn create_window(&self, session: &str, name: &str, path: &Path)
    -> Result<NewWindow, TmuxError>;

    /// Split `target_pane`; returns the new pane id.
    fn create_pane(
        &self,
        target_pane: &str,
        orientation: Orientation,
        size: Option<u8>,
        path: &Path,
    ) -> Result<String, TmuxError>;

    fn run_command(&self, pane: &str, command: &str) -> Result<(), TmuxError>;

    fn apply_layout(&self, window: &str, layout: &str) -> Result<(), TmuxError>;

    fn select_window(&self, window: &str) -> Result<(), TmuxError>;

    fn select_pane(&self, pane: &str) -> Result<(), TmuxError>;

    fn attach(&self, session: &str) -> Result<(), TmuxError>;

    fn kill_session(&self, session: &str) -> Result<(), TmuxError>;
}

/// Exact-match session target.
fn session_target(name: &str) -> String {
    format!("={name}")
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

fn no_server(err: &TmuxError) -> bool {
    match err {
        TmuxError::CommandFailed { message, .. } => {
            message.contains("no server running") || message.contains("error connecting to")
        }
        _ => false,
    }
}

/// [`Multiplexer`] driving tmux through a [`TmuxCommandRunner`].
///
/// tmux cannot hold a session without windows, so `create_session` opens a
/// placeholder window which is killed once the first real window exists.
pub struct TmuxMultiplexer<R: TmuxCommandRunner> {
    runner: R,
    inside_tmux: bool,
    placeholders: Mutex<HashMap<String, String>>,
}

impl<R: TmuxCommandRunner> TmuxMultiplexer<R> {
    /// Detect an enclosing tmux client from `$TMUX`.
    pub fn new(runner: R) -> Self {
        let inside_tmux = std::env::var("TMUX").is_ok_and(|v| !v.is_empty());
        Self::with_client(runner, inside_tmux)
    }

    pub fn with_client(runner: R, inside_tmux: bool) -> Self {
        Self {
            runner,
            inside_tmux,
            placeholders: Mutex::new(HashMap::new()),
        }
    }

    fn single_line(&self, args: &[&str]) -> Result<String, TmuxError> {
        let output = self.runner.run(args)?;
        let line = output.trim();
        if line.is_empty() {
            return Err(TmuxError::UnexpectedOutput {
                command: args.first().copied().unwrap_or_default().to_string(),
                output,
            });
        }
        Ok(line.to_string())
    }

    fn take_placeholder(&self, session: &str) -> Option<String> {
        match self.placeholders.lock() {
            Ok(mut map) => map.remove(session),
            Err(poisoned) => poisoned.into_inner().remove(session),
        }
    }

    fn store_placeholder(&self, session: &str, window_id: String) {
        match self.placeholders.lock() {
            Ok(mut map) => map.insert(session.to_string(), window_id),
            Err(poisoned) => poisoned.into_inner().insert(session.to_string(), window_id),
        };
    }
}

impl<R: TmuxCommandRunner> Multiplexer for TmuxMultiplexer<R> {
    fn session_exists(&self, name: &str) -> Result<bool, TmuxError> {
        Ok(self.list_sessions()?.iter().any(|s| s == name))
    }

    fn list_sessions(&self) -> Result<Vec<String>, TmuxError> {
        match self.runner.run(&["list-sessions", "-F", "#{session_name}"]) {
            Ok(output) => Ok(output
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if no_server(&e) => {
                debug!(event = "core.tmux.no_server");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn attached_session(&self) -> Option<String> {
        if !self.inside_tmux {
            return None;
        }
        self.single_line(&["display-message", "-p", "#{session_name}"])
            .ok()
    }

    fn create_session(&self, name: &str, base_path: &Path) -> Result<(), TmuxError> {
        let base = path_arg(base_path);
        let placeholder = self.single_line(&[
            "new-session",
            "-d",
            "-s",
            name,
            "-c",
            base.as_str(),
            "-P",
            "-F",
            "#{window_id}",
        ])?;
        self.store_placeholder(name, placeholder);
        info!(event = "core.tmux.session_created", session = name);
        Ok(())
    }

    fn create_window(
        &self,
        session: &str,
        name: &str,
        path: &Path,
    ) -> Result<NewWindow, TmuxError> {
        let target = format!("{}:", session_target(session));
        let path = path_arg(path);
        let line = self.single_line(&[
            "new-window",
            "-d",
            "-t",
            target.as_str(),
            "-n",
            name,
            "-c",
            path.as_str(),
            "-P",
            "-F",
            "#{window_id} #{pane_id}",
        ])?;

        let window = match line.split_once(' ') {
            Some((window_id, pane_id)) => NewWindow {
                window_id: window_id.to_string(),
                pane_id: pane_id.to_string(),
            },
            None => {
                return Err(TmuxError::UnexpectedOutput {
                    command: "new-window".to_string(),
                    output: line,
                });
            }
        };

        if let Some(placeholder) = self.take_placeholder(session) {
            self.runner
                .run(&["kill-window", "-t", placeholder.as_str()])?;
        }

        Ok(window)
    }

    fn create_pane(
        &self,
        target_pane: &str,
        orientation: Orientation,
        size: Option<u8>,
        path: &Path,
    ) -> Result<String, TmuxError> {
        let direction = match orientation {
            Orientation::Horizontal => "-h",
            Orientation::Vertical => "-v",
        };
        let path = path_arg(path);
        let size_arg = size.map(|s| format!("{s}%"));

        let mut args = vec![
            "split-window",
            "-d",
            direction,
            "-t",
            target_pane,
            "-c",
            path.as_str(),
        ];
        if let Some(size_arg) = &size_arg {
            args.extend(["-l", size_arg.as_str()]);
        }
        args.extend(["-P", "-F", "#{pane_id}"]);

        self.single_line(&args)
    }

    fn run_command(&self, pane: &str, command: &str) -> Result<(), TmuxError> {
        self.runner
            .run(&["send-keys", "-t", pane, command, "Enter"])
            .map(|_| ())
    }

    fn apply_layout(&self, window: &str, layout: &str) -> Result<(), TmuxError> {
        self.runner
            .run(&["select-layout", "-t", window, layout])
            .map(|_| ())
    }

    fn select_window(&self, window: &str) -> Result<(), TmuxError> {
        self.runner.run(&["select-window", "-t", window]).map(|_| ())
    }

    fn select_pane(&self, pane: &str) -> Result<(), TmuxError> {
        self.runner.run(&["select-pane", "-t", pane]).map(|_| ())
    }

    fn attach(&self, session: &str) -> Result<(), TmuxError> {
        let target = session_target(session);
        if self.inside_tmux {
            self.runner.run_interactive(&["switch-client", "-t", target.as_str()])
        } else {
            self.runner.run_interactive(&["attach-session", "-t", target.as_str()])
        }
    }

    fn kill_session(&self, session: &str) -> Result<(), TmuxError> {
        let target = session_target(session);
        self.runner
            .run(&["kill-session", "-t", target.as_str()])
            .map(|_| ())?;
        info!(event = "core.tmux.session_killed", session = session);
        Ok(())
    }
}
