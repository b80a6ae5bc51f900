//! Startup-once sequencer: a blocking cursor command followed by detached helpers.
//!
//! Launches are fire and forget. A helper that fails to start is logged and
//! skipped, nothing is retried, restarted or waited on.
use crate::errors::Result;
use crate::utils::child_process::{self, ChildID, Children};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use xdg::BaseDirectories;

const MARKER_FILE: &str = "autostart.done";

/// A program and its arguments, started without a shell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ProcessSpec {
    pub fn new<S: Into<String>>(program: impl Into<String>, args: impl IntoIterator<Item = S>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// A command line run through `sh -c`.
    pub fn shell(line: impl Into<String>) -> Self {
        Self::new("sh", ["-c".to_owned(), line.into()])
    }
}

impl fmt::Display for ProcessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AutostartConfig {
    /// Run to completion before anything else, usually to set the pointer theme.
    #[serde(default)]
    pub cursor: Option<ProcessSpec>,
    #[serde(default)]
    pub processes: Vec<ProcessSpec>,
}

/// How processes are started; swapped out in tests.
pub trait Launcher {
    /// # Errors
    ///
    /// Will error if the program cannot be started.
    fn run_blocking(&mut self, spec: &ProcessSpec) -> Result<ExitStatus>;

    /// # Errors
    ///
    /// Will error if the program cannot be started.
    fn spawn_detached(&mut self, spec: &ProcessSpec) -> Result<ChildID>;

    /// Collect children which exited.
    fn reap(&mut self) {}
}

/// Starts real processes.
///
/// Built with [`SystemLauncher::with_child_hook`], children are only walked after a
/// `SIGCHLD`. A default launcher walks them on every [`Launcher::reap`].
#[derive(Debug, Default)]
pub struct SystemLauncher {
    children: Children,
    reap_requested: Option<Arc<AtomicBool>>,
}

impl SystemLauncher {
    /// Registers the `SIGCHLD` hook before anything can be spawned.
    pub fn with_child_hook() -> Self {
        let flag = Arc::new(AtomicBool::new(false));
        child_process::register_child_hook(flag.clone());
        Self {
            children: Children::new(),
            reap_requested: Some(flag),
        }
    }

    /// Children started and not reaped yet.
    pub fn children(&self) -> &Children {
        &self.children
    }
}

impl Launcher for SystemLauncher {
    fn run_blocking(&mut self, spec: &ProcessSpec) -> Result<ExitStatus> {
        child_process::run_blocking(spec)
    }

    fn spawn_detached(&mut self, spec: &ProcessSpec) -> Result<ChildID> {
        child_process::spawn_detached(spec, &mut self.children)
    }

    fn reap(&mut self) {
        let requested = self
            .reap_requested
            .as_ref()
            .map_or(true, |flag| flag.swap(false, Ordering::SeqCst));
        if requested {
            self.children.remove_finished_children();
        }
    }
}

/// Remembers that autostart already ran in this login session.
///
/// The marker file lives in the runtime directory, which is emptied at logout.
#[derive(Debug, Clone, Default)]
pub struct OnceMarker {
    path: Option<PathBuf>,
}

impl OnceMarker {
    /// Only the in-process flag of [`Autostart`] guards against running twice.
    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Marker in `$XDG_RUNTIME_DIR/tilerc/`.
    ///
    /// # Errors
    ///
    /// Will error if there is no runtime directory or it cannot be created.
    pub fn for_session() -> Result<Self> {
        let path = BaseDirectories::with_prefix("tilerc")?.place_runtime_file(MARKER_FILE)?;
        Ok(Self::at(path))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Atomically creates the marker. `Ok(false)` if it already existed.
    ///
    /// # Errors
    ///
    /// Will error if the marker cannot be created for any other reason.
    pub fn claim(&self) -> Result<bool> {
        let Some(path) = &self.path else {
            return Ok(true);
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Default)]
pub struct Autostart {
    fired: bool,
    marker: OnceMarker,
}

impl Autostart {
    pub fn new(marker: OnceMarker) -> Self {
        Self {
            fired: false,
            marker,
        }
    }

    /// Runs the sequence unless it already ran in this session.
    ///
    /// Returns whether the sequence ran. Launch failures do not change the result.
    pub fn run<L: Launcher>(&mut self, config: &AutostartConfig, launcher: &mut L) -> bool {
        if self.fired {
            tracing::debug!("Autostart already ran in this process");
            return false;
        }
        self.fired = true;

        match self.marker.claim() {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!("Autostart already ran in this session, skipping");
                return false;
            }
            Err(err) => {
                tracing::warn!("Unable to record autostart marker, running anyway: {err}");
            }
        }

        if let Some(cursor) = &config.cursor {
            match launcher.run_blocking(cursor) {
                Ok(status) if status.success() => tracing::debug!("Ran `{cursor}`"),
                Ok(status) => tracing::warn!("`{cursor}` exited with {status}"),
                Err(err) => tracing::error!("Unable to run `{cursor}`: {err}"),
            }
        }

        for spec in &config.processes {
            match launcher.spawn_detached(spec) {
                Ok(pid) => tracing::info!("Started `{spec}` (pid {pid})"),
                Err(err) => tracing::error!("Unable to start `{spec}`: {err}"),
            }
        }
        true
    }
}
