//! Starts detached helper programs and keeps just enough track of them to reap them.
use crate::autostart::ProcessSpec;
use crate::errors::Result;
use std::collections::HashMap;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{atomic::AtomicBool, Arc};

pub type ChildID = u32;

/// A struct managing children processes.
#[derive(Debug, Default)]
pub struct Children {
    inner: HashMap<ChildID, Child>,
}

impl Children {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
    /// Insert a `Child` in the `Children`.
    ///
    /// # Returns
    /// - `true` if `child` is a new child-process
    /// - `false` if `child` is already known
    pub fn insert(&mut self, child: Child) -> bool {
        self.inner.insert(child.id(), child).is_none()
    }

    /// Remove all children processes which finished
    pub fn remove_finished_children(&mut self) {
        self.inner
            .retain(|_, child| child.try_wait().map_or(true, |ret| ret.is_none()));
    }
}

/// Register the `SIGCHLD` signal handler. Once the signal is received,
/// the flag will be set true. User needs to manually clear the flag.
pub fn register_child_hook(flag: Arc<AtomicBool>) {
    _ = signal_hook::flag::register(signal_hook::consts::signal::SIGCHLD, flag)
        .map_err(|err| tracing::error!("Cannot register SIGCHLD signal handler: {:?}", err));
}

/// Starts `spec` without waiting for it.
/// Assumes STDIN/STDERR/STDOUT unwanted.
///
/// # Errors
///
/// Will error if the program cannot be started (not found, not executable).
pub fn spawn_detached(spec: &ProcessSpec, children: &mut Children) -> Result<ChildID> {
    let child = Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    let pid = child.id();
    children.insert(child);
    Ok(pid)
}

/// Runs `spec` to completion.
///
/// # Errors
///
/// Will error if the program cannot be started.
pub fn run_blocking(spec: &ProcessSpec) -> Result<ExitStatus> {
    Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_children_are_reaped() {
        let mut children = Children::new();
        let spec = ProcessSpec::new("true", Vec::<String>::new());
        let pid = spawn_detached(&spec, &mut children).unwrap();
        assert!(pid > 0);
        assert_eq!(children.len(), 1);

        let mut attempts = 0;
        while !children.is_empty() && attempts < 100 {
            std::thread::sleep(std::time::Duration::from_millis(10));
            children.remove_finished_children();
            attempts += 1;
        }
        assert!(children.is_empty());
    }

    #[test]
    fn missing_program_is_an_error() {
        let mut children = Children::new();
        let spec = ProcessSpec::new("tilerc-no-such-program", Vec::<String>::new());
        assert!(spawn_detached(&spec, &mut children).is_err());
        assert!(children.is_empty());
        assert!(run_blocking(&spec).is_err());
    }

    #[test]
    fn blocking_run_reports_status() {
        let spec = ProcessSpec::new("sh", ["-c", "exit 3"]);
        assert_eq!(run_blocking(&spec).unwrap().code(), Some(3));
    }
}
