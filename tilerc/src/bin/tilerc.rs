//! Session daemon: runs autostart once, keeps the battery text current and reloads on SIGHUP.
use anyhow::Result;
use clap::{arg, command, value_parser};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tilerc::utils::{get_help_template, log::setup_logging};
use tilerc::Config;
use tilerc_core::autostart::OnceMarker;
use tilerc_core::{Session, SystemLauncher};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;

fn main() -> Result<()> {
    let matches = command!("tilerc")
        .about("Starts the session helpers and publishes the battery text")
        .help_template(get_help_template())
        .args(&[
            arg!(-c --config <FILE> "Use this configuration file instead of the default one.")
                .value_parser(value_parser!(PathBuf)),
        ])
        .get_matches();

    let config_path = matches.get_one::<PathBuf>("config").cloned();
    let config = tilerc::load_from(config_path.as_deref());
    setup_logging(&config.log_level);
    tracing::info!("tilerc booting...");

    let marker = OnceMarker::for_session().unwrap_or_else(|err| {
        tracing::warn!("No runtime directory, autostart is only guarded in this process: {err}");
        OnceMarker::in_memory()
    });

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(config, config_path, marker))
}

async fn run(config: Config, config_path: Option<PathBuf>, marker: OnceMarker) -> Result<()> {
    let mut status_file = status_path(&config);
    // the SIGCHLD hook is armed before autostart spawns anything
    let mut session = Session::new(config, SystemLauncher::with_child_hook(), marker);
    if !session.start() {
        tracing::debug!("Autostart already ran in this session");
    }

    let mut hangup = signal(SignalKind::hangup())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut reap = tokio::time::interval(Duration::from_secs(1));
    let mut battery = session.subscribe_battery();

    loop {
        tokio::select! {
            _ = hangup.recv() => {
                session.reload(tilerc::load_from(config_path.as_deref()));
                status_file = status_path(session.config());
                battery = session.subscribe_battery();
            }
            _ = terminate.recv() => break,
            _ = interrupt.recv() => break,
            Some(text) = next_battery(&mut battery) => {
                if let Some(path) = &status_file {
                    write_status(path, &text);
                }
            }
            _ = reap.tick() => session.reap_children(),
        }
    }

    session.reap_children();
    tracing::info!(
        "tilerc exiting, {} helpers left running",
        session.launcher().children().len()
    );
    Ok(())
}

fn status_path(config: &Config) -> Option<PathBuf> {
    config
        .battery_status_path()
        .map_err(|err| tracing::warn!("Battery text will not be published: {err}"))
        .ok()
}

/// Next battery text, `None` once the reader of this load is done.
async fn next_battery(rx: &mut Option<watch::Receiver<Option<String>>>) -> Option<String> {
    let receiver = rx.as_mut()?;
    loop {
        if receiver.changed().await.is_err() {
            *rx = None;
            return None;
        }
        if let Some(text) = receiver.borrow_and_update().clone() {
            return Some(text);
        }
    }
}

fn write_status(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            tracing::debug!("Unable to create {}: {err}", parent.display());
        }
    }
    match fs::write(path, text) {
        Ok(()) => tracing::debug!("Battery text `{text}` written to {}", path.display()),
        Err(err) => tracing::error!("Unable to write {}: {err}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_file_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tilerc").join("battery");
        write_status(&path, "87%");
        assert_eq!(fs::read_to_string(&path).unwrap(), "87%");
    }

    #[test]
    fn unusable_status_directory_is_only_logged() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("tilerc");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("battery");
        write_status(&path, "87%");
        assert!(!path.exists());
    }
}
