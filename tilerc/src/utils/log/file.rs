use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

const LOG_DIR: &str = "~/.cache/tilerc";
const LOG_FILE_NAME: &str = "log.log";

pub fn add_layer<S>(subscriber: S) -> impl Subscriber + for<'span> LookupSpan<'span>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let layer = log_dir().map(|dir| {
        let writer = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
    });
    subscriber.with(layer)
}

/// The log directory, created if needed.
pub fn log_dir() -> Option<PathBuf> {
    let dir = PathBuf::from(shellexpand::tilde(LOG_DIR).into_owned());
    match std::fs::create_dir_all(&dir) {
        Ok(()) => Some(dir),
        Err(err) => {
            eprintln!("Couldn't create log directory {}: {err}", dir.display());
            None
        }
    }
}
