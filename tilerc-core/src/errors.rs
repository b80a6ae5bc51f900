use thiserror::Error;

pub type Result<T> = std::result::Result<T, TileError>;

#[derive(Debug, Error)]
pub enum TileError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("XDG error: {0}")]
    XdgBaseDirError(#[from] xdg::BaseDirectoriesError),
    #[error("Command `{0}` timed out")]
    Timeout(String),
    #[error("Command `{command}` exited with {status}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
    },
    #[error("Command output is not valid UTF-8")]
    InvalidOutput(#[from] std::string::FromUtf8Error),
    #[error("Empty command line")]
    EmptyCommand,
}
