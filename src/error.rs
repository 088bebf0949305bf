//! Error types, one enum per concern.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A tick that could not complete.  The loop logs it and keeps the state
/// from before the tick.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("screen index {index} out of range ({count} screens)")]
    ScreenOutOfRange { index: usize, count: usize },
    #[error("{what} left the finite range after the physics step")]
    NonFinite { what: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path}: {message}")]
    Load { path: PathBuf, message: String },
    #[error("invalid value for [{section}] {key}: {reason}")]
    Invalid {
        section: String,
        key: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read sprite sheet {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("sprite sheet {path} has no frames")]
    Empty { path: PathBuf },
    #[error("loader for {path} exited without a result")]
    Disconnected { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio thread is not running")]
    Disconnected,
    #[error("failed to ring terminal bell: {0}")]
    Bell(#[from] io::Error),
}
