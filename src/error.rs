//! Error handling for the pc_probe crate.

use std::path::PathBuf;

/// A specialized `Result` type for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

/// The error type shared by every sampler.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// A kernel pseudo-file could not be opened or read
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The filesystem-statistics call failed
    #[error("statvfs failed for {}: {source}", path.display())]
    Syscall {
        path: PathBuf,
        #[source]
        source: nix::errno::Errno,
    },

    /// A pseudo-file did not have the expected format
    #[error("Failed to parse system information: {0}")]
    Parse(String),

    /// The report could not be encoded
    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProbeError {
    /// Create a new I/O error for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new syscall error for `path`
    pub fn syscall(path: impl Into<PathBuf>, source: nix::errno::Errno) -> Self {
        Self::Syscall {
            path: path.into(),
            source,
        }
    }

    /// Create a new parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
