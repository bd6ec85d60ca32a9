// CLASSIFICATION: COMMUNITY
// Filename: error.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Error types raised at the collaborator boundaries.
//!
//! None of these are recovered from inside the bootstrap task: the
//! bootstrapper either escalates them or prints them and moves on.

use std::io;

use thiserror::Error;

/// Errno-style failure reported by the network stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("network error {code}")]
pub struct NetError {
    /// Raw error number as reported by the stack.
    pub code: i32,
}

impl NetError {
    /// Wrap a raw error number.
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self { code }
    }
}

/// Failures of the remote-file substitute.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("remote filesystem is not mounted")]
    NotMounted,
    #[error("remote filesystem mount failed: {0}")]
    Mount(String),
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Failures of the system log sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("log sink not open")]
    NotOpen,
    #[error("log transport failed: {0}")]
    Transport(String),
}

/// Failures reported by the record/database loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read database {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("malformed database {path}: {reason}")]
    Parse { path: String, reason: String },
}

/// Reasons a logical file name cannot be turned into a remote path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Can't create TFTP path name -- no memory.")]
    NoMemory,
    #[error("Can't convert BOOTP server name")]
    ServerAddress,
    #[error("Can't get host name")]
    HostName,
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
