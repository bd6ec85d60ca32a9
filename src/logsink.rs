// CLASSIFICATION: COMMUNITY
// Filename: logsink.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! System log sink boundary plus a sink that feeds the `log` facade.

use std::sync::Mutex;

use log::Level;

use crate::error::LogError;

/// Syslog priorities accepted by the sink, most severe first.
/// Emergency is left to the kernel itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl Severity {
    /// Numeric syslog priority.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Alert => 1,
            Self::Critical => 2,
            Self::Error => 3,
            Self::Warning => 4,
            Self::Notice => 5,
            Self::Info => 6,
            Self::Debug => 7,
        }
    }

    fn level(self) -> Level {
        match self {
            Self::Alert | Self::Critical | Self::Error => Level::Error,
            Self::Warning => Level::Warn,
            Self::Notice | Self::Info => Level::Info,
            Self::Debug => Level::Debug,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facility {
    Daemon,
}

pub trait LogSink {
    /// Open the sink. Lines written before this fail with [`LogError::NotOpen`].
    fn open(&self, ident: &str, facility: Facility) -> Result<(), LogError>;

    fn write(&self, severity: Severity, line: &str) -> Result<(), LogError>;
}

/// Sink that hands every line to the process logger under target `syslog`.
#[derive(Debug, Default)]
pub struct FacadeSink {
    ident: Mutex<Option<String>>,
}

impl FacadeSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for FacadeSink {
    fn open(&self, ident: &str, _facility: Facility) -> Result<(), LogError> {
        let mut guard = self
            .ident
            .lock()
            .map_err(|_| LogError::Transport("sink lock poisoned".into()))?;
        *guard = Some(ident.to_owned());
        Ok(())
    }

    fn write(&self, severity: Severity, line: &str) -> Result<(), LogError> {
        let guard = self
            .ident
            .lock()
            .map_err(|_| LogError::Transport("sink lock poisoned".into()))?;
        let ident = guard.as_deref().ok_or(LogError::NotOpen)?;
        log::log!(target: "syslog", severity.level(), "<{}> {}: {}", severity.code(), ident, line);
        Ok(())
    }
}
