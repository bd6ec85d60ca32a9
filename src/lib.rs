// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Bootstrap task for an embedded control-system node.
//!
//! Brings up the network, mounts the remote file tree, synchronizes time,
//! opens the system log, starts the kernel helper layers, runs the startup
//! script and finally hands the console to the command interpreter. Every
//! platform service sits behind a trait so the sequence runs unchanged on
//! the node and, with the `host` feature, as an ordinary process.

/// Bring-up sequence and phase tracking
pub mod bootstrap;

/// Node configuration (TOML, with built-in defaults)
pub mod config;

/// Process-wide boot state
pub mod context;

/// Record-database loading commands
pub mod database;

/// Console diagnostics
pub mod diag;

/// Error types shared by the service boundaries
pub mod error;

/// Fatal error escalation
pub mod escalate;

/// Command interpreter and console boundary
pub mod interp;

/// Kernel service boundary and semaphore table records
pub mod kernel;

/// System log sink
pub mod logsink;

/// Network configuration and stack boundary
pub mod net;

/// Remote path translation
pub mod path;

/// Remote-file substitute boundary
pub mod remote_fs;

/// Startup script runner
pub mod script;

/// Host simulation of the node services
#[cfg(feature = "host")]
pub mod host;
