// CLASSIFICATION: COMMUNITY
// Filename: path.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Translation of logical file names into remote-transfer paths.
//!
//! Every file the node touches lives under
//! `<mount-root><server-address>/<scope>/<hostname>/`. That directory is the
//! node's root, so leading `./` and `../` segments are discarded rather than
//! rejected.

use std::fmt::{self, Write as _};

use log::debug;

use crate::context::BootContext;
use crate::error::PathError;
use crate::escalate::FailureEscalator;

/// Capacity reserved for the mount-root/address/scope/host prefix.
pub const PATH_CAPACITY: usize = 200;

/// Fully qualified remote path. Owned by the call that built it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath(String);

impl RemotePath {
    /// Wrap a path that is already fully qualified.
    #[must_use]
    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Drop the leading run of `./` and `../` segments. Only the start of the
/// name is touched; `a/../b` is kept as is.
#[must_use]
pub fn strip_relative_prefix(mut name: &str) -> &str {
    loop {
        if let Some(rest) = name.strip_prefix("./") {
            name = rest;
        } else if let Some(rest) = name.strip_prefix("../") {
            name = rest;
        } else {
            return name;
        }
    }
}

/// Build the remote path for `name` without escalating.
pub fn build_remote_path(ctx: &BootContext, name: &str) -> Result<RemotePath, PathError> {
    let mut path = String::new();
    path.try_reserve(PATH_CAPACITY)
        .map_err(|_| PathError::NoMemory)?;
    path.push_str(&ctx.layout.mount_root);

    let server = ctx.server_address.ok_or(PathError::ServerAddress)?;
    write!(path, "{server}").map_err(|_| PathError::ServerAddress)?;
    if path.len() >= PATH_CAPACITY {
        return Err(PathError::ServerAddress);
    }

    path.push('/');
    path.push_str(&ctx.layout.scope);
    path.push('/');

    let host = ctx
        .hostname
        .as_deref()
        .filter(|h| !h.is_empty())
        .ok_or(PathError::HostName)?;
    // gethostname() semantics: the name plus its terminator must fit.
    if path.len() + host.len() >= PATH_CAPACITY {
        return Err(PathError::HostName);
    }
    path.push_str(host);
    path.push('/');

    let name = strip_relative_prefix(name);
    path.try_reserve_exact(name.len())
        .map_err(|_| PathError::NoMemory)?;
    path.push_str(name);
    path.shrink_to_fit();
    Ok(RemotePath(path))
}

/// Path translator bound to the boot context. Failures are fatal.
#[derive(Clone, Copy)]
pub struct PathTranslator<'a> {
    ctx: &'a BootContext,
    escalator: FailureEscalator<'a>,
}

impl<'a> PathTranslator<'a> {
    #[must_use]
    pub fn new(ctx: &'a BootContext, escalator: FailureEscalator<'a>) -> Self {
        Self { ctx, escalator }
    }

    pub fn translate(&self, name: &str) -> RemotePath {
        match build_remote_path(self.ctx, name) {
            Ok(path) => {
                debug!("[path] {name} -> {path}");
                path
            }
            Err(err) => self.escalator.fatal(format_args!("{err}")),
        }
    }
}
