// CLASSIFICATION: COMMUNITY
// Filename: context.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Process-wide bootstrap state, made explicit.
//!
//! The environment is fixed in the first bring-up step; the server address
//! and host name are captured once the network is up. After that the
//! context is only ever read.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use crate::config::{EnvironmentConfig, RemoteConfig};

/// Shell-like variables visible to the command interpreter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Build the standard node environment (TERM, PS1, HISTSIZE, IFS).
    #[must_use]
    pub fn from_config(cfg: &EnvironmentConfig) -> Self {
        let mut env = Self::default();
        env.set("TERM", &cfg.term);
        env.set("PS1", &cfg.prompt);
        env.set("HISTSIZE", &cfg.history_size.to_string());
        env.set("IFS", &cfg.field_separators);
        env
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_owned(), value.to_owned());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Prompt for the interactive console.
    #[must_use]
    pub fn prompt(&self) -> &str {
        self.get("PS1").unwrap_or("> ")
    }

    /// Characters that split a command line into arguments.
    #[must_use]
    pub fn field_separators(&self) -> &str {
        self.get("IFS").unwrap_or(" \t")
    }
}

/// Fixed parts of every translated remote path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLayout {
    pub mount_root: String,
    pub scope: String,
}

impl From<&RemoteConfig> for RemoteLayout {
    fn from(cfg: &RemoteConfig) -> Self {
        Self {
            mount_root: cfg.mount_prefix(),
            scope: cfg.scope.clone(),
        }
    }
}

/// Identity and layout read by path translation.
#[derive(Debug, Clone)]
pub struct BootContext {
    pub layout: RemoteLayout,
    /// File server negotiated during network bring-up.
    pub server_address: Option<Ipv4Addr>,
    pub hostname: Option<String>,
}

impl BootContext {
    #[must_use]
    pub fn new(layout: RemoteLayout) -> Self {
        Self {
            layout,
            server_address: None,
            hostname: None,
        }
    }

    /// Record the identity learned from the network stack.
    pub fn set_identity(&mut self, server_address: Option<Ipv4Addr>, hostname: Option<String>) {
        self.server_address = server_address;
        self.hostname = hostname;
    }
}
