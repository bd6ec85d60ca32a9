// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Node configuration. Every field has a built-in default so a node with no
//! config file boots exactly like the stock image.

use std::fs;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming the active config file.
pub const CONFIG_ENV: &str = "NODEBOOT_CONFIG";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct NodeConfig {
    pub environment: EnvironmentConfig,
    pub remote: RemoteConfig,
    pub log: LogConfig,
    pub network: NetworkTuning,
    pub kernel: KernelConfig,
    pub host: HostConfig,
}

/// Shell-like variables established before anything else runs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub term: String,
    pub prompt: String,
    pub history_size: u32,
    pub field_separators: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            term: "xterm".into(),
            prompt: "rtems> ".into(),
            history_size: 10,
            field_separators: " \t,()".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemoteConfig {
    /// Mount point of the remote-file substitute.
    pub mount_root: String,
    /// Directory segment between the server address and the host name.
    pub scope: String,
    pub startup_script: String,
    /// Pause between the startup script and the interactive console.
    pub settle_delay_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            mount_root: "/TFTP/".into(),
            scope: "epics".into(),
            startup_script: "st.cmd".into(),
            settle_delay_ms: 2000,
        }
    }
}

impl RemoteConfig {
    /// Mount root with exactly one trailing `/`, ready to prefix a server
    /// address.
    #[must_use]
    pub fn mount_prefix(&self) -> String {
        format!("{}/", self.mount_root.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub ident: String,
    pub startup_notice: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            ident: "IOC".into(),
            startup_notice: "IOC started.".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkTuning {
    pub bootp: bool,
    pub task_priority: u32,
    pub mbuf_bytes: usize,
    pub mbuf_cluster_bytes: usize,
}

impl Default for NetworkTuning {
    fn default() -> Self {
        Self {
            bootp: true,
            task_priority: 120,
            mbuf_bytes: 150 * 1024,
            mbuf_cluster_bytes: 300 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct KernelConfig {
    pub microseconds_per_tick: u32,
    pub max_semaphores: usize,
    pub max_tasks: usize,
    pub init_task_priority: u32,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            microseconds_per_tick: 20_000,
            max_semaphores: 220,
            max_tasks: 80,
            init_task_priority: 220,
        }
    }
}

impl KernelConfig {
    /// Tick rate implied by the tick length.
    #[must_use]
    pub fn ticks_per_second(&self) -> u32 {
        (1_000_000 / self.microseconds_per_tick.max(1)).max(1)
    }
}

/// Identity and fixtures used only by the host simulation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    pub server_address: Option<Ipv4Addr>,
    pub hostname: Option<String>,
    pub tftp_root: PathBuf,
    pub time_server: Option<String>,
    pub drivers: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            server_address: Some(Ipv4Addr::LOCALHOST),
            hostname: None,
            tftp_root: PathBuf::from("tftpboot"),
            time_server: None,
            drivers: Vec::new(),
        }
    }
}

impl NodeConfig {
    /// Parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&data).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse TOML text.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load the file named by `NODEBOOT_CONFIG`, falling back to defaults.
    pub fn load_active() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("[config] using defaults: {err}");
                Self::default()
            }
        }
    }
}
