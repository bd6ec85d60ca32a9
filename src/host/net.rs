// CLASSIFICATION: COMMUNITY
// Filename: net.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

use std::io::{self, Write};
use std::net::Ipv4Addr;
use std::sync::Mutex;

use log::{debug, info};

use crate::config::HostConfig;
use crate::error::NetError;
use crate::net::{InterfaceConfig, NetworkConfig, NetworkStack, StatsSection};

/// BSD `ETIMEDOUT`.
const ETIMEDOUT: i32 = 60;

/// Attach routine for the simulated primary interface.
pub fn attach_simulated(iface: &InterfaceConfig) -> Result<(), NetError> {
    debug!("[net] attach {} (simulated)", iface.name);
    Ok(())
}

#[derive(Debug, Default)]
struct LinkState {
    interfaces: Vec<(&'static str, Option<Ipv4Addr>)>,
    mbuf_bytes: usize,
    mbuf_cluster_bytes: usize,
}

/// Network stack with a configured identity instead of BOOTP.
#[derive(Debug)]
pub struct HostNetwork {
    server: Option<Ipv4Addr>,
    hostname: Option<String>,
    time_server: Option<String>,
    state: Mutex<LinkState>,
}

impl HostNetwork {
    /// The host name falls back to `$HOSTNAME` when the config has none.
    #[must_use]
    pub fn new(config: &HostConfig) -> Self {
        let hostname = config
            .hostname
            .clone()
            .or_else(|| std::env::var("HOSTNAME").ok());
        Self {
            server: config.server_address,
            hostname,
            time_server: config.time_server.clone(),
            state: Mutex::new(LinkState::default()),
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut LinkState) -> T) -> io::Result<T> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "network state poisoned"))?;
        Ok(f(&mut state))
    }
}

impl NetworkStack for HostNetwork {
    fn initialize(&self, config: &NetworkConfig) -> Result<(), NetError> {
        let mut attached = Vec::new();
        for iface in config.interfaces() {
            (iface.attach)(iface)?;
            attached.push((iface.name, iface.address));
        }
        info!(
            "[net] {} interface(s) up, bootp={}, priority {}",
            attached.len(),
            config.bootp,
            config.task_priority
        );
        self.with_state(|state| {
            state.interfaces = attached;
            state.mbuf_bytes = config.mbuf_bytes;
            state.mbuf_cluster_bytes = config.mbuf_cluster_bytes;
        })
        .map_err(|_| NetError::new(ETIMEDOUT))
    }

    fn server_address(&self) -> Option<Ipv4Addr> {
        self.server
    }

    fn hostname(&self) -> Option<String> {
        self.hostname.clone()
    }

    fn synchronize_time(&self) -> Result<(), NetError> {
        match &self.time_server {
            Some(server) => {
                info!("[net] clock synchronized from {server}");
                Ok(())
            }
            None => Err(NetError::new(ETIMEDOUT)),
        }
    }

    fn show_stats(&self, section: StatsSection, out: &mut dyn Write) -> io::Result<()> {
        let state = self.with_state(|state| {
            (
                state.interfaces.clone(),
                state.mbuf_bytes,
                state.mbuf_cluster_bytes,
            )
        })?;
        let (interfaces, mbufs, clusters) = state;
        match section {
            StatsSection::Interfaces => {
                for (name, address) in &interfaces {
                    match address {
                        Some(addr) => writeln!(out, "{name}: UP  inet {addr}")?,
                        None => writeln!(out, "{name}: UP  inet (bootp)")?,
                    }
                }
            }
            StatsSection::Mbufs => {
                writeln!(out, "mbufs: {mbufs} bytes  clusters: {clusters} bytes")?;
            }
            StatsSection::Routes => {
                writeln!(out, "Destination      Gateway")?;
                writeln!(out, "127.0.0.1        lo0")?;
                if let Some(server) = self.server {
                    writeln!(out, "{server:<16} {}", interfaces.first().map_or("-", |i| i.0))?;
                }
            }
            StatsSection::Ip | StatsSection::Icmp | StatsSection::Udp | StatsSection::Tcp => {
                let label = format!("{section:?}").to_ascii_uppercase();
                writeln!(out, "{label} statistics: 0 sent, 0 received")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkTuning;

    fn network(time_server: Option<&str>) -> HostNetwork {
        HostNetwork::new(&HostConfig {
            hostname: Some("ioc-sim".into()),
            time_server: time_server.map(str::to_owned),
            ..HostConfig::default()
        })
    }

    #[test]
    fn time_sync_needs_a_server() {
        assert_eq!(
            network(None).synchronize_time(),
            Err(NetError::new(ETIMEDOUT))
        );
        assert!(network(Some("ntp.local")).synchronize_time().is_ok());
    }

    #[test]
    fn interfaces_listed_after_initialize() {
        let net = network(None);
        let cfg = NetworkConfig::new(
            InterfaceConfig::primary("sim0", attach_simulated),
            &NetworkTuning::default(),
        );
        net.initialize(&cfg).unwrap();
        let mut out = Vec::new();
        net.show_stats(StatsSection::Interfaces, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "sim0: UP  inet (bootp)\nlo0: UP  inet 127.0.0.1\n");
        assert_eq!(net.hostname().as_deref(), Some("ioc-sim"));
    }
}
