// CLASSIFICATION: COMMUNITY
// Filename: net.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Network bring-up configuration and the network stack boundary.

use std::io::{self, Write};
use std::net::Ipv4Addr;

use log::debug;

use crate::config::NetworkTuning;
use crate::error::NetError;

/// Driver attach routine for one interface.
pub type AttachFn = fn(&InterfaceConfig) -> Result<(), NetError>;

/// One entry of the interface chain handed to the stack at bring-up.
#[derive(Debug)]
pub struct InterfaceConfig {
    pub name: &'static str,
    pub attach: AttachFn,
    next: Option<&'static InterfaceConfig>,
    pub address: Option<Ipv4Addr>,
    pub netmask: Option<Ipv4Addr>,
}

fn attach_loopback(iface: &InterfaceConfig) -> Result<(), NetError> {
    debug!("[net] attach {}", iface.name);
    Ok(())
}

/// Loopback interface, always last in the chain.
pub static LOOPBACK: InterfaceConfig = InterfaceConfig {
    name: "lo0",
    attach: attach_loopback,
    next: None,
    address: Some(Ipv4Addr::new(127, 0, 0, 1)),
    netmask: Some(Ipv4Addr::new(255, 0, 0, 0)),
};

impl InterfaceConfig {
    /// Primary hardware interface, chained to [`LOOPBACK`]. Address and
    /// mask stay unset so BOOTP supplies them.
    #[must_use]
    pub fn primary(name: &'static str, attach: AttachFn) -> Self {
        Self {
            name,
            attach,
            next: Some(&LOOPBACK),
            address: None,
            netmask: None,
        }
    }

    #[must_use]
    pub fn next(&self) -> Option<&'static InterfaceConfig> {
        self.next
    }
}

/// Static network configuration, built once and never changed.
#[derive(Debug)]
pub struct NetworkConfig {
    primary: InterfaceConfig,
    pub bootp: bool,
    pub task_priority: u32,
    pub mbuf_bytes: usize,
    pub mbuf_cluster_bytes: usize,
}

impl NetworkConfig {
    #[must_use]
    pub fn new(primary: InterfaceConfig, tuning: &NetworkTuning) -> Self {
        Self {
            primary,
            bootp: tuning.bootp,
            task_priority: tuning.task_priority,
            mbuf_bytes: tuning.mbuf_bytes,
            mbuf_cluster_bytes: tuning.mbuf_cluster_bytes,
        }
    }

    /// Walk the interface chain, primary first.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceConfig> {
        let mut cursor = Some(&self.primary);
        std::iter::from_fn(move || {
            let current = cursor?;
            cursor = current.next();
            Some(current)
        })
    }
}

/// Statistics tables the stack can print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSection {
    Interfaces,
    Mbufs,
    Routes,
    Ip,
    Icmp,
    Udp,
    Tcp,
}

/// Network stack boundary. All calls block the caller.
pub trait NetworkStack {
    /// Attach every interface in the chain and configure it.
    fn initialize(&self, config: &NetworkConfig) -> Result<(), NetError>;

    /// File server learned during bring-up.
    fn server_address(&self) -> Option<Ipv4Addr>;

    fn hostname(&self) -> Option<String>;

    /// One NTP handshake.
    fn synchronize_time(&self) -> Result<(), NetError>;

    fn show_stats(&self, section: StatsSection, out: &mut dyn Write) -> io::Result<()>;
}
