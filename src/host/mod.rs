// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Host-side stand-ins for the node services so the bootstrap can run as an
//! ordinary process: a tick-based kernel over `std::thread`, a network
//! stack with a fixed identity, a local directory served as the remote
//! file tree, and a line-oriented command shell.

mod drivers;
mod fs;
mod kernel;
mod loader;
mod net;
mod shell;

pub use drivers::HostDrivers;
pub use fs::HostRemoteFs;
pub use kernel::HostKernel;
pub use loader::HostRecordLoader;
pub use net::{attach_simulated, HostNetwork};
pub use shell::{split_fields, LineShell};
