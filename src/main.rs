// CLASSIFICATION: COMMUNITY
// Filename: main.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Runs the node bootstrap as a host process.

use std::io;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use nodeboot::bootstrap::{Bootstrapper, Collaborators};
use nodeboot::config::NodeConfig;
use nodeboot::host::{
    attach_simulated, HostDrivers, HostKernel, HostNetwork, HostRecordLoader, HostRemoteFs,
    LineShell,
};
use nodeboot::interp::SplitConsole;
use nodeboot::logsink::FacadeSink;
use nodeboot::net::{InterfaceConfig, NetworkConfig};

/// Node bootstrap command-line arguments.
#[derive(Debug, Parser)]
#[command(author = "Lukas Bower", version, about = "Node bootstrap (host simulation)", long_about = None)]
struct Cli {
    /// TOML config file. Defaults to $NODEBOOT_CONFIG, then built-in values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local directory served as the remote file tree.
    #[arg(long)]
    tftp_root: Option<PathBuf>,

    /// Host name used in remote paths.
    #[arg(long)]
    hostname: Option<String>,

    /// File server address used in remote paths.
    #[arg(long)]
    server: Option<Ipv4Addr>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_level));
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => NodeConfig::load(path).context("loading node config")?,
        None => NodeConfig::load_active(),
    };
    if let Some(root) = cli.tftp_root {
        config.host.tftp_root = root;
    }
    if cli.hostname.is_some() {
        config.host.hostname = cli.hostname;
    }
    if cli.server.is_some() {
        config.host.server_address = cli.server;
    }

    let kernel = HostKernel::new(&config.kernel);
    let network = HostNetwork::new(&config.host);
    let remote_fs = HostRemoteFs::new(&config.host.tftp_root, &config.remote.mount_root);
    let log_sink = FacadeSink::new();
    let loader = HostRecordLoader::new(&remote_fs);
    let drivers = HostDrivers::new(config.host.drivers.clone());
    let network_config = NetworkConfig::new(
        InterfaceConfig::primary("sim0", attach_simulated),
        &config.network,
    );

    let parts = Collaborators {
        kernel: &kernel,
        network: &network,
        remote_fs: &remote_fs,
        log_sink: &log_sink,
        loader: &loader,
        drivers: &drivers,
    };
    let console = SplitConsole::new(io::stdin().lock(), io::stdout());
    let shell = LineShell::new(console);
    Bootstrapper::new(&config, &network_config, parts, shell, io::stdout()).run()
}
