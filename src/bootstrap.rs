// CLASSIFICATION: COMMUNITY
// Filename: bootstrap.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Node bring-up sequence.
//!
//! The bootstrap task runs each phase exactly once, in order, and never
//! returns: either a step fails fatally or the interactive console ends,
//! which is itself fatal.

use std::fmt;
use std::io::Write;
use std::time::Duration;

use log::{info, warn};

use crate::config::NodeConfig;
use crate::context::{BootContext, Environment, RemoteLayout};
use crate::database::{DatabaseCommands, RecordLoader};
use crate::diag::DiagnosticCommands;
use crate::escalate::FailureEscalator;
use crate::interp::{CommandInterpreter, DriverSet};
use crate::kernel::Kernel;
use crate::logsink::{Facility, LogSink, Severity};
use crate::net::{NetworkConfig, NetworkStack};
use crate::path::PathTranslator;
use crate::remote_fs::RemoteFs;
use crate::script::ScriptRunner;

/// Bring-up phases executed exactly once in order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BootPhase {
    NetworkInit,
    FilesystemInit,
    TimeSync,
    LogInit,
    KernelSubsystemInit,
    ScriptExec,
    InteractiveFallback,
}

impl BootPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetworkInit => "NetworkInit",
            Self::FilesystemInit => "FilesystemInit",
            Self::TimeSync => "TimeSync",
            Self::LogInit => "LogInit",
            Self::KernelSubsystemInit => "KernelSubsystemInit",
            Self::ScriptExec => "ScriptExec",
            Self::InteractiveFallback => "InteractiveFallback",
        }
    }
}

impl fmt::Display for BootPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ORDERING: &[BootPhase] = &[
    BootPhase::NetworkInit,
    BootPhase::FilesystemInit,
    BootPhase::TimeSync,
    BootPhase::LogInit,
    BootPhase::KernelSubsystemInit,
    BootPhase::ScriptExec,
    BootPhase::InteractiveFallback,
];

/// Phase ordering violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("boot phase advance attempted after completion (saw {0})")]
    Completed(BootPhase),
    #[error("boot phase order violation: expected {expected}, saw {saw}")]
    OutOfOrder { expected: BootPhase, saw: BootPhase },
}

/// Tracks bring-up progress and rejects re-entry or reordering.
#[derive(Debug, Default)]
pub struct BootSequencer {
    next: usize,
}

impl BootSequencer {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Phase the sequencer expects next, `None` once every phase has run.
    #[must_use]
    pub fn pending(&self) -> Option<BootPhase> {
        ORDERING.get(self.next).copied()
    }

    pub fn advance(&mut self, phase: BootPhase) -> Result<(), SequenceError> {
        match self.pending() {
            None => Err(SequenceError::Completed(phase)),
            Some(expected) if expected != phase => Err(SequenceError::OutOfOrder {
                expected,
                saw: phase,
            }),
            Some(_) => {
                info!("[boot] phase {phase}");
                self.next += 1;
                Ok(())
            }
        }
    }
}

/// Services the bootstrap task drives. All of them outlive the node.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub kernel: &'a dyn Kernel,
    pub network: &'a dyn NetworkStack,
    pub remote_fs: &'a dyn RemoteFs,
    pub log_sink: &'a dyn LogSink,
    pub loader: &'a dyn RecordLoader,
    pub drivers: &'a dyn DriverSet,
}

/// The bootstrap task: owns the interpreter and the console output.
pub struct Bootstrapper<'a, I, W> {
    config: &'a NodeConfig,
    network_config: &'a NetworkConfig,
    parts: Collaborators<'a>,
    interpreter: I,
    out: W,
    sequencer: BootSequencer,
}

impl<'a, I, W> Bootstrapper<'a, I, W>
where
    I: CommandInterpreter<'a>,
    W: Write,
{
    pub fn new(
        config: &'a NodeConfig,
        network_config: &'a NetworkConfig,
        parts: Collaborators<'a>,
        interpreter: I,
        out: W,
    ) -> Self {
        Self {
            config,
            network_config,
            parts,
            interpreter,
            out,
            sequencer: BootSequencer::new(),
        }
    }

    /// Bring the node up and hand the console to the operator.
    pub fn run(mut self) -> ! {
        let parts = self.parts;
        let config = self.config;
        let escalator = FailureEscalator::new(parts.kernel, parts.log_sink);

        let env = Environment::from_config(&config.environment);
        self.interpreter.import_environment(&env);

        self.enter(BootPhase::NetworkInit, escalator);
        self.say("***** Initializing network *****");
        if let Err(err) = parts.network.initialize(self.network_config) {
            escalator.fatal_net("Can't initialize network", err);
        }
        let mut ctx = BootContext::new(RemoteLayout::from(&config.remote));
        ctx.set_identity(parts.network.server_address(), parts.network.hostname());
        // Read by every translated path until the node halts.
        let ctx: &'a BootContext = Box::leak(Box::new(ctx));

        self.enter(BootPhase::FilesystemInit, escalator);
        self.say("***** Initializing TFTP *****");
        if let Err(err) = parts.remote_fs.mount() {
            escalator.fatal(format_args!("Can't mount remote filesystem: {err}"));
        }

        self.enter(BootPhase::TimeSync, escalator);
        self.say("***** Initializing NTP *****");
        if let Err(err) = parts.network.synchronize_time() {
            warn!("[boot] time synchronization failed: {err}");
            self.say(&format!("Can't synchronize time: {err}"));
        }

        self.enter(BootPhase::LogInit, escalator);
        self.say("***** Initializing syslog *****");
        if let Err(err) = parts.log_sink.open(&config.log.ident, Facility::Daemon) {
            warn!("[boot] log sink open failed: {err}");
        }
        if let Err(err) = parts
            .log_sink
            .write(Severity::Notice, &config.log.startup_notice)
        {
            warn!("[boot] startup notice not logged: {err}");
        }

        self.enter(BootPhase::KernelSubsystemInit, escalator);
        if let Err(status) = parts.kernel.init_clock() {
            escalator.fatal_status("Can't start clock", status);
        }
        if let Err(status) = parts.kernel.init_threads() {
            escalator.fatal_status("Can't start thread layer", status);
        }

        self.enter(BootPhase::ScriptExec, escalator);
        let translator = PathTranslator::new(ctx, escalator);
        DatabaseCommands::new(translator, parts.loader).register_into(&mut self.interpreter);
        DiagnosticCommands::new(parts.kernel, parts.network, escalator)
            .register_into(&mut self.interpreter);
        parts.drivers.register_drivers(&mut self.interpreter);
        self.say("***** Executing EPICS startup script *****");
        let outcome = ScriptRunner::new(translator, parts.remote_fs).run(
            &config.remote.startup_script,
            &mut self.interpreter,
            &mut self.out,
        );
        info!("[boot] startup script: {outcome:?}");

        self.enter(BootPhase::InteractiveFallback, escalator);
        parts
            .kernel
            .sleep(Duration::from_millis(config.remote.settle_delay_ms));
        if let Err(err) = self.interpreter.run_interactive() {
            warn!("[boot] console interpreter failed: {err:#}");
        }
        escalator.fatal(format_args!("Console command interpreter terminated"))
    }

    fn enter(&mut self, phase: BootPhase, escalator: FailureEscalator<'_>) {
        if let Err(err) = self.sequencer.advance(phase) {
            escalator.fatal(format_args!("{err}"));
        }
    }

    fn say(&mut self, line: &str) {
        // A dead console cannot be reported anywhere useful.
        let _ = writeln!(self.out, "{line}");
        let _ = self.out.flush();
    }
}
