// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Shared mocks for the integration tests. `MockNode` stands in for every
//! node service at once and journals each call; its `halt` unwinds with a
//! [`Halted`] payload instead of stopping the process.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Cursor, Write};
use std::net::Ipv4Addr;
use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};
use nodeboot::bootstrap::Collaborators;
use nodeboot::config::NetworkTuning;
use nodeboot::context::Environment;
use nodeboot::database::RecordLoader;
use nodeboot::error::{FsError, LoadError, LogError, NetError};
use nodeboot::interp::{
    CommandDef, CommandInterpreter, CommandRegistry, DriverSet, SplitConsole,
};
use nodeboot::kernel::{Kernel, SemaphoreAttributes, SemaphoreRecord, StatusCode};
use nodeboot::logsink::{Facility, LogSink, Severity};
use nodeboot::net::{InterfaceConfig, NetworkConfig, NetworkStack, StatsSection};
use nodeboot::path::RemotePath;
use nodeboot::remote_fs::RemoteFs;

pub const SERVER: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 2);
pub const HOST: &str = "ioc3";
pub const TICKS_PER_SECOND: u32 = 100;

/// Panic payload carrying the halt message.
#[derive(Debug)]
pub struct Halted(pub String);

/// Run `f` and return the message it halted with.
pub fn expect_halt<F: FnOnce()>(f: F) -> String {
    let payload = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => panic!("expected the node to halt"),
        Err(payload) => payload,
    };
    match payload.downcast::<Halted>() {
        Ok(halted) => halted.0,
        Err(other) => panic::resume_unwind(other),
    }
}

fn attach_ok(_: &InterfaceConfig) -> Result<(), NetError> {
    Ok(())
}

/// `eth0` chained to loopback with stock tuning.
pub fn network_config() -> NetworkConfig {
    NetworkConfig::new(
        InterfaceConfig::primary("eth0", attach_ok),
        &NetworkTuning::default(),
    )
}

pub fn remote(name: &str) -> String {
    format!("/TFTP/{SERVER}/epics/{HOST}/{name}")
}

pub fn semaphore(
    name: &[u8; 4],
    slot: u32,
    attributes: SemaphoreAttributes,
    value: u32,
) -> SemaphoreRecord {
    SemaphoreRecord {
        name: *name,
        id: 0x1a01_0000 | slot,
        attributes,
        lock: value,
        count: value,
    }
}

/// Every node service in one journaling mock.
pub struct MockNode {
    journal: RefCell<Vec<String>>,
    pub server: Option<Ipv4Addr>,
    pub hostname: Option<String>,
    pub network_error: Option<i32>,
    pub mount_error: bool,
    pub time_sync_error: bool,
    pub clock_error: Option<StatusCode>,
    pub files: BTreeMap<String, String>,
    pub semaphores: Vec<SemaphoreRecord>,
    pub capacity: usize,
    sink_open: Cell<bool>,
}

impl MockNode {
    pub fn new() -> Self {
        Self {
            journal: RefCell::new(Vec::new()),
            server: Some(SERVER),
            hostname: Some(HOST.to_owned()),
            network_error: None,
            mount_error: false,
            time_sync_error: false,
            clock_error: None,
            files: BTreeMap::new(),
            semaphores: Vec::new(),
            capacity: 16,
            sink_open: Cell::new(false),
        }
    }

    /// Serve `content` at the translated path of `name`.
    pub fn with_file(mut self, name: &str, content: &str) -> Self {
        self.files.insert(remote(name), content.to_owned());
        self
    }

    pub fn open_sink(&self) {
        self.sink_open.set(true);
    }

    pub fn note(&self, event: impl Into<String>) {
        self.journal.borrow_mut().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }

    pub fn saw(&self, prefix: &str) -> bool {
        self.journal.borrow().iter().any(|e| e.starts_with(prefix))
    }

    /// Journal index of the first event starting with `prefix`.
    pub fn position(&self, prefix: &str) -> usize {
        self.journal
            .borrow()
            .iter()
            .position(|e| e.starts_with(prefix))
            .unwrap_or_else(|| panic!("no event starting with {prefix:?}"))
    }

    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            kernel: self,
            network: self,
            remote_fs: self,
            log_sink: self,
            loader: self,
            drivers: self,
        }
    }
}

impl Kernel for MockNode {
    fn ticks_per_second(&self) -> u32 {
        TICKS_PER_SECOND
    }

    fn wake_after(&self, ticks: u32) {
        self.note(format!("sleep {ticks}"));
    }

    fn init_clock(&self) -> Result<(), StatusCode> {
        self.note("init_clock");
        self.clock_error.map_or(Ok(()), Err)
    }

    fn init_threads(&self) -> Result<(), StatusCode> {
        self.note("init_threads");
        Ok(())
    }

    fn semaphore_capacity(&self) -> usize {
        self.capacity
    }

    fn semaphores(&self) -> Box<dyn Iterator<Item = SemaphoreRecord> + '_> {
        Box::new(self.semaphores.iter().copied())
    }

    fn debug_print(&self, line: &str) {
        self.note(format!("console {line}"));
    }

    fn halt(&self, message: &str) -> ! {
        self.note(format!("halt {message}"));
        panic::panic_any(Halted(message.to_owned()))
    }
}

impl NetworkStack for MockNode {
    fn initialize(&self, config: &NetworkConfig) -> Result<(), NetError> {
        let names: Vec<&str> = config.interfaces().map(|i| i.name).collect();
        self.note(format!("net init {}", names.join(",")));
        self.network_error.map_or(Ok(()), |code| Err(NetError::new(code)))
    }

    fn server_address(&self) -> Option<Ipv4Addr> {
        self.server
    }

    fn hostname(&self) -> Option<String> {
        self.hostname.clone()
    }

    fn synchronize_time(&self) -> Result<(), NetError> {
        self.note("ntp");
        if self.time_sync_error {
            Err(NetError::new(60))
        } else {
            Ok(())
        }
    }

    fn show_stats(&self, section: StatsSection, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "[{section:?}]")
    }
}

impl RemoteFs for MockNode {
    fn mount(&self) -> Result<(), FsError> {
        self.note("mount");
        if self.mount_error {
            Err(FsError::Mount("server unreachable".into()))
        } else {
            Ok(())
        }
    }

    fn open(&self, path: &RemotePath) -> Result<Box<dyn BufRead>, FsError> {
        self.note(format!("open {path}"));
        match self.files.get(path.as_str()) {
            Some(content) => Ok(Box::new(Cursor::new(content.clone().into_bytes()))),
            None => Err(FsError::Open {
                path: path.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            }),
        }
    }
}

impl LogSink for MockNode {
    fn open(&self, ident: &str, _facility: Facility) -> Result<(), LogError> {
        self.note(format!("syslog open {ident}"));
        self.sink_open.set(true);
        Ok(())
    }

    fn write(&self, severity: Severity, line: &str) -> Result<(), LogError> {
        if !self.sink_open.get() {
            return Err(LogError::NotOpen);
        }
        self.note(format!("log {severity:?} {line}"));
        Ok(())
    }
}

impl RecordLoader for MockNode {
    fn load_database(
        &self,
        path: &RemotePath,
        include_path: &str,
        substitutions: Option<&str>,
    ) -> Result<(), LoadError> {
        self.note(format!("load_database {path} {include_path} {substitutions:?}"));
        Ok(())
    }

    fn load_records(&self, path: &RemotePath, substitutions: Option<&str>) -> Result<(), LoadError> {
        self.note(format!("load_records {path} {substitutions:?}"));
        if path.as_str().ends_with("broken.db") {
            return Err(LoadError::Parse {
                path: path.to_string(),
                reason: "unterminated block".into(),
            });
        }
        Ok(())
    }
}

impl DriverSet for MockNode {
    fn register_drivers<'a>(&'a self, registry: &mut dyn CommandRegistry<'a>) {
        self.note("drivers");
        registry.register(CommandDef::new("drvTest", "drvTest", move |_, _| {
            self.note("drvTest ran");
            Ok(())
        }));
    }
}

pub type ScriptedConsole<'o> = SplitConsole<Cursor<Vec<u8>>, &'o mut Vec<u8>>;

pub fn scripted_console<'o>(input: &str, output: &'o mut Vec<u8>) -> ScriptedConsole<'o> {
    SplitConsole::new(Cursor::new(input.as_bytes().to_vec()), output)
}

/// Whitespace-splitting interpreter that journals what it runs. Console
/// input drives interactive mode.
pub struct MockInterpreter<'a, 'o> {
    node: &'a MockNode,
    commands: BTreeMap<&'static str, CommandDef<'a>>,
    console: ScriptedConsole<'o>,
    pub interactive_error: bool,
}

impl<'a, 'o> MockInterpreter<'a, 'o> {
    pub fn new(node: &'a MockNode, console: ScriptedConsole<'o>) -> Self {
        Self {
            node,
            commands: BTreeMap::new(),
            console,
            interactive_error: false,
        }
    }

    fn exec(&mut self, line: &str) -> Result<()> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(());
        };
        let args: Vec<&str> = words.collect();
        self.node.note(format!("exec {}", line.trim()));
        let command = self
            .commands
            .get_mut(name)
            .ok_or_else(|| anyhow!("unknown command {name}"))?;
        (command.handler)(&args, &mut self.console)
    }
}

impl<'a> CommandRegistry<'a> for MockInterpreter<'a, '_> {
    fn register(&mut self, command: CommandDef<'a>) {
        self.node.note(format!("register {}", command.name));
        self.commands.insert(command.name, command);
    }
}

impl<'a> CommandInterpreter<'a> for MockInterpreter<'a, '_> {
    fn import_environment(&mut self, env: &Environment) {
        self.node.note(format!("env PS1={}", env.prompt()));
    }

    fn run_script(&mut self, script: &mut dyn BufRead, name: &str) -> Result<()> {
        self.node.note(format!("script {name}"));
        for line in script.lines() {
            let line = line?;
            if let Err(err) = self.exec(&line) {
                self.node.note(format!("error {err}"));
                return Err(err);
            }
        }
        Ok(())
    }

    fn run_interactive(&mut self) -> Result<()> {
        self.node.note("interactive");
        let mut line = String::new();
        loop {
            line.clear();
            if self.console.read_line(&mut line)? == 0 {
                break;
            }
            if let Err(err) = self.exec(&line) {
                self.node.note(format!("error {err}"));
            }
        }
        if self.interactive_error {
            return Err(anyhow!("console lost"));
        }
        Ok(())
    }
}
