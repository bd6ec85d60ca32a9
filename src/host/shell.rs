// CLASSIFICATION: COMMUNITY
// Filename: shell.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

use std::collections::BTreeMap;
use std::io::{self, BufRead};

use anyhow::{anyhow, Result};
use log::warn;

use crate::context::Environment;
use crate::interp::{CommandDef, CommandInterpreter, CommandRegistry, Console};

/// Result of executing one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Continue,
    Exit,
}

/// Split a command line on any of `separators`. Double quotes group a
/// field and are removed; a `#` outside quotes starts a comment.
#[must_use]
pub fn split_fields(line: &str, separators: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;
    for c in line.chars() {
        if quoted {
            if c == '"' {
                quoted = false;
            } else {
                current.push(c);
            }
        } else if c == '"' {
            quoted = true;
            pending = true;
        } else if c == '#' {
            break;
        } else if separators.contains(c) {
            if pending {
                fields.push(std::mem::take(&mut current));
                pending = false;
            }
        } else {
            current.push(c);
            pending = true;
        }
    }
    if pending {
        fields.push(current);
    }
    fields
}

/// Read one line into `buf` and return it without its terminator. Bytes
/// that are not UTF-8 are replaced rather than rejected. `None` at end of
/// input.
fn next_line<R: BufRead + ?Sized>(
    input: &mut R,
    buf: &mut Vec<u8>,
) -> io::Result<Option<String>> {
    buf.clear();
    if input.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buf);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}

/// Minimal line-oriented interpreter: one command per line, errors are
/// printed and execution continues.
pub struct LineShell<'a, C: Console> {
    console: C,
    commands: BTreeMap<&'static str, CommandDef<'a>>,
    prompt: String,
    separators: String,
}

impl<'a, C: Console> LineShell<'a, C> {
    pub fn new(console: C) -> Self {
        let env = Environment::default();
        Self {
            console,
            commands: BTreeMap::new(),
            prompt: env.prompt().to_owned(),
            separators: env.field_separators().to_owned(),
        }
    }

    /// Execute a single command line.
    pub fn execute(&mut self, line: &str) -> Result<CommandStatus> {
        let fields = split_fields(line, &self.separators);
        let Some((name, rest)) = fields.split_first() else {
            return Ok(CommandStatus::Continue);
        };
        match name.as_str() {
            "help" => {
                for command in self.commands.values() {
                    writeln!(self.console, "{}", command.usage)?;
                }
                Ok(CommandStatus::Continue)
            }
            "exit" => Ok(CommandStatus::Exit),
            other => {
                let command = self
                    .commands
                    .get_mut(other)
                    .ok_or_else(|| anyhow!("command '{other}' not found"))?;
                let args: Vec<&str> = rest.iter().map(String::as_str).collect();
                (command.handler)(&args, &mut self.console)?;
                Ok(CommandStatus::Continue)
            }
        }
    }

    fn execute_reporting(&mut self, line: &str, origin: &str) -> Result<CommandStatus> {
        match self.execute(line) {
            Ok(status) => Ok(status),
            Err(err) => {
                writeln!(self.console, "{origin}: {err:#}")?;
                Ok(CommandStatus::Continue)
            }
        }
    }

    pub fn into_console(self) -> C {
        self.console
    }
}

impl<'a, C: Console> CommandRegistry<'a> for LineShell<'a, C> {
    fn register(&mut self, command: CommandDef<'a>) {
        if let Some(previous) = self.commands.insert(command.name, command) {
            warn!("[shell] command '{}' registered twice", previous.name);
        }
    }
}

impl<'a, C: Console> CommandInterpreter<'a> for LineShell<'a, C> {
    fn import_environment(&mut self, env: &Environment) {
        env.prompt().clone_into(&mut self.prompt);
        env.field_separators().clone_into(&mut self.separators);
    }

    fn run_script(&mut self, script: &mut dyn BufRead, name: &str) -> Result<()> {
        let mut buf = Vec::new();
        let mut number = 0usize;
        while let Some(line) = next_line(script, &mut buf)? {
            number += 1;
            writeln!(self.console, "{line}")?;
            let origin = format!("{name}:{number}");
            if self.execute_reporting(&line, &origin)? == CommandStatus::Exit {
                break;
            }
        }
        Ok(())
    }

    fn run_interactive(&mut self) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            write!(self.console, "{}", self.prompt)?;
            self.console.flush()?;
            let Some(line) = next_line(&mut self.console, &mut buf)? else {
                writeln!(self.console)?;
                return Ok(());
            };
            if self.execute_reporting(&line, "console")? == CommandStatus::Exit {
                return Ok(());
            }
        }
    }
}
