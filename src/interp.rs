// CLASSIFICATION: COMMUNITY
// Filename: interp.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Boundary to the external command interpreter and the console it reads.

use std::io::{self, BufRead, Read, Write};

use anyhow::Result;

use crate::context::Environment;

/// Blocking console: line/character input plus output.
pub trait Console: BufRead + Write {}

impl<T: BufRead + Write> Console for T {}

/// Console assembled from separate input and output halves.
#[derive(Debug)]
pub struct SplitConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> SplitConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W> Read for SplitConsole<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl<R: BufRead, W> BufRead for SplitConsole<R, W> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.input.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.input.consume(amt);
    }
}

impl<R, W: Write> Write for SplitConsole<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

/// Command body: arguments after the command name, and the console.
pub type Handler<'a> = Box<dyn FnMut(&[&str], &mut dyn Console) -> Result<()> + 'a>;

/// Named command handed to the interpreter.
pub struct CommandDef<'a> {
    pub name: &'static str,
    pub usage: &'static str,
    pub handler: Handler<'a>,
}

impl<'a> CommandDef<'a> {
    pub fn new(
        name: &'static str,
        usage: &'static str,
        handler: impl FnMut(&[&str], &mut dyn Console) -> Result<()> + 'a,
    ) -> Self {
        Self {
            name,
            usage,
            handler: Box::new(handler),
        }
    }
}

pub trait CommandRegistry<'a> {
    fn register(&mut self, command: CommandDef<'a>);
}

pub trait CommandInterpreter<'a>: CommandRegistry<'a> {
    /// Make the node environment (prompt, field separators, ...) visible.
    fn import_environment(&mut self, env: &Environment);

    /// Batch mode. Returns once `script` is exhausted.
    fn run_script(&mut self, script: &mut dyn BufRead, name: &str) -> Result<()>;

    /// Interactive mode on the console. Returns only when console input closes.
    fn run_interactive(&mut self) -> Result<()>;
}

/// Device-driver registration set supplied by the application build.
pub trait DriverSet {
    fn register_drivers<'a>(&'a self, registry: &mut dyn CommandRegistry<'a>);
}
