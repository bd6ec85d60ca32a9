// CLASSIFICATION: COMMUNITY
// Filename: script.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Startup script execution.

use std::io::Write;

use log::{info, warn};

use crate::interp::CommandInterpreter;
use crate::path::PathTranslator;
use crate::remote_fs::RemoteFs;

/// How a script run ended. None of these stop the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    Completed,
    /// The interpreter gave up part way; the reason is kept for the log.
    Aborted(String),
    Unopenable,
}

#[derive(Clone, Copy)]
pub struct ScriptRunner<'a> {
    translator: PathTranslator<'a>,
    fs: &'a dyn RemoteFs,
}

impl<'a> ScriptRunner<'a> {
    #[must_use]
    pub fn new(translator: PathTranslator<'a>, fs: &'a dyn RemoteFs) -> Self {
        Self { translator, fs }
    }

    /// Feed the named script to the interpreter in batch mode. An unopenable
    /// script is reported on `out` and otherwise ignored.
    pub fn run<'i, I, W>(&self, name: &str, interpreter: &mut I, out: &mut W) -> ScriptOutcome
    where
        I: CommandInterpreter<'i> + ?Sized,
        W: Write + ?Sized,
    {
        let path = self.translator.translate(name);
        let mut stream = match self.fs.open(&path) {
            Ok(stream) => stream,
            Err(err) => {
                warn!("[script] open {path}: {err}");
                // Boot carries on either way; a dead console has no one to tell.
                let _ = writeln!(out, "Can't open script ({name})");
                return ScriptOutcome::Unopenable;
            }
        };

        info!("[script] running {path}");
        match interpreter.run_script(&mut *stream, name) {
            Ok(()) => ScriptOutcome::Completed,
            Err(err) => {
                warn!("[script] {name} aborted: {err:#}");
                ScriptOutcome::Aborted(format!("{err:#}"))
            }
        }
    }
}
