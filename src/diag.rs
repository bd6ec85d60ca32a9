// CLASSIFICATION: COMMUNITY
// Filename: diag.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Console diagnostics: network statistics, semaphore table dump and the
//! confirmed reboot.
//!
//! The reporting commands never fail on their own account; an `Err` only
//! means the output stream itself broke.

use std::io::{self, Write};

use anyhow::Context as _;
use log::info;

use crate::escalate::FailureEscalator;
use crate::interp::{CommandDef, CommandRegistry, Console};
use crate::kernel::Kernel;
use crate::net::{NetworkStack, StatsSection};

/// Answer that confirms a reboot.
pub const REBOOT_CONFIRM: u8 = b'Y';

const ENTRIES_PER_LINE: usize = 3;

#[derive(Clone, Copy)]
pub struct DiagnosticCommands<'a> {
    kernel: &'a dyn Kernel,
    network: &'a dyn NetworkStack,
    escalator: FailureEscalator<'a>,
}

impl<'a> DiagnosticCommands<'a> {
    #[must_use]
    pub fn new(
        kernel: &'a dyn Kernel,
        network: &'a dyn NetworkStack,
        escalator: FailureEscalator<'a>,
    ) -> Self {
        Self {
            kernel,
            network,
            escalator,
        }
    }

    /// Interface and mbuf statistics, plus routes at level 1 and protocol
    /// counters at level 2. Thresholds are cumulative.
    pub fn show_stats<W: Write + ?Sized>(&self, level: u32, out: &mut W) -> io::Result<()> {
        let mut out = out;
        self.network.show_stats(StatsSection::Interfaces, &mut out)?;
        self.network.show_stats(StatsSection::Mbufs, &mut out)?;
        if level >= 1 {
            self.network.show_stats(StatsSection::Routes, &mut out)?;
        }
        if level >= 2 {
            for section in [
                StatsSection::Ip,
                StatsSection::Icmp,
                StatsSection::Udp,
                StatsSection::Tcp,
            ] {
                self.network.show_stats(section, &mut out)?;
            }
        }
        Ok(())
    }

    /// Dump the live semaphore table, three entries per line, followed by
    /// `<live>/<capacity>`.
    pub fn show_semaphores<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        let capacity = self.kernel.semaphore_capacity();
        let mut live = 0usize;
        for sem in self.kernel.semaphores().take(capacity) {
            write!(
                out,
                "{:4.4}{:9x}{:5x}{:5}",
                sem.printable_name(),
                sem.id,
                sem.attributes.bits(),
                sem.value()
            )?;
            live += 1;
            if live % ENTRIES_PER_LINE == 0 {
                writeln!(out)?;
            } else {
                write!(out, "   ")?;
            }
        }
        if live % ENTRIES_PER_LINE != 0 {
            writeln!(out)?;
        }
        writeln!(out, "{live}/{capacity}")
    }

    /// Ask for confirmation and reboot on `Y`. Any other answer, including
    /// end of input, leaves the node running with the rest of the line
    /// discarded.
    pub fn reboot(&self, console: &mut dyn Console) -> io::Result<()> {
        write!(console, "Are you sure you want to reboot the IOC? ")?;
        console.flush()?;

        let mut answer = [0u8; 1];
        let first = match console.read(&mut answer)? {
            0 => None,
            _ => Some(answer[0]),
        };
        if first == Some(REBOOT_CONFIRM) {
            self.escalator.fatal(format_args!("Reboot"));
        }
        if first.is_some_and(|c| c != b'\n') {
            let mut discard = Vec::new();
            console.read_until(b'\n', &mut discard)?;
        }
        info!("[diag] reboot declined");
        Ok(())
    }

    /// Register `showStats`, `showSem` and `reboot`.
    pub fn register_into(self, registry: &mut dyn CommandRegistry<'a>) {
        registry.register(CommandDef::new(
            "showStats",
            "showStats [level]",
            move |args, console| {
                let level = match args.first() {
                    Some(raw) => raw
                        .parse::<u32>()
                        .with_context(|| format!("bad level '{raw}'"))?,
                    None => 0,
                };
                self.show_stats(level, console)?;
                Ok(())
            },
        ));
        registry.register(CommandDef::new("showSem", "showSem", move |_, console| {
            self.show_semaphores(console)?;
            Ok(())
        }));
        registry.register(CommandDef::new("reboot", "reboot", move |_, console| {
            self.reboot(console)?;
            Ok(())
        }));
    }
}
