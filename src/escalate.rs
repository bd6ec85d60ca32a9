// CLASSIFICATION: COMMUNITY
// Filename: escalate.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Fatal error escalation.
//!
//! Every unrecoverable condition on the node ends here: one line goes to the
//! log sink at [`Severity::Alert`], the task sleeps one second so a slow log
//! transport can deliver it, then the kernel halts with the same message.
//! Nothing in this module returns.

use std::fmt;

use crate::error::NetError;
use crate::kernel::{Kernel, StatusCode};
use crate::logsink::{LogSink, Severity};

#[derive(Clone, Copy)]
pub struct FailureEscalator<'a> {
    kernel: &'a dyn Kernel,
    sink: &'a dyn LogSink,
}

impl<'a> FailureEscalator<'a> {
    #[must_use]
    pub fn new(kernel: &'a dyn Kernel, sink: &'a dyn LogSink) -> Self {
        Self { kernel, sink }
    }

    /// Log a formatted message and halt.
    pub fn fatal(&self, message: fmt::Arguments<'_>) -> ! {
        let line = message.to_string();
        self.escalate(&line, &line)
    }

    /// Log `msg` with the kernel status text appended and halt.
    pub fn fatal_status(&self, msg: &str, status: StatusCode) -> ! {
        self.escalate(&format!("{msg}: {status}"), msg)
    }

    /// Log `msg` with the network error number appended and halt.
    pub fn fatal_net(&self, msg: &str, err: NetError) -> ! {
        self.escalate(&format!("{msg}: {}", err.code), msg)
    }

    fn escalate(&self, line: &str, halt_message: &str) -> ! {
        if let Err(err) = self.sink.write(Severity::Alert, line) {
            // Sink not up yet or broken: the raw console is all that is left.
            self.kernel.debug_print(&format!("{line} ({err})"));
        }
        let ticks = self.kernel.ticks_per_second();
        self.kernel.wake_after(ticks);
        self.kernel.halt(halt_message)
    }
}
