// CLASSIFICATION: COMMUNITY
// Filename: kernel.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Boundary to the real-time kernel: clock, task sleep, the semaphore
//! table and the unrecoverable halt.

use std::fmt;
use std::time::Duration;

use bitflags::bitflags;

/// Status code returned by a kernel directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u32);

const STATUS_NAMES: &[&str] = &[
    "RTEMS_SUCCESSFUL",
    "RTEMS_TASK_EXITTED",
    "RTEMS_MP_NOT_CONFIGURED",
    "RTEMS_INVALID_NAME",
    "RTEMS_INVALID_ID",
    "RTEMS_TOO_MANY",
    "RTEMS_TIMEOUT",
    "RTEMS_OBJECT_WAS_DELETED",
    "RTEMS_INVALID_SIZE",
    "RTEMS_INVALID_ADDRESS",
    "RTEMS_INVALID_NUMBER",
    "RTEMS_NOT_DEFINED",
    "RTEMS_RESOURCE_IN_USE",
    "RTEMS_UNSATISFIED",
    "RTEMS_INCORRECT_STATE",
    "RTEMS_ALREADY_SUSPENDED",
    "RTEMS_ILLEGAL_ON_SELF",
    "RTEMS_ILLEGAL_ON_REMOTE_OBJECT",
    "RTEMS_CALLED_FROM_ISR",
    "RTEMS_INVALID_PRIORITY",
    "RTEMS_INVALID_CLOCK",
    "RTEMS_INVALID_NODE",
    "RTEMS_NOT_CONFIGURED",
    "RTEMS_NOT_OWNER_OF_RESOURCE",
    "RTEMS_NOT_IMPLEMENTED",
    "RTEMS_INTERNAL_ERROR",
    "RTEMS_NO_MEMORY",
    "RTEMS_IO_ERROR",
    "RTEMS_PROXY_BLOCKING",
];

impl StatusCode {
    pub const SUCCESSFUL: Self = Self(0);
    pub const INVALID_ID: Self = Self(4);
    pub const TOO_MANY: Self = Self(5);
    pub const UNSATISFIED: Self = Self(13);
    pub const NO_MEMORY: Self = Self(26);

    /// Canonical name of the status, if known.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        STATUS_NAMES.get(self.0 as usize).copied()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "unknown status {}", self.0),
        }
    }
}

impl std::error::Error for StatusCode {}

bitflags! {
    /// Attribute set of a kernel semaphore.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SemaphoreAttributes: u32 {
        const PRIORITY = 0x01;
        const GLOBAL = 0x02;
        const BINARY_SEMAPHORE = 0x10;
        const SIMPLE_BINARY_SEMAPHORE = 0x20;
        const INHERIT_PRIORITY = 0x40;
        const PRIORITY_CEILING = 0x80;
    }
}

/// Read-only copy of one live slot in the kernel semaphore table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemaphoreRecord {
    pub name: [u8; 4],
    pub id: u32,
    pub attributes: SemaphoreAttributes,
    /// Mutex lock state, meaningful for binary semaphores.
    pub lock: u32,
    /// Count, meaningful for counting semaphores.
    pub count: u32,
}

impl SemaphoreRecord {
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.attributes.contains(SemaphoreAttributes::BINARY_SEMAPHORE)
    }

    /// Lock state for binary semaphores, count otherwise.
    #[must_use]
    pub fn value(&self) -> u32 {
        if self.is_binary() {
            self.lock
        } else {
            self.count
        }
    }

    /// Object name with non-printable bytes replaced by spaces.
    #[must_use]
    pub fn printable_name(&self) -> String {
        self.name
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    char::from(b)
                } else {
                    ' '
                }
            })
            .collect()
    }
}

/// Kernel services used by the bootstrap task.
pub trait Kernel {
    fn ticks_per_second(&self) -> u32;

    /// Block the calling task for `ticks` clock ticks.
    fn wake_after(&self, ticks: u32);

    /// Block the calling task for `duration`, rounded to whole ticks.
    fn sleep(&self, duration: Duration) {
        let ticks = duration.as_micros() * u128::from(self.ticks_per_second()) / 1_000_000;
        self.wake_after(u32::try_from(ticks).unwrap_or(u32::MAX));
    }

    /// Start the tick/clock service.
    fn init_clock(&self) -> Result<(), StatusCode>;

    /// Start the cooperative thread helper layer.
    fn init_threads(&self) -> Result<(), StatusCode>;

    /// Number of slots in the semaphore table.
    fn semaphore_capacity(&self) -> usize;

    /// Live entries of the semaphore table, in slot order.
    fn semaphores(&self) -> Box<dyn Iterator<Item = SemaphoreRecord> + '_>;

    /// Unbuffered console print usable before any logging is up.
    fn debug_print(&self, line: &str);

    /// Stop the node. Never returns.
    fn halt(&self, message: &str) -> !;
}
