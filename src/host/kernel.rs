// CLASSIFICATION: COMMUNITY
// Filename: kernel.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use log::{debug, error};

use crate::config::KernelConfig;
use crate::kernel::{Kernel, SemaphoreAttributes, SemaphoreRecord, StatusCode};

/// Object class/node bits carried by every semaphore id.
const SEMAPHORE_ID_BASE: u32 = 0x1a01_0000;

/// Kernel simulation: ticks map onto `thread::sleep` and the semaphore table
/// is a fixed-size slot array.
#[derive(Debug)]
pub struct HostKernel {
    microseconds_per_tick: u32,
    ticks_per_second: u32,
    table: Mutex<Vec<Option<SemaphoreRecord>>>,
}

impl HostKernel {
    #[must_use]
    pub fn new(config: &KernelConfig) -> Self {
        Self {
            microseconds_per_tick: config.microseconds_per_tick.max(1),
            ticks_per_second: config.ticks_per_second(),
            table: Mutex::new(vec![None; config.max_semaphores]),
        }
    }

    /// Create a semaphore in the first free slot and return its id.
    pub fn create_semaphore(
        &self,
        name: [u8; 4],
        attributes: SemaphoreAttributes,
        initial: u32,
    ) -> Result<u32, StatusCode> {
        let mut table = self.table.lock().map_err(|_| StatusCode::UNSATISFIED)?;
        let slot = table
            .iter()
            .position(Option::is_none)
            .ok_or(StatusCode::TOO_MANY)?;
        let index = u32::try_from(slot + 1).map_err(|_| StatusCode::TOO_MANY)?;
        let id = SEMAPHORE_ID_BASE | index;
        let binary = attributes.contains(SemaphoreAttributes::BINARY_SEMAPHORE);
        table[slot] = Some(SemaphoreRecord {
            name,
            id,
            attributes,
            lock: if binary { initial.min(1) } else { 0 },
            count: if binary { 0 } else { initial },
        });
        debug!("[kernel] semaphore {id:#x} created");
        Ok(id)
    }

    pub fn delete_semaphore(&self, id: u32) -> Result<(), StatusCode> {
        let mut table = self.table.lock().map_err(|_| StatusCode::UNSATISFIED)?;
        let slot = table
            .iter_mut()
            .find(|entry| entry.as_ref().is_some_and(|sem| sem.id == id))
            .ok_or(StatusCode::INVALID_ID)?;
        *slot = None;
        Ok(())
    }
}

impl Kernel for HostKernel {
    fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    fn wake_after(&self, ticks: u32) {
        let micros = u64::from(ticks) * u64::from(self.microseconds_per_tick);
        thread::sleep(Duration::from_micros(micros));
    }

    fn init_clock(&self) -> Result<(), StatusCode> {
        self.create_semaphore(*b"CLKM", SemaphoreAttributes::BINARY_SEMAPHORE, 1)
            .map(drop)
    }

    fn init_threads(&self) -> Result<(), StatusCode> {
        self.create_semaphore(
            *b"THRD",
            SemaphoreAttributes::BINARY_SEMAPHORE
                | SemaphoreAttributes::PRIORITY
                | SemaphoreAttributes::INHERIT_PRIORITY,
            1,
        )?;
        self.create_semaphore(*b"ONCE", SemaphoreAttributes::PRIORITY, 0)
            .map(drop)
    }

    fn semaphore_capacity(&self) -> usize {
        self.table.lock().map(|table| table.len()).unwrap_or(0)
    }

    fn semaphores(&self) -> Box<dyn Iterator<Item = SemaphoreRecord> + '_> {
        let snapshot: Vec<SemaphoreRecord> = match self.table.lock() {
            Ok(table) => table.iter().flatten().cloned().collect(),
            Err(_) => Vec::new(),
        };
        Box::new(snapshot.into_iter())
    }

    fn debug_print(&self, line: &str) {
        eprintln!("{line}");
    }

    fn halt(&self, message: &str) -> ! {
        error!("[kernel] halt: {message}");
        eprintln!("*** node halted: {message}");
        std::process::exit(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kernel(slots: usize) -> HostKernel {
        HostKernel::new(&KernelConfig {
            max_semaphores: slots,
            ..KernelConfig::default()
        })
    }

    #[test]
    fn table_fills_then_reports_too_many() {
        let k = kernel(2);
        let a = k
            .create_semaphore(*b"AAAA", SemaphoreAttributes::empty(), 3)
            .unwrap();
        k.create_semaphore(*b"BBBB", SemaphoreAttributes::empty(), 0)
            .unwrap();
        assert_eq!(
            k.create_semaphore(*b"CCCC", SemaphoreAttributes::empty(), 0),
            Err(StatusCode::TOO_MANY)
        );
        k.delete_semaphore(a).unwrap();
        assert_eq!(k.semaphores().count(), 1);
        assert_eq!(k.semaphore_capacity(), 2);
    }

    #[test]
    fn subsystem_init_populates_table() {
        let k = kernel(8);
        k.init_clock().unwrap();
        k.init_threads().unwrap();
        let names: Vec<String> = k.semaphores().map(|s| s.printable_name()).collect();
        assert_eq!(names, ["CLKM", "THRD", "ONCE"]);
    }
}
