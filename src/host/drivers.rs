// CLASSIFICATION: COMMUNITY
// Filename: drivers.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

use log::debug;

use crate::interp::{CommandDef, CommandRegistry, DriverSet};

/// Driver set named in the host config. Each driver only announces itself;
/// `drvList` prints the set.
#[derive(Debug, Default)]
pub struct HostDrivers {
    names: Vec<String>,
}

impl HostDrivers {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl DriverSet for HostDrivers {
    fn register_drivers<'a>(&'a self, registry: &mut dyn CommandRegistry<'a>) {
        for name in &self.names {
            debug!("[drivers] registered {name}");
        }
        let names = &self.names;
        registry.register(CommandDef::new("drvList", "drvList", move |_, console| {
            for name in names {
                writeln!(console, "{name}")?;
            }
            Ok(())
        }));
    }
}
