// CLASSIFICATION: COMMUNITY
// Filename: database.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Record-database loading commands. File names go through path
//! translation before they reach the loader.

use anyhow::anyhow;
use log::info;

use crate::error::LoadError;
use crate::interp::{CommandDef, CommandRegistry};
use crate::path::{PathTranslator, RemotePath};

/// Include path handed to the loader by `dbLoadDatabase`.
pub const DATABASE_INCLUDE_PATH: &str = "/";

/// Loader for record definitions and instances.
pub trait RecordLoader {
    fn load_database(
        &self,
        path: &RemotePath,
        include_path: &str,
        substitutions: Option<&str>,
    ) -> Result<(), LoadError>;

    fn load_records(&self, path: &RemotePath, substitutions: Option<&str>)
        -> Result<(), LoadError>;
}

#[derive(Clone, Copy)]
pub struct DatabaseCommands<'a> {
    translator: PathTranslator<'a>,
    loader: &'a dyn RecordLoader,
}

impl<'a> DatabaseCommands<'a> {
    #[must_use]
    pub fn new(translator: PathTranslator<'a>, loader: &'a dyn RecordLoader) -> Self {
        Self { translator, loader }
    }

    /// Load a database definition file. The loader's result is returned as is.
    pub fn load_database(&self, name: &str) -> Result<(), LoadError> {
        let path = self.translator.translate(name);
        info!("[db] load database {path}");
        self.loader
            .load_database(&path, DATABASE_INCLUDE_PATH, None)
    }

    /// Load record instances with optional macro substitutions.
    pub fn load_records(&self, name: &str, substitutions: Option<&str>) -> Result<(), LoadError> {
        let path = self.translator.translate(name);
        info!("[db] load records {path}");
        self.loader.load_records(&path, substitutions)
    }

    /// Register `dbLoadDatabase` and `dbLoadRecords`.
    pub fn register_into(self, registry: &mut dyn CommandRegistry<'a>) {
        registry.register(CommandDef::new(
            "dbLoadDatabase",
            "dbLoadDatabase file",
            move |args, _| {
                let name = args
                    .first()
                    .ok_or_else(|| anyhow!("dbLoadDatabase: missing file name"))?;
                self.load_database(name)?;
                Ok(())
            },
        ));
        registry.register(CommandDef::new(
            "dbLoadRecords",
            "dbLoadRecords file [substitutions]",
            move |args, _| {
                let name = args
                    .first()
                    .ok_or_else(|| anyhow!("dbLoadRecords: missing file name"))?;
                let substitutions = args.get(1).copied().filter(|s| !s.is_empty());
                self.load_records(name, substitutions)?;
                Ok(())
            },
        ));
    }
}
