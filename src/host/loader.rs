// CLASSIFICATION: COMMUNITY
// Filename: loader.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

use std::collections::BTreeMap;
use std::io::BufRead;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;

use crate::database::RecordLoader;
use crate::error::LoadError;
use crate::path::RemotePath;
use crate::remote_fs::RemoteFs;

/// Loader that reads database files through the remote filesystem and
/// checks their shape: balanced braces, and every `$(NAME)` macro in a
/// record file resolved by the substitutions.
pub struct HostRecordLoader<'a> {
    fs: &'a dyn RemoteFs,
    definitions: AtomicUsize,
    records: AtomicUsize,
}

impl<'a> HostRecordLoader<'a> {
    #[must_use]
    pub fn new(fs: &'a dyn RemoteFs) -> Self {
        Self {
            fs,
            definitions: AtomicUsize::new(0),
            records: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn definition_count(&self) -> usize {
        self.definitions.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.load(Ordering::Relaxed)
    }

    fn read_lines(&self, path: &RemotePath) -> Result<Vec<String>, LoadError> {
        let read_err = |reason: String| LoadError::Read {
            path: path.to_string(),
            reason,
        };
        let stream = self.fs.open(path).map_err(|err| read_err(err.to_string()))?;
        let lines = stream
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| read_err(err.to_string()))?;
        check_braces(path, &lines)?;
        Ok(lines)
    }
}

fn check_braces(path: &RemotePath, lines: &[String]) -> Result<(), LoadError> {
    let mut depth = 0i64;
    for (number, line) in lines.iter().enumerate() {
        for c in line.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return Err(LoadError::Parse {
                    path: path.to_string(),
                    reason: format!("line {}: unmatched '}}'", number + 1),
                });
            }
        }
    }
    if depth != 0 {
        return Err(LoadError::Parse {
            path: path.to_string(),
            reason: "unterminated block".into(),
        });
    }
    Ok(())
}

/// Parse `A=1,B=2` into a macro table.
fn parse_substitutions(raw: &str) -> BTreeMap<&str, &str> {
    raw.split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim()))
        .collect()
}

fn expand(line: &str, macros: &BTreeMap<&str, &str>) -> Result<String, String> {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(start) = rest.find("$(") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find(')')
            .ok_or_else(|| "unterminated macro reference".to_owned())?;
        let name = &after[..end];
        let value = macros
            .get(name)
            .ok_or_else(|| format!("undefined macro '{name}'"))?;
        out.push_str(value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

impl RecordLoader for HostRecordLoader<'_> {
    fn load_database(
        &self,
        path: &RemotePath,
        include_path: &str,
        substitutions: Option<&str>,
    ) -> Result<(), LoadError> {
        let lines = self.read_lines(path)?;
        let definitions = lines
            .iter()
            .map(|l| l.trim_start())
            .filter(|l| {
                ["recordtype", "device", "driver", "menu"]
                    .iter()
                    .any(|kw| l.starts_with(kw))
            })
            .count();
        self.definitions.fetch_add(definitions, Ordering::Relaxed);
        info!(
            "[db] {path}: {definitions} definition(s), include path {include_path}, substitutions {}",
            substitutions.unwrap_or("-")
        );
        Ok(())
    }

    fn load_records(
        &self,
        path: &RemotePath,
        substitutions: Option<&str>,
    ) -> Result<(), LoadError> {
        let lines = self.read_lines(path)?;
        let macros = substitutions.map(parse_substitutions).unwrap_or_default();
        let mut records = 0;
        for (number, line) in lines.iter().enumerate() {
            let expanded = expand(line, &macros).map_err(|reason| LoadError::Parse {
                path: path.to_string(),
                reason: format!("line {}: {reason}", number + 1),
            })?;
            if expanded.trim_start().starts_with("record(") {
                records += 1;
            }
        }
        self.records.fetch_add(records, Ordering::Relaxed);
        info!("[db] {path}: {records} record(s)");
        Ok(())
    }
}
