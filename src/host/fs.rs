// CLASSIFICATION: COMMUNITY
// Filename: fs.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use crate::error::FsError;
use crate::path::RemotePath;
use crate::remote_fs::RemoteFs;

/// Serves a local directory as the remote file tree. The server-address
/// segment of a remote path is dropped: `/TFTP/<ip>/epics/ioc/st.cmd`
/// resolves to `<root>/epics/ioc/st.cmd`.
#[derive(Debug)]
pub struct HostRemoteFs {
    root: PathBuf,
    mount_root: String,
    mounted: AtomicBool,
}

impl HostRemoteFs {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, mount_root: &str) -> Self {
        Self {
            root: root.into(),
            mount_root: format!("{}/", mount_root.trim_end_matches('/')),
            mounted: AtomicBool::new(false),
        }
    }

    /// Local file behind a remote path, if the path is under the mount.
    #[must_use]
    pub fn local_path(&self, path: &RemotePath) -> Option<PathBuf> {
        let below_mount = path.as_str().strip_prefix(&self.mount_root)?;
        let (_server, rest) = below_mount.split_once('/')?;
        Some(self.root.join(rest))
    }
}

impl RemoteFs for HostRemoteFs {
    fn mount(&self) -> Result<(), FsError> {
        if !self.root.is_dir() {
            return Err(FsError::Mount(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }
        self.mounted.store(true, Ordering::Release);
        info!("[fs] {} mounted at {}", self.root.display(), self.mount_root);
        Ok(())
    }

    fn open(&self, path: &RemotePath) -> Result<Box<dyn BufRead>, FsError> {
        if !self.mounted.load(Ordering::Acquire) {
            return Err(FsError::NotMounted);
        }
        let local = self.local_path(path).ok_or_else(|| FsError::Open {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "outside mount"),
        })?;
        debug!("[fs] open {path} -> {}", local.display());
        let file = File::open(&local).map_err(|source| FsError::Open {
            path: path.to_string(),
            source,
        })?;
        Ok(Box::new(BufReader::new(file)))
    }
}
