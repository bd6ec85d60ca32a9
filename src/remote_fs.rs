// CLASSIFICATION: COMMUNITY
// Filename: remote_fs.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

//! Remote-file substitute standing in for the missing local filesystem.
//! Files are addressed only through translated [`RemotePath`]s; dropping
//! the returned stream closes it.

use std::io::BufRead;

use crate::error::FsError;
use crate::path::RemotePath;

pub trait RemoteFs {
    /// Mount the substitute at its fixed mount point.
    fn mount(&self) -> Result<(), FsError>;

    /// Open a file for reading.
    fn open(&self, path: &RemotePath) -> Result<Box<dyn BufRead>, FsError>;
}
