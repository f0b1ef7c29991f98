// Copyright 2025 Rekey Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! Transient local storage for objects in flight.
//!
//! Each move gets its own [`StagingArea`]: a uniquely named directory that is
//! removed when the area is closed or dropped, whichever comes first. Sibling
//! invocations sharing a temp directory never see each other's files.
//!
//! Files inside an area have fixed names, so the local path length does not
//! depend on the object key. Keys can be far longer than a local file name
//! is allowed to be.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

const STAGING_PREFIX: &str = "rekey-";
const DOWNLOAD_FILE_NAME: &str = "download";
const UPLOAD_FILE_NAME: &str = "upload";

/// A per-request staging directory.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
}

impl StagingArea {
    /// Creates a fresh staging directory under `root`, or under the system
    /// temp directory when `root` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn acquire(root: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX);

        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        debug!(path = %dir.path().display(), "Acquired staging area");
        Ok(Self { dir })
    }

    /// Directory backing this area.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes downloaded `data` into the area.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn stage(&self, data: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.path().join(DOWNLOAD_FILE_NAME);
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }

    /// Moves a staged download to the upload slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails.
    pub async fn rename(&self, staged: &Path) -> io::Result<PathBuf> {
        let path = self.dir.path().join(UPLOAD_FILE_NAME);
        tokio::fs::rename(staged, &path).await?;
        Ok(path)
    }

    /// Reads a staged file back.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn read(&self, staged: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(staged).await
    }

    /// Removes the staging directory, reporting any failure.
    ///
    /// Dropping the area also removes it, but silently.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be removed.
    pub fn close(self) -> io::Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to remove staging area");
        })
    }
}
