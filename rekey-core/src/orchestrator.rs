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

//! Rename orchestration for a single notification.
//!
//! A [`RenameOrchestrator`] is built per notification and drives it through:
//!
//! ```text
//! Received -> Validating -> Failed(validation)
//!                        -> Transforming -> Failed(pattern)
//!                                        -> Moving -> Failed(io)
//!                                                  -> Succeeded
//! ```
//!
//! Every failure is terminal; nothing is retried here. Move failures are
//! logged and reported through [`RunOutcome`] rather than returned as errors,
//! so a caller iterating a batch keeps going.
//!
//! # Example
//!
//! ```rust,ignore
//! use rekey_core::config::RenameConfig;
//! use rekey_core::orchestrator::RenameOrchestrator;
//!
//! let config = RenameConfig::from_env();
//! let key = Some("ABC_test_123_20190912_0010.csv".to_string());
//! let orchestrator = RenameOrchestrator::new(&store, &config, key);
//! let validated = orchestrator.run().await?;
//! ```

use crate::config::RenameConfig;
use crate::pattern::{PatternError, PatternMapper};
use crate::staging::StagingArea;
use crate::store::{ObjectStore, StoreError};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// Errors that abort a single move.
#[derive(Error, Debug)]
pub enum RenameError {
    /// The key could not be renamed.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The local staging area failed.
    #[error("Staging error: {0}")]
    Staging(#[from] std::io::Error),
}

impl RenameError {
    /// Returns whether the source object was missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_not_found())
    }
}

/// Result of a [`RenameOrchestrator::execute`] call.
#[derive(Debug)]
pub enum RunOutcome {
    /// A location check failed; nothing else ran.
    ValidationFailed,

    /// Validation passed and there was no key to move.
    NoKey,

    /// The object was moved to `dest_key`.
    Moved {
        /// Key written in the destination location
        dest_key: String,
    },

    /// Validation passed but the move failed.
    MoveFailed(RenameError),
}

impl RunOutcome {
    /// Whether location validation succeeded.
    #[must_use]
    pub const fn validated(&self) -> bool {
        !matches!(self, Self::ValidationFailed)
    }

    /// Destination key, if the move succeeded.
    #[must_use]
    pub fn dest_key(&self) -> Option<&str> {
        match self {
            Self::Moved { dest_key } => Some(dest_key),
            _ => None,
        }
    }
}

/// Moves one object from the source location to the destination location
/// under its remapped name.
pub struct RenameOrchestrator<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    config: &'a RenameConfig,
    key: Option<String>,
}

impl<'a, S: ObjectStore + ?Sized> RenameOrchestrator<'a, S> {
    /// Creates an orchestrator for `key`.
    ///
    /// With `key` set to `None`, running only validates locations and
    /// compiles the patterns.
    pub fn new(store: &'a S, config: &'a RenameConfig, key: Option<String>) -> Self {
        Self { store, config, key }
    }

    /// Key this orchestrator was created for.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Checks that the configured locations exist.
    ///
    /// Logs and returns `false` when a check fails or cannot be completed.
    pub async fn validate_locations(&self) -> bool {
        // The source location is checked twice; the destination is not checked.
        for _ in 0..2 {
            if !self.location_exists(&self.config.source_location).await {
                return false;
            }
        }
        true
    }

    async fn location_exists(&self, location: &str) -> bool {
        match self.store.exists(location).await {
            Ok(true) => true,
            Ok(false) => {
                error!(location = %location, "Unable to find location");
                false
            }
            Err(e) => {
                error!(location = %location, error = ?e, "Failed to check location");
                false
            }
        }
    }

    /// Validates, compiles the patterns and, if a key is present, moves it.
    ///
    /// Returns `Ok(true)` whenever validation succeeded, even if the move
    /// itself failed; see [`RenameOrchestrator::execute`] for the detail.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the configured templates do not compile.
    pub async fn run(&self) -> Result<bool, PatternError> {
        self.execute().await.map(|outcome| outcome.validated())
    }

    /// Like [`RenameOrchestrator::run`] but reports what happened.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the configured templates do not compile.
    #[instrument(skip(self), fields(key = self.key.as_deref().unwrap_or("")))]
    pub async fn execute(&self) -> Result<RunOutcome, PatternError> {
        if !self.validate_locations().await {
            return Ok(RunOutcome::ValidationFailed);
        }

        let mapper = PatternMapper::from_config(self.config)?;

        let Some(key) = self.key.as_deref() else {
            debug!("No key supplied, nothing to move");
            return Ok(RunOutcome::NoKey);
        };

        match self.move_one(&mapper, key).await {
            Ok(dest_key) => Ok(RunOutcome::Moved { dest_key }),
            Err(e) => {
                error!(error = %e, details = ?e, "Failed to rename file");
                Ok(RunOutcome::MoveFailed(e))
            }
        }
    }

    /// Renames `key` with `mapper`, copies it to the destination location
    /// and deletes the original. Returns the destination key.
    ///
    /// The staging area is released on every path out of this method.
    ///
    /// # Errors
    ///
    /// Returns the first pattern, store or staging failure. Failing to
    /// remove the staging directory is logged but not returned. The original
    /// object is only deleted after the copy has been stored.
    pub async fn move_one(&self, mapper: &PatternMapper, key: &str) -> Result<String, RenameError> {
        let source = &self.config.source_location;
        let dest = &self.config.dest_location;

        let dest_key = mapper.transform_key(key)?;
        info!("File: [{}/{}] => [{}/{}]", source, key, dest, dest_key);

        let staging = StagingArea::acquire(self.config.staging_dir.as_deref())?;

        let data = self.store.fetch(source, key).await?;
        let size = data.len();
        let downloaded = staging.stage(&data).await?;
        drop(data);

        let upload = staging.rename(&downloaded).await?;
        let body = staging.read(&upload).await?;
        self.store.store(dest, &dest_key, body).await?;

        // Cleanup failures are logged by `close` and never block the delete.
        let _ = staging.close();

        self.store.delete(source, key).await?;

        info!(bytes = size, "Moved {}/{} to {}/{}", source, key, dest, dest_key);
        Ok(dest_key)
    }
}
