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

//! Notification batches.
//!
//! An event source delivers a batch of "object created" notifications.
//! [`process_batch`] handles them one at a time, in delivery order, each with
//! a fresh [`RenameOrchestrator`]. A failing record never stops the batch.
//!
//! The resulting [`BatchReport`] carries one [`RecordOutcome`] per
//! notification plus [`BatchReport::legacy_status`], the single boolean the
//! invocation entry point returns.

use crate::config::RenameConfig;
use crate::orchestrator::{RenameOrchestrator, RunOutcome};
use crate::pattern::PatternError;
use crate::store::ObjectStore;
use tracing::{error, info, instrument, warn};

/// One "object created" notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Key of the new object in the source location, if the record had one.
    pub key: Option<String>,
}

impl Notification {
    /// Creates a notification for `key`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    /// Creates a notification whose record carried no key.
    #[must_use]
    pub const fn without_key() -> Self {
        Self { key: None }
    }
}

impl From<&str> for Notification {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for Notification {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

/// What happened to one notification.
#[derive(Debug)]
pub struct RecordOutcome {
    /// Key the notification carried.
    pub key: Option<String>,

    /// Orchestrator result. `Err` means the configured templates did not
    /// compile.
    pub result: Result<RunOutcome, PatternError>,
}

impl RecordOutcome {
    /// Whether the object was moved.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.result, Ok(RunOutcome::Moved { .. }))
    }

    /// Destination key, if the object was moved.
    #[must_use]
    pub fn dest_key(&self) -> Option<&str> {
        self.result.as_ref().ok().and_then(RunOutcome::dest_key)
    }

    /// The value `run` returned for this record, or `None` if it failed.
    #[must_use]
    pub fn run_status(&self) -> Option<bool> {
        self.result.as_ref().ok().map(RunOutcome::validated)
    }
}

/// Outcomes of every notification in a batch, in delivery order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    /// Per-record outcomes.
    #[must_use]
    pub fn outcomes(&self) -> &[RecordOutcome] {
        &self.outcomes
    }

    /// Number of records processed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether the batch was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of records whose object was moved.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of records whose object was not moved.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    /// Status of the last record whose run completed.
    ///
    /// Records whose run failed outright leave the previous value in place,
    /// and the status starts out `false`. This is what the entry point
    /// returns; it says nothing about whether any object was moved.
    #[must_use]
    pub fn legacy_status(&self) -> bool {
        self.outcomes
            .iter()
            .filter_map(RecordOutcome::run_status)
            .last()
            .unwrap_or(false)
    }
}

/// Processes `notifications` in order against `store`.
///
/// Every error is logged and recorded; none is returned.
#[instrument(skip_all, fields(source = %config.source_location, dest = %config.dest_location))]
pub async fn process_batch<S, I>(store: &S, config: &RenameConfig, notifications: I) -> BatchReport
where
    S: ObjectStore + ?Sized,
    I: IntoIterator<Item = Notification>,
{
    let mut report = BatchReport::default();

    for notification in notifications {
        let orchestrator = RenameOrchestrator::new(store, config, notification.key.clone());
        let result = orchestrator.execute().await;

        match &result {
            Ok(outcome) => {
                info!(key = ?notification.key, status = outcome.validated(), "Execution status");
                if let RunOutcome::ValidationFailed = outcome {
                    warn!(key = ?notification.key, "Skipped record, locations failed validation");
                }
            }
            Err(e) => {
                error!(key = ?notification.key, error = %e, details = ?e, "Unable to process request");
            }
        }

        report.outcomes.push(RecordOutcome {
            key: notification.key,
            result,
        });
    }

    info!(
        records = report.len(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        "Batch processed"
    );
    report
}
