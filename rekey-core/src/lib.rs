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

//! Rekey Core - Filename Remapping and Object Moves
//!
//! This crate renames objects by reordering the delimiter-separated fields of
//! their file names, and moves them from a source location to a destination
//! location through an [`ObjectStore`](store::ObjectStore).
//!
//! # Key Components
//!
//! - **Patterns**: [`pattern`] compiles filename templates and remaps fields
//! - **Configuration**: [`config`] holds locations, templates and delimiter
//! - **Stores**: [`store`] defines the object store contract
//! - **Orchestration**: [`orchestrator`] moves a single object
//! - **Batches**: [`batch`] processes a list of notifications
//!
//! # Example
//!
//! ```rust
//! use rekey_core::pattern::PatternMapper;
//!
//! let mapper = PatternMapper::new("0_1_2_3_4.csv", "0_1_4_2_3.csv", "_").unwrap();
//! assert_eq!(
//!     mapper.transform_key("inbox/ABC_test_123_20190912_0010.csv").unwrap(),
//!     "inbox/ABC_test_0010_123_20190912.csv"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod orchestrator;
pub mod pattern;
pub mod staging;
pub mod store;

pub use batch::{process_batch, BatchReport, Notification, RecordOutcome};
pub use config::{ConfigError, RenameConfig, RenameConfigBuilder};
pub use orchestrator::{RenameError, RenameOrchestrator, RunOutcome};
pub use pattern::{FieldMap, Pattern, PatternError, PatternMapper};
pub use store::{ObjectStore, StoreError};
