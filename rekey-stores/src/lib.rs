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

//! Object store implementations for Rekey.
//!
//! This crate provides backend implementations of the
//! [`ObjectStore`](rekey_core::store::ObjectStore) trait that the rename
//! orchestrator moves objects through.
//!
//! # Available Stores
//!
//! - **Memory** (`memory` feature): In-process store for tests and dry runs
//! - **S3** (`s3` feature): AWS S3 and S3-compatible services
//!
//! # Feature Flags
//!
//! - `memory`: Enables [`memory::MemoryStore`]
//! - `s3`: Enables [`s3::S3Store`] (pulls in the AWS SDK)
//!
//! # Example: Memory Store
//!
//! ```rust
//! use rekey_core::batch::{process_batch, Notification};
//! use rekey_core::config::RenameConfig;
//! use rekey_stores::memory::MemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::with_locations(["bucket-01", "bucket-02"]);
//! store
//!     .insert("bucket-01", "ABC_test_123_20190912_0010.csv", b"id\n".to_vec())
//!     .await?;
//!
//! let report = process_batch(
//!     &store,
//!     &RenameConfig::default(),
//!     [Notification::new("ABC_test_123_20190912_0010.csv")],
//! )
//! .await;
//!
//! assert_eq!(report.succeeded(), 1);
//! assert!(store.get("bucket-02", "ABC_test_0010_123_20190912.csv").await.is_some());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "s3")]
pub mod s3;
