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

//! AWS S3 object store.
//!
//! Implements [`ObjectStore`](rekey_core::store::ObjectStore) on top of the
//! AWS SDK. Locations map to buckets.
//!
//! | Operation | S3 call | Notes |
//! |---|---|---|
//! | `exists` | `HeadBucket` | `NotFound` → `Ok(false)` |
//! | `fetch` | `GetObject` | `NoSuchKey` → `StoreError::NotFound` |
//! | `store` | `PutObject` | |
//! | `delete` | `DeleteObject` | |
//!
//! # Using LocalStack for testing
//!
//! ```rust,ignore
//! let config = S3StoreConfig::builder()
//!     .region("us-east-1")
//!     .endpoint_url("http://localhost:4566")
//!     .force_path_style(true)
//!     .build()?;
//!
//! let store = S3Store::new(config).await;
//! ```

pub mod config;
pub mod store;

pub use config::{S3StoreConfig, S3StoreConfigBuilder, S3StoreConfigError};
pub use store::S3Store;
