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

//! Lambda that renames objects as they land in the source bucket.
//!
//! Settings are read once at cold start from the environment (see
//! [`RenameConfig::from_env`]); `RUST_LOG` controls log filtering.

use lambda_runtime::{run, service_fn, Error};
use rekey_core::config::RenameConfig;
use rekey_stores::s3::{S3Store, S3StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod handler;
use handler::function_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rekey_core=info,rekey_stores=info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .without_time()
        .init();

    let config = RenameConfig::from_env();
    info!(
        source = %config.source_location,
        dest = %config.dest_location,
        source_pattern = %config.source_pattern,
        dest_pattern = %config.dest_pattern,
        "Loaded rename configuration"
    );

    let store = S3Store::new(S3StoreConfig::default()).await;
    run(service_fn(|event| function_handler(event, &store, &config))).await
}
