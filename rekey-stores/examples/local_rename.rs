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

//! Local rename example.
//!
//! Runs a batch of notifications through the in-memory store, so templates
//! can be tried without an AWS account. The templates and delimiter are read
//! from the same environment variables as the Lambda.
//!
//! # Running
//!
//! ```bash
//! cargo run -p rekey-stores --example local_rename
//!
//! # Custom templates
//! SOURCE_PATTERN=0-1.csv DEST_PATTERN=1-0.csv FIELD_DELIMITER=- \
//!     cargo run -p rekey-stores --example local_rename -- north-south.csv
//! ```

use rekey_core::batch::{process_batch, Notification};
use rekey_core::config::RenameConfig;
use rekey_stores::memory::MemoryStore;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== Local Rename Example ===\n");

    let config = RenameConfig::from_env();
    println!("Configuration:");
    println!("  Source: {}", config.source_location);
    println!("  Destination: {}", config.dest_location);
    println!("  Templates: {} -> {}", config.source_pattern, config.dest_pattern);
    println!("  Delimiter: {:?}\n", config.delimiter);

    let mut keys: Vec<String> = env::args().skip(1).collect();
    if keys.is_empty() {
        keys = vec![
            "ABC_test_123_20190912_0010.csv".to_string(),
            "inbox/XYZ_prod_456_20200101_2359.csv".to_string(),
            "too_short.csv".to_string(),
        ];
    }

    let store = MemoryStore::with_locations([&config.source_location, &config.dest_location]);
    for key in &keys {
        store
            .insert(&config.source_location, key.clone(), key.as_bytes().to_vec())
            .await?;
    }

    let report = process_batch(&store, &config, keys.into_iter().map(Notification::new)).await;

    println!("Results:");
    for outcome in report.outcomes() {
        let key = outcome.key.as_deref().unwrap_or("<none>");
        match outcome.dest_key() {
            Some(dest_key) => println!("  {key} -> {dest_key}"),
            None => println!("  {key} -> not moved ({:?})", outcome.result),
        }
    }

    println!(
        "\n{} moved, {} failed, status: {}",
        report.succeeded(),
        report.failed(),
        report.legacy_status()
    );
    println!("Destination now holds: {:?}", store.keys(&config.dest_location).await);

    Ok(())
}
