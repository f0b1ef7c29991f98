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

//! Shared fixtures for the Rekey benchmarks.

use rekey_core::config::RenameConfig;
use rekey_stores::memory::MemoryStore;

/// Builds `count` keys matching the default five-field template.
pub fn sample_keys(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("SRC_feed{}_{}_2019{:04}_{:04}.csv", i % 7, i, i % 1231, i % 2400))
        .collect()
}

/// A template with `fields` labels, in order or reversed.
pub fn template(fields: usize, reversed: bool, delimiter: &str) -> String {
    let mut labels: Vec<String> = (0..fields).map(|i| i.to_string()).collect();
    if reversed {
        labels.reverse();
    }
    format!("{}.csv", labels.join(delimiter))
}

/// A filename with `fields` fields.
pub fn filename(fields: usize, delimiter: &str) -> String {
    let values: Vec<String> = (0..fields).map(|i| format!("v{i}")).collect();
    format!("{}.csv", values.join(delimiter))
}

/// A memory store with the configured locations, holding `keys` in the
/// source location.
///
/// # Panics
///
/// Panics if the source location cannot be written, which only happens if
/// the store was not created with it.
pub async fn seeded_store(config: &RenameConfig, keys: &[String], payload: &[u8]) -> MemoryStore {
    let store = MemoryStore::with_locations([&config.source_location, &config.dest_location]);
    for key in keys {
        store
            .insert(&config.source_location, key.clone(), payload.to_vec())
            .await
            .expect("source location exists");
    }
    store
}
