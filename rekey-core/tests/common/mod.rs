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

#![allow(dead_code)]

use async_trait::async_trait;
use rekey_core::store::{ObjectStore, StoreError};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

/// A store operation as seen by [`MockStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Exists(String),
    Fetch(String, String),
    Store(String, String),
    Delete(String, String),
}

/// A mock object store that keeps objects in memory and records every call.
///
/// Individual operations can be made to fail to exercise error paths.
#[derive(Debug, Default)]
pub struct MockStore {
    locations: Mutex<HashSet<String>>,
    objects: Mutex<BTreeMap<(String, String), Vec<u8>>>,
    calls: Mutex<Vec<Call>>,
    fail_exists: bool,
    fail_store: bool,
    fail_delete: bool,
    wipe_on_store: Option<PathBuf>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with the default `bucket-01` and `bucket-02` locations.
    pub fn with_default_locations() -> Self {
        let store = Self::new();
        store.add_location("bucket-01");
        store.add_location("bucket-02");
        store
    }

    pub fn failing_exists(mut self) -> Self {
        self.fail_exists = true;
        self
    }

    pub fn failing_store(mut self) -> Self {
        self.fail_store = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    /// Empties `root` during every `store` call, taking any staging area
    /// under it away from the orchestrator mid-move.
    pub fn wiping_on_store(mut self, root: impl Into<PathBuf>) -> Self {
        self.wipe_on_store = Some(root.into());
        self
    }

    pub fn add_location(&self, location: &str) {
        self.locations.lock().unwrap().insert(location.to_string());
    }

    pub fn put(&self, location: &str, key: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert((location.to_string(), key.to_string()), data.to_vec());
    }

    pub fn get(&self, location: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(location.to_string(), key.to_string()))
            .cloned()
    }

    pub fn keys(&self, location: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(loc, _)| loc == location)
            .map(|(_, key)| key.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn has_location(&self, location: &str) -> bool {
        self.locations.lock().unwrap().contains(location)
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn exists(&self, location: &str) -> Result<bool, StoreError> {
        self.record(Call::Exists(location.to_string()));
        if self.fail_exists {
            return Err(StoreError::connection_msg("simulated outage"));
        }
        Ok(self.has_location(location))
    }

    async fn fetch(&self, location: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        self.record(Call::Fetch(location.to_string(), key.to_string()));
        self.get(location, key)
            .ok_or_else(|| StoreError::not_found(location, key))
    }

    async fn store(&self, location: &str, key: &str, data: Vec<u8>) -> Result<(), StoreError> {
        self.record(Call::Store(location.to_string(), key.to_string()));
        if self.fail_store {
            return Err(StoreError::other_msg("simulated write failure", false));
        }
        if !self.has_location(location) {
            return Err(StoreError::location_not_found(location));
        }
        if let Some(root) = &self.wipe_on_store {
            for entry in std::fs::read_dir(root).unwrap() {
                std::fs::remove_dir_all(entry.unwrap().path()).unwrap();
            }
        }
        self.put(location, key, &data);
        Ok(())
    }

    async fn delete(&self, location: &str, key: &str) -> Result<(), StoreError> {
        self.record(Call::Delete(location.to_string(), key.to_string()));
        if self.fail_delete {
            return Err(StoreError::other_msg("simulated delete failure", true));
        }
        self.objects
            .lock()
            .unwrap()
            .remove(&(location.to_string(), key.to_string()));
        Ok(())
    }
}
