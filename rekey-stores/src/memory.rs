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

//! In-memory object store implementation.
//!
//! This module provides a thread-safe, in-memory implementation of the
//! [`ObjectStore`] trait.
//!
//! # Use Cases
//!
//! - **Local development and testing** - No AWS account or emulator required
//! - **Dry runs** - Try out a pair of templates against sample keys
//!
//! # Limitations
//!
//! - **No persistence** - Objects are lost when the process exits
//! - **Single process only** - Cannot be shared across invocations
//!
//! # Example
//!
//! ```rust
//! use rekey_stores::memory::MemoryStore;
//! use rekey_core::store::ObjectStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::with_locations(["bucket-01", "bucket-02"]);
//! store.insert("bucket-01", "a_b.csv", b"data".to_vec()).await?;
//!
//! assert!(store.exists("bucket-01").await?);
//! assert_eq!(store.fetch("bucket-01", "a_b.csv").await?, b"data");
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The store uses [`Arc`] and [`RwLock`] internally. Clones share the same
//! objects and call counters.

use async_trait::async_trait;
use rekey_core::store::{ObjectStore, StoreError};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, trace};

type Location = BTreeMap<String, Vec<u8>>;

/// Number of calls made to each [`ObjectStore`] operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// Calls to `exists`
    pub exists: usize,
    /// Calls to `fetch`
    pub fetch: usize,
    /// Calls to `store`
    pub store: usize,
    /// Calls to `delete`
    pub delete: usize,
}

#[derive(Debug, Default)]
struct Counters {
    exists: AtomicUsize,
    fetch: AtomicUsize,
    store: AtomicUsize,
    delete: AtomicUsize,
}

/// In-memory object store.
///
/// Locations must be created before objects can be stored in them, like
/// buckets.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    locations: Arc<RwLock<HashMap<String, Location>>>,
    counters: Arc<Counters>,
}

impl MemoryStore {
    /// Creates an empty store with no locations.
    #[must_use]
    pub fn new() -> Self {
        debug!("Creating new in-memory object store");
        Self::default()
    }

    /// Creates a store with the given (empty) locations.
    #[must_use]
    pub fn with_locations<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let locations: HashMap<String, Location> = names
            .into_iter()
            .map(|name| (name.into(), Location::new()))
            .collect();
        debug!(
            location_count = locations.len(),
            "Creating in-memory object store with locations"
        );
        Self {
            locations: Arc::new(RwLock::new(locations)),
            counters: Arc::default(),
        }
    }

    /// Creates `location` if it does not already exist.
    pub async fn create_location(&self, location: impl Into<String>) {
        self.locations
            .write()
            .await
            .entry(location.into())
            .or_default();
    }

    /// Puts an object without counting it as a `store` call.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LocationNotFound`] if `location` does not exist.
    pub async fn insert(
        &self,
        location: &str,
        key: impl Into<String>,
        data: Vec<u8>,
    ) -> Result<(), StoreError> {
        let mut locations = self.locations.write().await;
        let objects = locations
            .get_mut(location)
            .ok_or_else(|| StoreError::location_not_found(location))?;
        objects.insert(key.into(), data);
        Ok(())
    }

    /// Reads an object without counting it as a `fetch` call.
    pub async fn get(&self, location: &str, key: &str) -> Option<Vec<u8>> {
        self.locations
            .read()
            .await
            .get(location)
            .and_then(|objects| objects.get(key))
            .cloned()
    }

    /// Keys in `location`, sorted.
    pub async fn keys(&self, location: &str) -> Vec<String> {
        self.locations
            .read()
            .await
            .get(location)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Total number of objects across all locations.
    pub async fn len(&self) -> usize {
        self.locations.read().await.values().map(BTreeMap::len).sum()
    }

    /// Whether the store holds no objects.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes every object, keeping the locations.
    pub async fn clear(&self) {
        for objects in self.locations.write().await.values_mut() {
            objects.clear();
        }
    }

    /// Calls made so far through the [`ObjectStore`] trait.
    #[must_use]
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            exists: self.counters.exists.load(Ordering::Relaxed),
            fetch: self.counters.fetch.load(Ordering::Relaxed),
            store: self.counters.store.load(Ordering::Relaxed),
            delete: self.counters.delete.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn exists(&self, location: &str) -> Result<bool, StoreError> {
        self.counters.exists.fetch_add(1, Ordering::Relaxed);
        Ok(self.locations.read().await.contains_key(location))
    }

    async fn fetch(&self, location: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        self.counters.fetch.fetch_add(1, Ordering::Relaxed);
        let locations = self.locations.read().await;
        let objects = locations
            .get(location)
            .ok_or_else(|| StoreError::location_not_found(location))?;

        let data = objects
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::not_found(location, key))?;
        trace!(location, key, bytes = data.len(), "Fetched object");
        Ok(data)
    }

    async fn store(&self, location: &str, key: &str, data: Vec<u8>) -> Result<(), StoreError> {
        self.counters.store.fetch_add(1, Ordering::Relaxed);
        trace!(location, key, bytes = data.len(), "Storing object");
        self.insert(location, key, data).await
    }

    async fn delete(&self, location: &str, key: &str) -> Result<(), StoreError> {
        self.counters.delete.fetch_add(1, Ordering::Relaxed);
        let mut locations = self.locations.write().await;
        let objects = locations
            .get_mut(location)
            .ok_or_else(|| StoreError::location_not_found(location))?;

        if objects.remove(key).is_none() {
            debug!(location, key, "Delete of missing object");
        }
        Ok(())
    }
}
