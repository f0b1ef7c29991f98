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

//! Object Store Trait and Error Types
//!
//! The [`ObjectStore`] trait is the only way the rename orchestrator touches
//! storage. A *location* is a named container (an S3 bucket) and a *key*
//! names one object inside it.
//!
//! Implementations live in the `rekey-stores` crate:
//! - `MemoryStore` for tests and local runs
//! - `S3Store` for AWS S3 and S3-compatible storage
//!
//! # Contract
//!
//! - [`ObjectStore::exists`] reports whether a location exists; a missing
//!   location is `Ok(false)`, not an error.
//! - [`ObjectStore::fetch`] returns [`StoreError::NotFound`] for a missing key.
//! - [`ObjectStore::store`] overwrites any existing object.
//! - [`ObjectStore::delete`] succeeds when the key is already gone.
//!
//! Every operation is safe for the caller to retry. Implementations must not
//! retry internally beyond what their client library does by default.
//!
//! # Implementing a Store
//!
//! ```rust
//! use async_trait::async_trait;
//! use rekey_core::store::{ObjectStore, StoreError};
//!
//! /// A store with a single empty location.
//! struct EmptyStore;
//!
//! #[async_trait]
//! impl ObjectStore for EmptyStore {
//!     async fn exists(&self, location: &str) -> Result<bool, StoreError> {
//!         Ok(location == "empty")
//!     }
//!
//!     async fn fetch(&self, location: &str, key: &str) -> Result<Vec<u8>, StoreError> {
//!         Err(StoreError::not_found(location, key))
//!     }
//!
//!     async fn store(&self, location: &str, _key: &str, _data: Vec<u8>) -> Result<(), StoreError> {
//!         Err(StoreError::location_not_found(location))
//!     }
//!
//!     async fn delete(&self, _location: &str, _key: &str) -> Result<(), StoreError> {
//!         Ok(())
//!     }
//! }
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when talking to an object store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested object does not exist.
    #[error("Object not found: {location}/{key}")]
    NotFound {
        /// Location that was searched
        location: String,
        /// Missing key
        key: String,
    },

    /// The location itself does not exist.
    #[error("Location not found: {location}")]
    LocationNotFound {
        /// Missing location
        location: String,
    },

    /// The store could not be reached.
    ///
    /// Typically retryable after a backoff period.
    #[error("Connection error: {message}")]
    Connection {
        /// Human-readable error message
        message: String,
        /// The underlying connection error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Any other store failure.
    #[error("Object store error: {message}")]
    Other {
        /// Human-readable error message
        message: String,
        /// Whether this error is retryable
        retryable: bool,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Creates a not-found error for `location`/`key`.
    #[must_use]
    pub fn not_found(location: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            location: location.into(),
            key: key.into(),
        }
    }

    /// Creates a location-not-found error.
    #[must_use]
    pub fn location_not_found(location: impl Into<String>) -> Self {
        Self::LocationNotFound {
            location: location.into(),
        }
    }

    /// Creates a connection error from any error type.
    #[must_use]
    pub fn connection(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connection {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a connection error with a custom message.
    #[must_use]
    pub fn connection_msg(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a generic error.
    #[must_use]
    pub fn other(source: impl std::error::Error + Send + Sync + 'static, retryable: bool) -> Self {
        Self::Other {
            message: source.to_string(),
            retryable,
            source: Some(Box::new(source)),
        }
    }

    /// Creates a generic error with a custom message.
    #[must_use]
    pub fn other_msg(message: impl Into<String>, retryable: bool) -> Self {
        Self::Other {
            message: message.into(),
            retryable,
            source: None,
        }
    }

    /// Returns whether a caller may reasonably retry the operation.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Connection { .. } => true,
            Self::NotFound { .. } | Self::LocationNotFound { .. } => false,
            Self::Other { retryable, .. } => *retryable,
        }
    }

    /// Returns whether this is [`StoreError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Storage operations needed to move one object between locations.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns whether `location` exists.
    ///
    /// # Errors
    ///
    /// Returns an error only when existence cannot be determined.
    async fn exists(&self, location: &str) -> Result<bool, StoreError>;

    /// Reads the object at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the key does not exist.
    async fn fetch(&self, location: &str, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Writes `data` at `key`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn store(&self, location: &str, key: &str, data: Vec<u8>) -> Result<(), StoreError>;

    /// Removes the object at `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails. A missing key is not an error.
    async fn delete(&self, location: &str, key: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    async fn exists(&self, location: &str) -> Result<bool, StoreError> {
        (**self).exists(location).await
    }

    async fn fetch(&self, location: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        (**self).fetch(location, key).await
    }

    async fn store(&self, location: &str, key: &str, data: Vec<u8>) -> Result<(), StoreError> {
        (**self).store(location, key, data).await
    }

    async fn delete(&self, location: &str, key: &str) -> Result<(), StoreError> {
        (**self).delete(location, key).await
    }
}
