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

//! S3 store configuration.
//!
//! This module provides the client options for the S3 store:
//! - Region override
//! - Custom endpoints for S3-compatible storage
//! - Retry tuning

use thiserror::Error;

/// Default number of SDK attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Errors raised when building an [`S3StoreConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum S3StoreConfigError {
    /// A string option was set to an empty value.
    #[error("{field} cannot be empty")]
    Empty {
        /// Name of the offending option
        field: &'static str,
    },

    /// `max_attempts` was zero.
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
}

/// Configuration for the S3 store.
///
/// Buckets are not part of the configuration: every operation names its
/// location explicitly.
///
/// # Examples
///
/// ## Lambda defaults
///
/// ```rust
/// use rekey_stores::s3::S3StoreConfig;
///
/// // Region and credentials come from the environment
/// let config = S3StoreConfig::default();
/// assert!(config.region.is_none());
/// ```
///
/// ## LocalStack
///
/// ```rust
/// use rekey_stores::s3::S3StoreConfig;
///
/// let config = S3StoreConfig::builder()
///     .region("us-east-1")
///     .endpoint_url("http://localhost:4566")
///     .force_path_style(true)
///     .build()
///     .unwrap();
/// assert!(config.force_path_style);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3StoreConfig {
    /// AWS region override.
    ///
    /// When `None`, the region is resolved by the default provider chain
    /// (`AWS_REGION` inside Lambda).
    pub region: Option<String>,

    /// Custom endpoint URL for S3-compatible storage (e.g., MinIO, LocalStack).
    pub endpoint_url: Option<String>,

    /// Whether to use path-style addressing (default: false).
    ///
    /// Required for: LocalStack, MinIO
    pub force_path_style: bool,

    /// Maximum attempts per SDK request, including the first (default: 3).
    pub max_attempts: u32,
}

impl Default for S3StoreConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint_url: None,
            force_path_style: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl S3StoreConfig {
    /// Creates a new builder for `S3StoreConfig`.
    #[must_use]
    pub fn builder() -> S3StoreConfigBuilder {
        S3StoreConfigBuilder::default()
    }
}

/// Builder for [`S3StoreConfig`].
#[derive(Debug, Default)]
pub struct S3StoreConfigBuilder {
    region: Option<String>,
    endpoint_url: Option<String>,
    force_path_style: Option<bool>,
    max_attempts: Option<u32>,
}

impl S3StoreConfigBuilder {
    /// Sets the AWS region.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets a custom S3 endpoint URL.
    ///
    /// ```rust,ignore
    /// // LocalStack
    /// builder.endpoint_url("http://localhost:4566")
    ///
    /// // MinIO
    /// builder.endpoint_url("http://minio:9000")
    /// ```
    #[must_use]
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Forces path-style addressing.
    #[must_use]
    pub fn force_path_style(mut self, force: bool) -> Self {
        self.force_path_style = Some(force);
        self
    }

    /// Sets the maximum number of attempts per request.
    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Builds the `S3StoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns an error if `region` or `endpoint_url` is set to an empty
    /// string, or if `max_attempts` is zero.
    pub fn build(self) -> Result<S3StoreConfig, S3StoreConfigError> {
        if self.region.as_deref() == Some("") {
            return Err(S3StoreConfigError::Empty { field: "region" });
        }
        if self.endpoint_url.as_deref() == Some("") {
            return Err(S3StoreConfigError::Empty {
                field: "endpoint_url",
            });
        }

        let max_attempts = self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            return Err(S3StoreConfigError::ZeroAttempts);
        }

        Ok(S3StoreConfig {
            region: self.region,
            endpoint_url: self.endpoint_url,
            force_path_style: self.force_path_style.unwrap_or(false),
            max_attempts,
        })
    }
}
