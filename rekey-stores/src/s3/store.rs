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

//! S3 store implementation.

use crate::s3::config::S3StoreConfig;
use async_trait::async_trait;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use rekey_core::store::{ObjectStore, StoreError};
use tracing::{debug, info, trace};

/// Service error codes worth retrying.
const RETRYABLE_CODES: &[&str] = &[
    "SlowDown",
    "ServiceUnavailable",
    "InternalError",
    "RequestTimeout",
];

/// Object store backed by AWS S3 (or any S3-compatible service).
///
/// Locations are bucket names and keys are object keys.
///
/// # Examples
///
/// ```rust,no_run
/// use rekey_core::store::ObjectStore;
/// use rekey_stores::s3::{S3Store, S3StoreConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = S3Store::new(S3StoreConfig::default()).await;
///
/// if store.exists("bucket-01").await? {
///     let data = store.fetch("bucket-01", "a_b.csv").await?;
///     store.store("bucket-02", "b_a.csv", data).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct S3Store {
    client: S3Client,
}

impl S3Store {
    /// Creates a store, loading AWS settings from the environment.
    ///
    /// Credentials and (unless overridden) the region come from the default
    /// provider chain.
    pub async fn new(config: S3StoreConfig) -> Self {
        info!(
            region = ?config.region,
            endpoint_url = ?config.endpoint_url,
            "Initializing S3 store"
        );

        let mut aws_config_builder = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            aws_config_builder = aws_config_builder.region(aws_config::Region::new(region.clone()));
        }

        // Custom endpoint for LocalStack, MinIO, etc.
        if let Some(endpoint_url) = &config.endpoint_url {
            debug!("Using custom S3 endpoint: {}", endpoint_url);
            aws_config_builder = aws_config_builder.endpoint_url(endpoint_url);
        }

        let aws_config = aws_config_builder.load().await;

        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&aws_config).retry_config(
            aws_sdk_s3::config::retry::RetryConfig::standard()
                .with_max_attempts(config.max_attempts),
        );

        if config.force_path_style {
            debug!("Using path-style S3 addressing");
            s3_config_builder = s3_config_builder.force_path_style(true);
        }

        Self::from_client(S3Client::from_conf(s3_config_builder.build()))
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn from_client(client: S3Client) -> Self {
        Self { client }
    }

    /// Returns the underlying SDK client.
    #[must_use]
    pub fn client(&self) -> &S3Client {
        &self.client
    }
}

/// Classifies S3 SDK errors into appropriate [`StoreError`] variants.
fn classify_sdk_error<E, R>(error: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    match error {
        // Network/connection errors - retryable
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => StoreError::connection(error),

        SdkError::ServiceError(ref service_err) => {
            let retryable = service_err
                .err()
                .code()
                .is_some_and(|code| RETRYABLE_CODES.contains(&code));
            StoreError::other(error, retryable)
        }

        _ => StoreError::other(error, false),
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn exists(&self, location: &str) -> Result<bool, StoreError> {
        match self.client.head_bucket().bucket(location).send().await {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(ref service_err)) if service_err.err().is_not_found() => {
                debug!(bucket = location, "Bucket not found");
                Ok(false)
            }
            Err(e) => Err(classify_sdk_error(e)),
        }
    }

    async fn fetch(&self, location: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let output = match self
            .client
            .get_object()
            .bucket(location)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(SdkError::ServiceError(ref service_err)) if service_err.err().is_no_such_key() => {
                return Err(StoreError::not_found(location, key));
            }
            Err(e) => return Err(classify_sdk_error(e)),
        };

        let data = output
            .body
            .collect()
            .await
            .map_err(StoreError::connection)?
            .into_bytes()
            .to_vec();

        trace!(bucket = location, key, bytes = data.len(), "Downloaded object");
        Ok(data)
    }

    async fn store(&self, location: &str, key: &str, data: Vec<u8>) -> Result<(), StoreError> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(location)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(classify_sdk_error)?;

        trace!(bucket = location, key, bytes = size, "Uploaded object");
        Ok(())
    }

    async fn delete(&self, location: &str, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(location)
            .key(key)
            .send()
            .await
            .map_err(classify_sdk_error)?;

        trace!(bucket = location, key, "Deleted object");
        Ok(())
    }
}
