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

//! S3 event handling.

use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{Error, LambdaEvent};
use rekey_core::batch::{process_batch, Notification};
use rekey_core::config::RenameConfig;
use rekey_core::store::ObjectStore;
use tracing::{info, warn};

/// Decodes an object key as delivered in an S3 event.
///
/// Keys are form-encoded: spaces arrive as `+` and other reserved characters
/// are percent-encoded. Keys that do not decode to UTF-8 are returned as-is.
pub(crate) fn decode_key(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(key) => key.into_owned(),
        Err(e) => {
            warn!(key = raw, error = %e, "Object key is not valid UTF-8 once decoded, using raw key");
            raw.to_string()
        }
    }
}

/// One notification per record, in delivery order.
pub(crate) fn notifications_from_event(event: &S3Event) -> Vec<Notification> {
    event
        .records
        .iter()
        .map(|record| Notification {
            key: record.s3.object.key.as_deref().map(decode_key),
        })
        .collect()
}

pub(crate) async fn function_handler<S>(
    event: LambdaEvent<S3Event>,
    store: &S,
    config: &RenameConfig,
) -> Result<bool, Error>
where
    S: ObjectStore + ?Sized,
{
    info!(request_id = %event.context.request_id, "Lambda function execution initiated");

    let notifications = notifications_from_event(&event.payload);
    if notifications.is_empty() {
        warn!("No records found in S3 event");
    }

    let report = process_batch(store, config, notifications).await;

    info!(
        records = report.len(),
        moved = report.succeeded(),
        status = report.legacy_status(),
        "Lambda function execution completed"
    );
    Ok(report.legacy_status())
}
