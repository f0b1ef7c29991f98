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

//! Batch Processing Benchmarks
//!
//! These benchmarks run whole notification batches through the in-memory
//! store, including staging on the local filesystem:
//! - Different batch sizes
//! - Different object sizes
//! - Batches where every key is malformed
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --package rekey-benches --bench batch_processing
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rekey_benches::{sample_keys, seeded_store};
use rekey_core::batch::{process_batch, Notification};
use rekey_core::config::RenameConfig;

/// Benchmark: Moving batches of small objects
fn bench_batch_sizes(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let config = &RenameConfig::default();

    let mut group = c.benchmark_group("batch_sizes");
    group.sample_size(10);

    for size in [1, 10, 100].iter() {
        let keys = sample_keys(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &keys, |b, keys| {
            b.to_async(&runtime).iter(|| async move {
                let store = seeded_store(config, keys, b"id,value\n1,2\n").await;
                let report =
                    process_batch(&store, config, keys.iter().cloned().map(Notification::new))
                        .await;
                black_box(report.legacy_status());
            });
        });
    }

    group.finish();
}

/// Benchmark: Moving objects of different sizes
fn bench_object_sizes(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let config = &RenameConfig::default();
    let keys = &sample_keys(10);

    let mut group = c.benchmark_group("object_sizes");
    group.sample_size(10);

    for (name, bytes) in [("1KiB", 1024), ("64KiB", 64 * 1024), ("1MiB", 1024 * 1024)].iter() {
        let payload = vec![b'x'; *bytes];
        group.throughput(Throughput::Bytes((*bytes * keys.len()) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &payload, |b, payload| {
            b.to_async(&runtime).iter(|| async move {
                let store = seeded_store(config, keys, payload).await;
                let report =
                    process_batch(&store, config, keys.iter().cloned().map(Notification::new))
                        .await;
                black_box(report.succeeded());
            });
        });
    }

    group.finish();
}

/// Benchmark: Batches where no key matches the source template
fn bench_malformed_batch(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let config = &RenameConfig::default();
    let keys = &(0..100).map(|i| format!("short_{i}.csv")).collect::<Vec<_>>();

    c.bench_function("malformed_batch_100", |b| {
        b.to_async(&runtime).iter(|| async move {
            let store = seeded_store(config, keys, b"x").await;
            let report =
                process_batch(&store, config, keys.iter().cloned().map(Notification::new)).await;
            black_box(report.failed());
        });
    });
}

criterion_group!(
    benches,
    bench_batch_sizes,
    bench_object_sizes,
    bench_malformed_batch,
);

criterion_main!(benches);
