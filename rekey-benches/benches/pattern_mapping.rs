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

//! Pattern Mapping Benchmarks
//!
//! These benchmarks measure the pure filename remapping path:
//! - Template compilation
//! - Field map construction
//! - Per-key transforms at different field counts
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --package rekey-benches --bench pattern_mapping
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rekey_benches::{filename, sample_keys, template};
use rekey_core::pattern::{build_field_map, compile_pattern, transform, PatternMapper};

/// Benchmark: Compiling source and destination templates
fn bench_compile_pattern(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_pattern");

    for fields in [2, 5, 20, 100].iter() {
        let tpl = template(*fields, true, "_");
        group.bench_with_input(BenchmarkId::from_parameter(fields), &tpl, |b, tpl| {
            b.iter(|| compile_pattern(black_box(tpl), "_").unwrap());
        });
    }

    group.finish();
}

/// Benchmark: Building the field map
fn bench_build_field_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_field_map");

    for fields in [5, 20, 100].iter() {
        let source = compile_pattern(&template(*fields, false, "_"), "_").unwrap();
        let dest = compile_pattern(&template(*fields, true, "_"), "_").unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(fields),
            &(source, dest),
            |b, (source, dest)| {
                b.iter(|| build_field_map(black_box(source), black_box(dest)).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark: Transforming one filename with varying field counts
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    for fields in [5, 20, 100].iter() {
        let source = compile_pattern(&template(*fields, false, "_"), "_").unwrap();
        let dest = compile_pattern(&template(*fields, true, "_"), "_").unwrap();
        let map = build_field_map(&source, &dest).unwrap();
        let name = filename(*fields, "_");

        group.bench_with_input(BenchmarkId::from_parameter(fields), &name, |b, name| {
            b.iter(|| transform(black_box(name), &source, &dest, &map, "_").unwrap());
        });
    }

    group.finish();
}

/// Benchmark: Mapping many prefixed keys with the default templates
fn bench_transform_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_keys");
    let mapper = PatternMapper::new("0_1_2_3_4.csv", "0_1_4_2_3.csv", "_").unwrap();

    for count in [100, 1000, 10000].iter() {
        let keys: Vec<String> = sample_keys(*count)
            .into_iter()
            .map(|k| format!("landing/2019/{k}"))
            .collect();

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &keys, |b, keys| {
            b.iter(|| {
                let renamed: Vec<String> = keys
                    .iter()
                    .map(|k| mapper.transform_key(k).unwrap())
                    .collect();
                black_box(renamed);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compile_pattern,
    bench_build_field_map,
    bench_transform,
    bench_transform_keys,
);

criterion_main!(benches);
