// Copyright 2024 RisingWave Labs
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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dbcore_common::{PrimitiveType, SimpleTable, Store};
use dbcore_storage::{ColumnStore, RowStore};

fn schema() -> SimpleTable {
    SimpleTable::new()
        .with("id", PrimitiveType::integer(4))
        .with("active", PrimitiveType::boolean())
        .with("score", PrimitiveType::double())
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_append");
    for &rows in &[1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("row", rows), &rows, |b, &rows| {
            b.iter(|| {
                let table = schema();
                let mut store = RowStore::new(&table).unwrap();
                for _ in 0..rows {
                    store.append().unwrap();
                }
                store.num_rows()
            });
        });
        group.bench_with_input(BenchmarkId::new("column", rows), &rows, |b, &rows| {
            b.iter(|| {
                let table = schema();
                let mut store = ColumnStore::new(&table).unwrap();
                for _ in 0..rows {
                    store.append().unwrap();
                }
                store.num_rows()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_append);
criterion_main!(benches);
