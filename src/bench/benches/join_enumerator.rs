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
use dbcore_planner::{AdjacencyMatrix, JoinEnumerator, PlanTable, QueryGraph, SizeSumCostFunction};

fn chain_adjacency(n: usize) -> AdjacencyMatrix {
    let mut m = AdjacencyMatrix::new(n);
    for i in 0..n.saturating_sub(1) {
        m.add_edge(i, i + 1);
    }
    m
}

fn bench_chain_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("join_enumerator_chain");
    for &n in &[8usize, 12, 16] {
        let adjacency = chain_adjacency(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let graph = QueryGraph::new(n);
            b.iter(|| {
                let mut table = PlanTable::new(n);
                for i in graph.sources() {
                    table.seed_singleton(i, (i + 1) as u64);
                }
                JoinEnumerator::new().enumerate(
                    &graph,
                    &adjacency,
                    &SizeSumCostFunction,
                    &mut table,
                );
                table
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain_enumeration);
criterion_main!(benches);
