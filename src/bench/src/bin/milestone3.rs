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

//! Drives `JoinEnumerator` over chain and cycle query graphs of
//! increasing relation count, grounded on
//! `original_source/benchmark/milestone3.cpp`'s `gen_chain_query` /
//! `gen_cycle_query` generators and its fixed per-relation row counts.

use std::time::Instant;

use clap::Parser;
use dbcore_planner::{AdjacencyMatrix, JoinEnumerator, PlanTable, QueryGraph, SizeSumCostFunction};

#[derive(Parser)]
struct Args {
    /// Largest relation count to enumerate (chain and cycle each run
    /// from 2 up to this value).
    #[arg(long, default_value_t = 20)]
    max_relations: usize,
}

/// The fixed row-count table `milestone3.cpp` seeds its 20 relations
/// with, reused here as a modulus so `max_relations` can exceed 20.
const NUM_ROWS: [u64; 20] = [
    5, 10, 8, 12, 3, 4, 7, 20, 1, 19, 8, 10, 10, 13, 12, 7, 20, 18, 5, 17,
];

fn chain_adjacency(n: usize) -> AdjacencyMatrix {
    let mut m = AdjacencyMatrix::new(n);
    for i in 0..n.saturating_sub(1) {
        m.add_edge(i, i + 1);
    }
    m
}

fn cycle_adjacency(n: usize) -> AdjacencyMatrix {
    let mut m = chain_adjacency(n);
    if n >= 3 {
        m.add_edge(n - 1, 0);
    }
    m
}

fn run(label: &str, n: usize, adjacency: &AdjacencyMatrix) {
    let graph = QueryGraph::new(n);
    let mut table = PlanTable::new(n);
    for i in graph.sources() {
        table.seed_singleton(i, NUM_ROWS[i % NUM_ROWS.len()]);
    }

    let t0 = Instant::now();
    JoinEnumerator::new().enumerate(&graph, adjacency, &SizeSumCostFunction, &mut table);
    println!("milestone3,{label},{n},{}", t0.elapsed().as_micros());
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    for n in 2..=args.max_relations {
        run("chain", n, &chain_adjacency(n));
    }
    for n in 3..=args.max_relations {
        run("cycle", n, &cycle_adjacency(n));
    }
}
