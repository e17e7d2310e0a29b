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

//! Drives bulk-load and point-lookup latency for `StaticIndex`, grounded
//! on `original_source/benchmark/milestone2.cpp`'s data generator: runs
//! of a repeated key, each run ten to a hundred tuples long, so lookups
//! see realistic duplicate-key clustering.

use std::time::Instant;

use clap::Parser;
use dbcore_static_index::StaticIndex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Parser)]
struct Args {
    /// Number of (key, value) entries to bulk-load.
    #[arg(long, default_value_t = 5_000_000)]
    num_tuples: usize,

    /// Number of point lookups to time after the build.
    #[arg(long, default_value_t = 100_000)]
    num_lookups: usize,
}

/// Ascending runs of a repeated key, matching `gen_data` in
/// `milestone2.cpp`: each run is 10-100 repetitions of the same key,
/// with the key advancing by 1-10 between runs.
fn gen_data(rng: &mut SmallRng, num_tuples: usize) -> Vec<i32> {
    let mut keys = Vec::with_capacity(num_tuples);
    let mut current = 0i32;
    while keys.len() < num_tuples {
        current += rng.gen_range(1..=10);
        let run = rng.gen_range(10..=100);
        for _ in 0..run {
            keys.push(current);
            if keys.len() == num_tuples {
                break;
            }
        }
    }
    keys
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let mut rng = SmallRng::seed_from_u64(0);

    let keys = gen_data(&mut rng, args.num_tuples);
    let entries: Vec<(i32, i32)> = keys.iter().map(|&k| (k, 2 * k)).collect();

    let t0 = Instant::now();
    let tree = StaticIndex::bulk_load(entries);
    println!("milestone2,bulkload,{}", t0.elapsed().as_millis());
    println!("milestone2,height,{}", tree.height());
    println!("milestone2,leaf_capacity,{}", tree.leaf_capacity());

    let probe_keys: Vec<i32> = (0..args.num_lookups)
        .map(|_| {
            let idx = rng.gen_range(0..keys.len());
            keys[idx]
        })
        .collect();

    let t0 = Instant::now();
    let mut hits = 0u64;
    for k in &probe_keys {
        if tree.find(k).is_some() {
            hits += 1;
        }
    }
    println!("milestone2,lookup,{}", t0.elapsed().as_millis());
    println!("milestone2,hits,{hits}");
}
