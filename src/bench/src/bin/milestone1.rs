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

//! Drives `RowStore` and `ColumnStore` append throughput over a wide,
//! mixed-alignment schema, grounded on `original_source/benchmark/milestone1.cpp`'s
//! memory-layout and append-throughput evaluation.

use std::time::Instant;

use clap::Parser;
use dbcore_common::{PrimitiveType, SimpleTable, Store};
use dbcore_storage::{ColumnStore, RowStore};

#[derive(Parser)]
struct Args {
    /// Number of rows to append to each store.
    #[arg(long, default_value_t = 2_000_000)]
    num_tuples: usize,
}

/// The wide schema `milestone1.cpp` uses to exercise padding and
/// alignment: a mix of integer widths, booleans, doubles, floats, and
/// fixed-length character sequences.
fn wide_table() -> SimpleTable {
    SimpleTable::new()
        .with("a_i4", PrimitiveType::integer(4))
        .with("b_b", PrimitiveType::boolean())
        .with("c_c3", PrimitiveType::character_sequence(3))
        .with("d_b", PrimitiveType::boolean())
        .with("e_d", PrimitiveType::double())
        .with("f_i1", PrimitiveType::integer(1))
        .with("g_f", PrimitiveType::float())
        .with("h_c5", PrimitiveType::character_sequence(5))
        .with("i_b", PrimitiveType::boolean())
        .with("j_i2", PrimitiveType::integer(2))
        .with("k_b", PrimitiveType::boolean())
        .with("l_i2", PrimitiveType::integer(2))
}

fn report_layout(store_name: &str, lin: &dbcore_common::Linearization) {
    let mut bits_per_row = 0u64;
    for seq in lin.sequences() {
        bits_per_row += if seq.is_linearization() {
            let child = seq.as_linearization();
            seq.stride * 8 / child.num_tuples().max(1)
        } else {
            seq.stride
        };
    }
    println!("milestone1,{store_name},layout,{bits_per_row}");
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let table = wide_table();

    let mut row_store = RowStore::new(&table).expect("row store construction");
    report_layout("row", &row_store.linearization());
    let t0 = Instant::now();
    for _ in 0..args.num_tuples {
        row_store.append().expect("row store append");
    }
    println!(
        "milestone1,row,append,{}",
        t0.elapsed().as_millis()
    );

    let mut column_store = ColumnStore::new(&table).expect("column store construction");
    report_layout("column", &column_store.linearization());
    let t0 = Instant::now();
    for _ in 0..args.num_tuples {
        column_store.append().expect("column store append");
    }
    println!(
        "milestone1,column,append,{}",
        t0.elapsed().as_millis()
    );

    assert_eq!(row_store.num_rows(), args.num_tuples);
    assert_eq!(column_store.num_rows(), args.num_tuples);
}
