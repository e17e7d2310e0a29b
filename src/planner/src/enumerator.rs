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

//! `JoinEnumerator`: the DPsub bottom-up join-order enumerator,
//! grounded on the nested-subset-enumeration structure of the
//! reference plan enumerator.

use crate::graph::{AdjacencyMatrix, QueryGraph};
use crate::plan_table::{CostFunction, PlanTable};
use crate::subproblem::Subproblem;

/// Fills a [`PlanTable`] bottom-up by subset cardinality, so that by
/// the time a subset of size `k` is considered, every one of its
/// connected strict subsets already has a plan.
#[derive(Debug, Default, Clone, Copy)]
pub struct JoinEnumerator;

impl JoinEnumerator {
    pub fn new() -> Self {
        Self
    }

    /// Populates `table[S]` for every connected subset `|S| >= 2` over
    /// `graph`'s base relations, using `adjacency` for connectivity and
    /// `cost` to rank candidate derivations. `table` must already have
    /// every singleton subset seeded.
    pub fn enumerate(
        &self,
        graph: &QueryGraph,
        adjacency: &AdjacencyMatrix,
        cost: &dyn CostFunction,
        table: &mut PlanTable,
    ) {
        let n = graph.num_sources();
        for size in 2..=n {
            for s in connected_subsets_of_size(n, adjacency, size) {
                for o in connected_subsets_within(s, adjacency) {
                    let d = s & !o;
                    if table.has_plan(o) && table.has_plan(d) && adjacency.is_connected(o | d) {
                        table.update(cost, o, d, 0);
                        tracing::debug!(?o, ?d, "considered join derivation");
                    }
                }
            }
        }
    }
}

/// Every connected subset of `{0..n}` with exactly `size` relations.
fn connected_subsets_of_size(n: usize, adjacency: &AdjacencyMatrix, size: usize) -> Vec<Subproblem> {
    let mut out = Vec::new();
    for bits in 1u64..(1u64 << n) {
        let s = Subproblem::from_bits(bits);
        if s.size() as usize == size && adjacency.is_connected(s) {
            out.push(s);
        }
    }
    out
}

/// Every non-empty connected subset of `s`, including `s` itself.
/// `PlanTable::has_plan` on the resulting complement filters out the
/// `O == S` case without special-casing it here.
fn connected_subsets_within(s: Subproblem, adjacency: &AdjacencyMatrix) -> Vec<Subproblem> {
    let active: Vec<usize> = s.iter().collect();
    let mut out = Vec::new();
    for mask in 1u64..(1u64 << active.len()) {
        let mut sub = Subproblem::EMPTY;
        for (bit_pos, &relation) in active.iter().enumerate() {
            if mask & (1 << bit_pos) != 0 {
                sub.set(relation);
            }
        }
        if adjacency.is_connected(sub) {
            out.push(sub);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan_table::SizeSumCostFunction;

    fn chain_of_three() -> (QueryGraph, AdjacencyMatrix) {
        let graph = QueryGraph::new(3);
        let mut adjacency = AdjacencyMatrix::new(3);
        adjacency.add_edge(0, 1);
        adjacency.add_edge(1, 2);
        (graph, adjacency)
    }

    #[test]
    fn three_chain_join_matches_hand_computed_plan() {
        let (graph, adjacency) = chain_of_three();
        let mut table = PlanTable::new(graph.num_sources());
        table.seed_singleton(0, 5);
        table.seed_singleton(1, 10);
        table.seed_singleton(2, 8);

        JoinEnumerator::new().enumerate(&graph, &adjacency, &SizeSumCostFunction, &mut table);

        let s01 = Subproblem::singleton(0) | Subproblem::singleton(1);
        let s12 = Subproblem::singleton(1) | Subproblem::singleton(2);
        let s012 = s01 | Subproblem::singleton(2);

        assert_eq!(table.get(s01).size, 50);
        assert_eq!(table.get(s01).cost, 15);

        assert_eq!(table.get(s12).size, 80);
        assert_eq!(table.get(s12).cost, 18);

        assert_eq!(table.get(s012).size, 400);
        assert_eq!(table.get(s012).cost, 73);
        assert_eq!(table.get(s012).left, Some(s01));
        assert_eq!(table.get(s012).right, Some(Subproblem::singleton(2)));
    }

    #[test]
    fn disconnected_subset_never_becomes_a_building_block() {
        let (graph, adjacency) = chain_of_three();
        let mut table = PlanTable::new(graph.num_sources());
        // Every singleton size has the high bit set, so a naive cost
        // sum would overflow if it weren't saturating.
        let overflow_size = 1u64 << 63;
        table.seed_singleton(0, overflow_size);
        table.seed_singleton(1, overflow_size);
        table.seed_singleton(2, overflow_size);

        JoinEnumerator::new().enumerate(&graph, &adjacency, &SizeSumCostFunction, &mut table);

        let s02 = Subproblem::singleton(0) | Subproblem::singleton(2);
        assert!(!table.has_plan(s02));

        let s012 = s02 | Subproblem::singleton(1);
        let plan = table.get(s012);
        assert!(plan.has_plan);
        assert_ne!(plan.left, Some(s02));
        assert_ne!(plan.right, Some(s02));
    }
}
