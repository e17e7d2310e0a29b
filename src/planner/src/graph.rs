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

//! `QueryGraph` and `AdjacencyMatrix`: the host-supplied join
//! graph over base relations and its connectivity oracle.

use crate::subproblem::{Subproblem, MAX_RELATIONS};

/// A query's base relations, identified by index `0..num_sources`.
/// The join predicates between them live in the paired
/// [`AdjacencyMatrix`], not here.
#[derive(Debug, Clone)]
pub struct QueryGraph {
    num_sources: usize,
}

impl QueryGraph {
    pub fn new(num_sources: usize) -> Self {
        assert!(
            num_sources <= MAX_RELATIONS,
            "query graph has {num_sources} relations, more than this enumerator's {MAX_RELATIONS}-relation capacity"
        );
        Self { num_sources }
    }

    pub fn num_sources(&self) -> usize {
        self.num_sources
    }

    /// Base-relation indices, `0..num_sources`.
    pub fn sources(&self) -> std::ops::Range<usize> {
        0..self.num_sources
    }
}

/// Join-graph connectivity: which pairs of base relations have a join
/// predicate between them, and whether a given subset induces a
/// connected subgraph.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    neighbors: Vec<Subproblem>,
}

impl AdjacencyMatrix {
    pub fn new(num_sources: usize) -> Self {
        Self {
            neighbors: vec![Subproblem::EMPTY; num_sources],
        }
    }

    pub fn add_edge(&mut self, a: usize, b: usize) {
        self.neighbors[a].set(b);
        self.neighbors[b].set(a);
    }

    /// Whether `s`'s relations form a connected subgraph under this
    /// matrix's edges. The empty set and singletons are trivially
    /// connected.
    pub fn is_connected(&self, s: Subproblem) -> bool {
        if s.size() <= 1 {
            return true;
        }
        let start = match s.iter().next() {
            Some(v) => v,
            None => return true,
        };

        let mut visited = Subproblem::singleton(start);
        let mut frontier = visited;
        loop {
            let mut next = Subproblem::EMPTY;
            for v in frontier.iter() {
                next |= self.neighbors[v] & s;
            }
            let newly = next & !visited;
            if newly.is_empty() {
                break;
            }
            visited |= newly;
            frontier = newly;
        }
        visited == s
    }
}
