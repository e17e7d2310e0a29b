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

//! DPsub bottom-up join-order enumeration.
//!
//! Like `dbcore_static_index`, this crate is an independent leaf: it
//! consumes only host-supplied primitives (a subset bitset, an
//! adjacency matrix, a cost function, a plan table) and has no
//! dependency on the storage layer.

mod enumerator;
mod graph;
mod plan_table;
mod subproblem;

pub use enumerator::JoinEnumerator;
pub use graph::{AdjacencyMatrix, QueryGraph};
pub use plan_table::{sum_wo_overflow, CostFunction, PlanEntry, PlanTable, SizeSumCostFunction};
pub use subproblem::{Subproblem, MAX_RELATIONS};
