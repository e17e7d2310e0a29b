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

//! Host-kernel contract shared by `dbcore_storage`'s `RowStore` and
//! `ColumnStore`: attribute/table descriptors, the linearization
//! descriptor, the `Store` capability, error types, and the bit-packing
//! helper both stores share.
//!
//! This crate has no dependency on `dbcore_static_index` or
//! `dbcore_planner` — those are independent leaves that consume their
//! own host types (key/value, subset bitset, adjacency, cost function)
//! rather than this crate's `Table`/`Store` contract.

pub mod bitpack;
pub mod error;
pub mod linearization;
pub mod store;
pub mod types;

pub use error::{CoreError, Result};
pub use linearization::{Cardinality, Linearization, Sequence, SequenceKind};
pub use store::Store;
pub use types::{Attribute, PrimitiveType, SimpleTable, Table, TypeCategory};
