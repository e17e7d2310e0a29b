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

//! A bulk-loaded, ISAM-chained B+-tree static index.
//!
//! This crate is an independent leaf: it has no dependency on
//! `dbcore_common` or any particular storage layout. It indexes
//! whatever `(K, V)` pairs it is handed — typically a key attribute's
//! value paired with a row or column offset into a `RowStore` or
//! `ColumnStore` — and supports point lookup and half-open range scan
//! over the built tree. There is no incremental insert or delete: the
//! tree is rebuilt from scratch whenever the indexed data changes.

mod capacity;
mod tree;

pub use capacity::{inner_capacity, leaf_capacity};
pub use tree::{Iter, LeafIter, Range, StaticIndex};
