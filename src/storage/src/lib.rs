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

//! Two physical storage layouts that materialize a logical table to
//! memory: [`RowStore`] and [`ColumnStore`]. Both
//! implement `dbcore_common::Store` and publish a
//! `dbcore_common::Linearization` describing their current layout.

pub mod column_store;
pub mod factory;
pub mod layout;
pub mod row_store;

pub use column_store::ColumnStore;
pub use factory::{create_store, COLUMN_STORE_POOL, ROW_STORE_POOL};
pub use row_store::RowStore;
