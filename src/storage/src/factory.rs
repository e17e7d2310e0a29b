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

//! Store construction keyed by pool name, the way a catalog looks up a
//! storage backend by name rather than hard-coding a concrete type.
//! Mirrors the shape of the teacher's own `StateStoreImpl` construction
//! (`src/storage/src/store_impl.rs`), which dispatches on a
//! string-prefixed URL to build one of several `StateStore`
//! implementations behind a single enum/trait-object return type; here
//! the dispatch key is the pool name a catalog entry names its store
//! with, and the two pools are `RowStore` and `ColumnStore`.

use dbcore_common::{CoreError, Result, Store, Table};

use crate::{ColumnStore, RowStore};

/// Pool name for [`RowStore`], matching the host catalog's own naming.
pub const ROW_STORE_POOL: &str = "MyRowStore";

/// Pool name for [`ColumnStore`], matching the host catalog's own
/// naming.
pub const COLUMN_STORE_POOL: &str = "MyColumnStore";

/// Builds the store registered under `pool_name` over `table`'s
/// schema, the way a catalog's `create_store(table)` call would after
/// resolving which pool backs a given table.
///
/// # Errors
/// [`CoreError::UnknownStoreKind`] if `pool_name` names neither pool;
/// [`CoreError::EmptyTable`] or [`CoreError::OutOfMemory`] as raised by
/// the underlying store constructor.
pub fn create_store(pool_name: &str, table: &dyn Table) -> Result<Box<dyn Store>> {
    match pool_name {
        ROW_STORE_POOL => Ok(Box::new(RowStore::new(table)?)),
        COLUMN_STORE_POOL => Ok(Box::new(ColumnStore::new(table)?)),
        other => Err(CoreError::UnknownStoreKind {
            name: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbcore_common::PrimitiveType;
    use dbcore_common::SimpleTable;

    fn int4_table() -> SimpleTable {
        SimpleTable::new().with("a", PrimitiveType::integer(4))
    }

    #[test]
    fn creates_row_store_by_pool_name() {
        let table = int4_table();
        let store = create_store(ROW_STORE_POOL, &table).unwrap();
        assert_eq!(store.num_rows(), 0);
    }

    #[test]
    fn creates_column_store_by_pool_name() {
        let table = int4_table();
        let store = create_store(COLUMN_STORE_POOL, &table).unwrap();
        assert_eq!(store.num_rows(), 0);
    }

    #[test]
    fn rejects_unknown_pool_name() {
        let table = int4_table();
        assert!(matches!(
            create_store("NotAPool", &table),
            Err(CoreError::UnknownStoreKind { .. })
        ));
    }
}
