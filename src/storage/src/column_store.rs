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

//! `ColumnStore`: one contiguous buffer per attribute plus
//! one for the NULL bitmap, all growing in lockstep.

use std::fmt;

use dbcore_common::bitpack::bytes_for_bits;
use dbcore_common::{Attribute, CoreError, Linearization, Result, Store, Table};

const INITIAL_CAPACITY: usize = 8;

/// A table materialized column-major: one buffer per attribute, plus a
/// dedicated buffer for the NULL bitmap.
pub struct ColumnStore {
    attributes: Vec<Attribute>,
    /// Width in bits of each buffer, attributes first, NULL bitmap last.
    widths_bits: Vec<u32>,
    /// One buffer per attribute, plus the trailing NULL-bitmap buffer.
    columns: Vec<Vec<u8>>,
    rows: usize,
    capacity: usize,
}

impl ColumnStore {
    /// Builds an empty `ColumnStore` over `table`'s schema.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyTable`] if `table` has no attributes,
    /// and [`CoreError::OutOfMemory`] if initial buffers cannot be
    /// allocated.
    pub fn new(table: &dyn Table) -> Result<Self> {
        if table.size() == 0 {
            return Err(CoreError::EmptyTable);
        }
        let attributes = table.attributes().to_vec();
        let mut widths_bits = Vec::with_capacity(attributes.len() + 1);
        let mut columns = Vec::with_capacity(attributes.len() + 1);

        for attr in &attributes {
            let width = attr.ty.size();
            widths_bits.push(width);
            columns.push(alloc_zeroed(
                bytes_for_bits(INITIAL_CAPACITY * width as usize),
                "ColumnStore attribute buffer",
            )?);
        }
        // NULL bitmap: one bit per attribute per row.
        let bitmap_width = attributes.len() as u32;
        widths_bits.push(bitmap_width);
        columns.push(alloc_zeroed(
            bytes_for_bits(INITIAL_CAPACITY * bitmap_width as usize),
            "ColumnStore NULL bitmap buffer",
        )?);

        Ok(Self {
            attributes,
            widths_bits,
            columns,
            rows: 0,
            capacity: INITIAL_CAPACITY,
        })
    }

    /// Pointer to the start of attribute `ordinal`'s column buffer.
    pub fn column_ptr(&self, ordinal: usize) -> *const u8 {
        self.columns[ordinal].as_ptr()
    }

    /// Pointer to the start of the NULL-bitmap buffer.
    pub fn null_bitmap_ptr(&self) -> *const u8 {
        self.columns[self.attributes.len()].as_ptr()
    }

    pub fn raw_column(&self, ordinal: usize) -> &[u8] {
        &self.columns[ordinal]
    }
}

impl Store for ColumnStore {
    fn num_rows(&self) -> usize {
        self.rows
    }

    fn append(&mut self) -> Result<()> {
        if self.rows == self.capacity {
            let new_capacity = self.capacity * 2;
            let new_lens: Vec<usize> = self
                .widths_bits
                .iter()
                .map(|&w| bytes_for_bits(new_capacity * w as usize))
                .collect();

            // Reserve every column's additional capacity before
            // mutating any of them, so a failure midway leaves every
            // buffer at its previous length (atomic grow).
            for (col, &new_len) in self.columns.iter_mut().zip(&new_lens) {
                let additional = new_len.saturating_sub(col.len());
                col.try_reserve_exact(additional)
                    .map_err(|_| CoreError::OutOfMemory {
                        what: "ColumnStore buffer",
                        requested_bytes: new_len,
                    })?;
            }
            for (col, &new_len) in self.columns.iter_mut().zip(&new_lens) {
                col.resize(new_len, 0);
            }
            self.capacity = new_capacity;
            tracing::debug!(new_capacity, "grew ColumnStore buffers");
        }
        self.rows += 1;
        Ok(())
    }

    fn drop_row(&mut self) {
        if self.rows > 0 {
            self.rows -= 1;
        }
    }

    fn linearization(&self) -> Linearization {
        let mut root = Linearization::new_infinite();
        for (attr, &width) in self.attributes.iter().zip(&self.widths_bits) {
            let mut child = Linearization::new_finite(1);
            child.add_attribute_sequence(0, 0, attr.clone());
            root.add_child_sequence(0, width as u64, child);
        }
        let mut null_bitmap = Linearization::new_finite(1);
        null_bitmap.add_null_bitmap(0, 0);
        let bitmap_width = self.attributes.len() as u32;
        root.add_child_sequence(0, bitmap_width as u64, null_bitmap);
        root
    }
}

impl fmt::Debug for ColumnStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (attr, width) in self.attributes.iter().zip(&self.widths_bits) {
            writeln!(f, "{}: {} bits", attr.name, width)?;
        }
        writeln!(
            f,
            "{} rows in use, {} rows allocated",
            self.rows, self.capacity
        )
    }
}

fn alloc_zeroed(len: usize, what: &'static str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| CoreError::OutOfMemory {
            what,
            requested_bytes: len,
        })?;
    buf.resize(len, 0);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbcore_common::PrimitiveType;
    use dbcore_common::SimpleTable;

    #[test]
    fn linearization_matches_scenario_three() {
        let table = SimpleTable::new().with("a", PrimitiveType::integer(4));
        let store = ColumnStore::new(&table).unwrap();
        let lin = store.linearization();
        assert!(lin.is_infinite());
        assert_eq!(lin.num_sequences(), 2);
        assert!(lin.sequences()[0].is_linearization());
        assert!(lin.sequences()[1].is_linearization());
        let attr_child = lin.sequences()[0].as_linearization();
        assert!(attr_child.sequences()[0].is_attribute());
        let bitmap_child = lin.sequences()[1].as_linearization();
        assert!(bitmap_child.sequences()[0].is_null_bitmap());
    }

    #[test]
    fn append_grows_all_columns_in_lockstep() {
        let table = SimpleTable::new()
            .with("a", PrimitiveType::integer(4))
            .with("b", PrimitiveType::boolean());
        let mut store = ColumnStore::new(&table).unwrap();
        for _ in 0..(INITIAL_CAPACITY * 3) {
            store.append().unwrap();
        }
        assert_eq!(store.num_rows(), INITIAL_CAPACITY * 3);
        assert_eq!(
            store.raw_column(0).len(),
            bytes_for_bits(store.capacity * 32)
        );
        assert_eq!(
            store.raw_column(1).len(),
            bytes_for_bits(store.capacity * 1)
        );
        assert_eq!(
            store.raw_column(2).len(),
            bytes_for_bits(store.capacity * 2) // null bitmap: 2 attrs.
        );
    }

    #[test]
    fn rejects_empty_table() {
        let table = SimpleTable::new();
        assert!(matches!(
            ColumnStore::new(&table),
            Err(CoreError::EmptyTable)
        ));
    }
}
