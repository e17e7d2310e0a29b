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

//! `RowStore`: packs every attribute of one tuple
//! contiguously, followed by a trailing NULL bitmap, into a single
//! growable buffer.

use std::fmt;

use dbcore_common::bitpack::bytes_for_bits;
use dbcore_common::{Attribute, CoreError, Linearization, Result, Store, Table};

use crate::layout::{compute_row_layout, RowLayout};

const INITIAL_CAPACITY: usize = 10;

/// A table materialized as packed rows in one contiguous region.
pub struct RowStore {
    attributes: Vec<Attribute>,
    layout: RowLayout,
    buffer: Vec<u8>,
    rows: usize,
    capacity: usize,
}

impl RowStore {
    /// Builds an empty `RowStore` over `table`'s schema.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyTable`] if `table` has no attributes,
    /// and [`CoreError::OutOfMemory`] if the initial buffer cannot be
    /// allocated.
    pub fn new(table: &dyn Table) -> Result<Self> {
        if table.size() == 0 {
            return Err(CoreError::EmptyTable);
        }
        let attributes = table.attributes().to_vec();
        let layout = compute_row_layout(table);
        let buffer = alloc_zeroed(layout.row_size_bytes as usize * INITIAL_CAPACITY, "RowStore buffer")?;
        Ok(Self {
            attributes,
            layout,
            buffer,
            rows: 0,
            capacity: INITIAL_CAPACITY,
        })
    }

    /// Row size in bytes, including NULL-bitmap and padding.
    pub fn row_size_bytes(&self) -> u32 {
        self.layout.row_size_bytes
    }

    /// Pointer to the start of the row buffer. Combine with a
    /// [`Linearization`]'s relative offsets to compute an absolute
    /// address; re-read after any `append` that grows the buffer.
    pub fn base_ptr(&self) -> *const u8 {
        self.buffer.as_ptr()
    }

    /// Bit address of attribute `attribute_ordinal` within `row`,
    /// relative to `base_ptr()`. Used to validate layout stability.
    pub fn bit_address(&self, row: usize, attribute_ordinal: usize) -> u64 {
        row as u64 * self.layout.row_size_bytes as u64 * 8
            + self.layout.attribute_offsets[attribute_ordinal] as u64
    }

    /// Bit address of the NULL bitmap for `row`, relative to
    /// `base_ptr()`.
    pub fn null_bitmap_bit_address(&self, row: usize) -> u64 {
        row as u64 * self.layout.row_size_bytes as u64 * 8 + self.layout.null_bitmap_offset as u64
    }

    /// Raw backing bytes, for tests and the `dump` implementation.
    pub fn raw_buffer(&self) -> &[u8] {
        &self.buffer
    }
}

impl Store for RowStore {
    fn num_rows(&self) -> usize {
        self.rows
    }

    fn append(&mut self) -> Result<()> {
        if self.rows == self.capacity {
            let new_capacity = self.capacity * 2;
            let new_len = self.layout.row_size_bytes as usize * new_capacity;
            let additional = new_len - self.buffer.len();
            self.buffer
                .try_reserve_exact(additional)
                .map_err(|_| CoreError::OutOfMemory {
                    what: "RowStore buffer",
                    requested_bytes: new_len,
                })?;
            self.buffer.resize(new_len, 0);
            self.capacity = new_capacity;
            tracing::debug!(new_capacity, "grew RowStore buffer");
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
        let mut row = Linearization::new_finite(self.attributes.len() as u64 + 1);
        for (attr, &offset) in self.attributes.iter().zip(&self.layout.attribute_offsets) {
            row.add_attribute_sequence(offset as u64, 0, attr.clone());
        }
        row.add_null_bitmap(self.layout.null_bitmap_offset as u64, 0);

        let mut root = Linearization::new_infinite();
        // Offset 0: relative to `base_ptr()`, not an absolute address.
        // Stride is in bytes: rows repeat at byte-addressed granularity.
        root.add_child_sequence(0, self.layout.row_size_bytes as u64, row);
        root
    }
}

impl fmt::Debug for RowStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RowStore metadata:")?;
        for attr in &self.attributes {
            writeln!(f, "  {}: {} bits", attr.name, attr.ty.size())?;
        }
        writeln!(f, "rows in use: {}", self.rows)
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
    use dbcore_common::bitpack::{get_bit, set_bit};
    use dbcore_common::PrimitiveType;
    use dbcore_common::SimpleTable;

    fn int4_table() -> SimpleTable {
        SimpleTable::new().with("a", PrimitiveType::integer(4))
    }

    #[test]
    fn rejects_empty_table() {
        let table = SimpleTable::new();
        assert!(matches!(RowStore::new(&table), Err(CoreError::EmptyTable)));
    }

    #[test]
    fn linearization_matches_scenario_one() {
        let table = int4_table();
        let store = RowStore::new(&table).unwrap();
        let lin = store.linearization();
        assert!(lin.is_infinite());
        assert_eq!(lin.num_sequences(), 1);

        let row_seq = &lin.sequences()[0];
        assert!(row_seq.is_linearization());
        assert_eq!(row_seq.stride, 8); // row size in bytes.

        let row = row_seq.as_linearization();
        assert_eq!(row.num_tuples(), 1);
        assert_eq!(row.num_sequences(), 2);

        let a = &row.sequences()[0];
        assert!(a.is_attribute());
        assert_eq!(a.offset, 0);
        assert_eq!(a.as_attribute().name, "a");

        let null_bitmap = &row.sequences()[1];
        assert!(null_bitmap.is_null_bitmap());
        assert_eq!(null_bitmap.offset, 32);
    }

    #[test]
    fn append_and_drop_track_row_count() {
        let table = int4_table();
        let mut store = RowStore::new(&table).unwrap();
        assert_eq!(store.num_rows(), 0);
        for _ in 0..15 {
            store.append().unwrap();
        }
        assert_eq!(store.num_rows(), 15);
        store.drop_row();
        assert_eq!(store.num_rows(), 14);
    }

    #[test]
    fn drop_on_empty_store_is_a_no_op() {
        let table = int4_table();
        let mut store = RowStore::new(&table).unwrap();
        store.drop_row();
        assert_eq!(store.num_rows(), 0);
    }

    #[test]
    fn grow_reproduces_layout_stability() {
        // Append past the initial capacity, then verify every row's
        // computed bit address still lands on a readable byte and
        // round-trips through the NULL bitmap.
        let table = int4_table();
        let mut store = RowStore::new(&table).unwrap();
        for _ in 0..(INITIAL_CAPACITY * 2 + 3) {
            store.append().unwrap();
        }
        assert_eq!(store.num_rows(), INITIAL_CAPACITY * 2 + 3);

        // Re-read the descriptor and base pointer post-grow, per the
        // redesigned contract: no stale addresses survive, only a
        // fresh read is required.
        let lin = store.linearization();
        let row_size = lin.sequences()[0].stride;
        assert_eq!(row_size, store.row_size_bytes() as u64);

        let row_bytes = bytes_for_bits(row_size as usize * 8);
        let mut buf = vec![0u8; row_bytes * store.num_rows()];
        for row in 0..store.num_rows() {
            let null_bit = store.null_bitmap_bit_address(row) as usize;
            set_bit(&mut buf, null_bit, row % 2 == 0);
        }
        for row in 0..store.num_rows() {
            let null_bit = store.null_bitmap_bit_address(row) as usize;
            assert_eq!(get_bit(&buf, null_bit), row % 2 == 0);
        }
    }
}
