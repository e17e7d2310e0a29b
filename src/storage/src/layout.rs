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

//! The row layout algorithm, lifted out of `RowStore` so it can be
//! unit-tested independently of buffer allocation.

use dbcore_common::bitpack::{align_up, bytes_for_bits};
use dbcore_common::Table;

/// The computed placement of every attribute and the NULL bitmap
/// within one row, plus the row's final padded byte size.
#[derive(Debug, Clone)]
pub struct RowLayout {
    /// Bit offset of each attribute, in declaration order.
    pub attribute_offsets: Vec<u32>,
    /// Bit offset of the NULL bitmap, immediately after the last
    /// attribute.
    pub null_bitmap_offset: u32,
    /// Row size in bytes, padded up to the largest attribute alignment
    /// used (minimum one byte).
    pub row_size_bytes: u32,
}

/// Computes the packed row layout for `table`: align each attribute
/// upward to its own alignment requirement, place the NULL bitmap
/// immediately after the last attribute, then pad the row to the
/// largest alignment in use.
pub fn compute_row_layout(table: &dyn Table) -> RowLayout {
    let mut offset = 0u32;
    let mut max_align = 8u32; // minimum row size is 1 byte.
    let mut attribute_offsets = Vec::with_capacity(table.size());

    for attr in table.attributes() {
        let align = attr.ty.alignment();
        offset = align_up(offset, align);
        attribute_offsets.push(offset);
        max_align = max_align.max(align);
        offset += attr.ty.size();
    }

    let null_bitmap_offset = offset;
    offset += table.size() as u32; // one bit per attribute.

    let row_size_bits = align_up(offset, max_align);
    let row_size_bytes = bytes_for_bits(row_size_bits as usize) as u32;

    RowLayout {
        attribute_offsets,
        null_bitmap_offset,
        row_size_bytes,
    }
}
