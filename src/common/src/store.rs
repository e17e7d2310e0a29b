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

//! The `Store` capability. The reference host kernel dispatches to
//! `RowStore`/`ColumnStore` through virtual inheritance and an
//! `accept(visitor)` double-dispatch hook; this port replaces both
//! with a plain trait object and dispatch through this single
//! interface.

use crate::error::Result;
use crate::linearization::Linearization;

/// A materialized table: append-only growth, single-row drop from the
/// tail, and a published [`Linearization`] describing the current
/// layout.
pub trait Store {
    /// Number of live rows.
    fn num_rows(&self) -> usize;

    /// Appends one row, growing backing storage if necessary.
    ///
    /// Growth is fallible: an allocation failure surfaces as
    /// [`crate::error::CoreError::OutOfMemory`] rather than terminating
    /// the process.
    fn append(&mut self) -> Result<()>;

    /// Removes the last row, if any. A no-op when there are no rows.
    fn drop_row(&mut self);

    /// Returns the store's current layout descriptor. Must be re-read
    /// after any `append` that grew backing storage; see the module
    /// docs on [`crate::linearization`] for why a re-read, not an
    /// invalidation, is the only requirement.
    fn linearization(&self) -> Linearization;
}
