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

//! Error taxonomy for the storage, index, and planner core.
//!
//! Only a handful of conditions are representable as [`CoreError`]:
//! allocation failure during growth, the "empty table" precondition
//! violation at store construction, and an unrecognized store pool
//! name at the host-facing factory. Programmer preconditions such as
//! out-of-bounds iterator arithmetic, and "not found" results, are
//! either a `debug_assert!` or an `Option`/empty range, never an error
//! variant.

use thiserror::Error;

/// Fatal conditions raised by the storage/index core.
///
/// A systems-language rewrite of the original (which called `exit(1)`
/// on a failed `realloc`) bubbles allocation failure here instead.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A buffer could not be grown to the requested capacity.
    #[error("failed to grow {what} to {requested_bytes} bytes")]
    OutOfMemory {
        what: &'static str,
        requested_bytes: usize,
    },

    /// A store was constructed over a table with zero attributes.
    #[error("cannot create a store over a table with no attributes")]
    EmptyTable,

    /// `dbcore_storage::create_store` was asked for a pool name it does
    /// not recognize.
    #[error("unknown store pool name: {name}")]
    UnknownStoreKind { name: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
