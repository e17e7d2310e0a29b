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

//! The linearization descriptor: a tree of sequences
//! describing where each `(tuple, attribute)` bit lives in memory.
//!
//! Every offset and stride here is relative to the *enclosing block*, never
//! an absolute address. A store publishes its current base pointer
//! separately; the reader adds the store's base to an offset found by
//! descending this tree. Growing a store's buffer therefore never
//! invalidates a previously-read `Linearization` — only the base
//! pointer needs to be re-read, which this workspace's stores expose
//! directly.
//!
//! Units are caller-defined per level, matching the original: the
//! sequence that repeats a store's rows is conventionally expressed in
//! bytes (the host addresses memory byte-wise), while the sequences
//! nested inside one tuple record are expressed in bits (attribute
//! widths and the null bitmap are sub-byte). Callers should be
//! internally consistent; see `dbcore_storage` for the two conventions
//! this workspace uses.

use crate::types::Attribute;

/// Whether a sequence repeats forever (row count unknown ahead of time)
/// or a known, finite number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Infinite,
    Finite(u64),
}

/// What a single [`Sequence`] in the tree refers to.
#[derive(Debug, Clone)]
pub enum SequenceKind {
    /// References a single attribute.
    Attribute(Attribute),
    /// One bit per attribute in schema order.
    NullBitmap,
    /// A nested block of records, laid out by its own sequence list.
    Child(Box<Linearization>),
}

/// One entry in a linearization: a starting offset within the
/// enclosing block, and a stride by which that offset advances per
/// repetition.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub offset: u64,
    pub stride: u64,
    pub kind: SequenceKind,
}

impl Sequence {
    pub fn is_attribute(&self) -> bool {
        matches!(self.kind, SequenceKind::Attribute(_))
    }

    pub fn is_null_bitmap(&self) -> bool {
        matches!(self.kind, SequenceKind::NullBitmap)
    }

    pub fn is_linearization(&self) -> bool {
        matches!(self.kind, SequenceKind::Child(_))
    }

    /// Panics if this sequence does not reference an attribute.
    pub fn as_attribute(&self) -> &Attribute {
        match &self.kind {
            SequenceKind::Attribute(a) => a,
            _ => panic!("sequence is not an attribute sequence"),
        }
    }

    /// Panics if this sequence does not reference a child linearization.
    pub fn as_linearization(&self) -> &Linearization {
        match &self.kind {
            SequenceKind::Child(lin) => lin,
            _ => panic!("sequence is not a child linearization"),
        }
    }
}

/// A node in the linearization tree: a cardinality and an ordered list
/// of sequences.
#[derive(Debug, Clone)]
pub struct Linearization {
    cardinality: Cardinality,
    sequences: Vec<Sequence>,
}

impl Linearization {
    pub fn new_infinite() -> Self {
        Self {
            cardinality: Cardinality::Infinite,
            sequences: Vec::new(),
        }
    }

    pub fn new_finite(num_tuples: u64) -> Self {
        Self {
            cardinality: Cardinality::Finite(num_tuples),
            sequences: Vec::new(),
        }
    }

    pub fn add_attribute_sequence(&mut self, offset: u64, stride: u64, attribute: Attribute) {
        self.sequences.push(Sequence {
            offset,
            stride,
            kind: SequenceKind::Attribute(attribute),
        });
    }

    pub fn add_null_bitmap(&mut self, offset: u64, stride: u64) {
        self.sequences.push(Sequence {
            offset,
            stride,
            kind: SequenceKind::NullBitmap,
        });
    }

    pub fn add_child_sequence(&mut self, offset: u64, stride: u64, child: Linearization) {
        self.sequences.push(Sequence {
            offset,
            stride,
            kind: SequenceKind::Child(Box::new(child)),
        });
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn num_sequences(&self) -> usize {
        self.sequences.len()
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self.cardinality, Cardinality::Infinite)
    }

    /// Number of tuples this node repeats for, or `0` for an infinite
    /// root.
    pub fn num_tuples(&self) -> u64 {
        match self.cardinality {
            Cardinality::Infinite => 0,
            Cardinality::Finite(n) => n,
        }
    }
}
