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

//! Bulk-loaded, ISAM-chained B+-tree.
//!
//! Leaves and inner nodes live in two flat arenas ([`StaticIndex::leaves`]
//! / [`StaticIndex::inners`]) and reference each other by `u32` index
//! rather than by pointer, so the tree can be moved or dropped as an
//! ordinary Rust value. The tree is built once, by
//! [`StaticIndex::bulk_load`], from an already-sorted-or-not sequence
//! of entries; there is no incremental insert or delete.

use crate::capacity::{inner_capacity, leaf_capacity};

#[derive(Debug, Clone)]
struct LeafNode<K, V> {
    entries: Vec<(K, V)>,
    next: Option<u32>,
}

#[derive(Debug, Clone)]
struct InnerNode<K> {
    /// `keys[i]` is the smallest key reachable through `children[i + 1]`
    /// — equivalently, the exclusive upper bound for everything
    /// reachable through `children[i]`. Always `children.len() - 1`
    /// entries long.
    keys: Vec<K>,
    children: Vec<NodeRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeRef {
    Leaf(u32),
    Inner(u32),
}

/// A cursor into a [`StaticIndex`]'s entry order. `Cursor::End` is a
/// distinct sentinel state, never a stale one-past-capacity pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    At { leaf: u32, entry: u32 },
    End,
}

/// A bulk-loaded, read-only, ISAM-chained B+-tree mapping `K` to `V`.
///
/// Construction is the only way to populate a tree: there is no
/// `insert` or `remove`. See [`StaticIndex::bulk_load`].
pub struct StaticIndex<K, V> {
    leaves: Vec<LeafNode<K, V>>,
    inners: Vec<InnerNode<K>>,
    root: NodeRef,
    height: usize,
    len: usize,
    leaf_capacity: usize,
    inner_capacity: usize,
}

impl<K: Ord + Clone, V> StaticIndex<K, V> {
    /// Bulk-loads `entries` into a new tree.
    ///
    /// `entries` is sorted by key first; duplicate keys are kept, not merged or
    /// rejected — [`StaticIndex::find`] returns an arbitrary one of
    /// them, and range scans return all of them.
    pub fn bulk_load<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        let tree = Self::bulk_load_inner(entries);
        tracing::debug!(len = tree.len, height = tree.height, "bulk-loaded static index");
        tree
    }

    fn bulk_load_inner<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        let leaf_cap = leaf_capacity::<K, V>();
        let inner_cap = inner_capacity::<K>();

        let mut sorted: Vec<(K, V)> = entries.into_iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        let len = sorted.len();

        if sorted.is_empty() {
            return Self {
                leaves: vec![LeafNode {
                    entries: Vec::new(),
                    next: None,
                }],
                inners: Vec::new(),
                root: NodeRef::Leaf(0),
                height: 0,
                len: 0,
                leaf_capacity: leaf_cap,
                inner_capacity: inner_cap,
            };
        }

        let mut leaves: Vec<LeafNode<K, V>> = Vec::new();
        let mut current = Vec::with_capacity(leaf_cap);
        for entry in sorted {
            if current.len() == leaf_cap {
                leaves.push(LeafNode {
                    entries: std::mem::replace(&mut current, Vec::with_capacity(leaf_cap)),
                    next: None,
                });
            }
            current.push(entry);
        }
        leaves.push(LeafNode {
            entries: current,
            next: None,
        });

        let num_leaves = leaves.len();
        for i in 0..num_leaves {
            leaves[i].next = if i + 1 < num_leaves {
                Some((i + 1) as u32)
            } else {
                None
            };
        }

        if num_leaves == 1 {
            return Self {
                leaves,
                inners: Vec::new(),
                root: NodeRef::Leaf(0),
                height: 0,
                len,
                leaf_capacity: leaf_cap,
                inner_capacity: inner_cap,
            };
        }

        let mut inners: Vec<InnerNode<K>> = Vec::new();
        let mut level: Vec<NodeRef> = (0..num_leaves).map(|i| NodeRef::Leaf(i as u32)).collect();
        let mut height = 0usize;

        loop {
            height += 1;
            let mut next_level: Vec<NodeRef> = Vec::new();
            let mut idx = 0;
            while idx < level.len() {
                let mut node = InnerNode {
                    keys: Vec::with_capacity(inner_cap - 1),
                    children: Vec::with_capacity(inner_cap),
                };
                while node.children.len() < inner_cap && idx < level.len() {
                    let child = level[idx];
                    idx += 1;
                    if !node.children.is_empty() {
                        node.keys.push(leftmost_key(&leaves, &inners, child));
                    }
                    node.children.push(child);
                }
                inners.push(node);
                next_level.push(NodeRef::Inner((inners.len() - 1) as u32));
            }
            level = next_level;
            if level.len() == 1 {
                break;
            }
        }

        Self {
            leaves,
            inners,
            root: level[0],
            height,
            len,
            leaf_capacity: leaf_cap,
            inner_capacity: inner_cap,
        }
    }

    /// Number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of inner levels above the leaf level. A single-leaf tree
    /// has height 0.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Per-leaf capacity this tree was built with.
    pub fn leaf_capacity(&self) -> usize {
        self.leaf_capacity
    }

    /// Per-inner-node fan-out this tree was built with.
    pub fn inner_capacity(&self) -> usize {
        self.inner_capacity
    }

    /// Point lookup. Returns the value paired with `key`, or `None` if
    /// `key` is absent.
    pub fn find(&self, key: &K) -> Option<&V> {
        if self.len == 0 {
            return None;
        }
        let leaf = &self.leaves[self.descend_to_leaf(key) as usize];
        leaf.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Half-open range scan: entries with `lo <= key < hi`, in
    /// ascending key order. Empty if `lo >= hi`.
    pub fn in_range<'a>(&'a self, lo: &K, hi: &K) -> Range<'a, K, V> {
        if lo >= hi {
            return Range {
                tree: self,
                cursor: Cursor::End,
                hi: hi.clone(),
            };
        }
        Range {
            tree: self,
            cursor: self.lower_bound_cursor(lo),
            hi: hi.clone(),
        }
    }

    /// All entries, in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: self,
            cursor: self.begin_cursor(),
        }
    }

    /// Entries grouped by leaf, walking the ISAM sibling chain
    /// directly rather than descending through the tree — the access
    /// pattern a full table scan uses.
    pub fn leaves(&self) -> LeafIter<'_, K, V> {
        LeafIter {
            tree: self,
            next: Some(0),
        }
    }

    fn begin_cursor(&self) -> Cursor {
        if self.len == 0 {
            Cursor::End
        } else {
            Cursor::At { leaf: 0, entry: 0 }
        }
    }

    fn descend_to_leaf(&self, key: &K) -> u32 {
        let mut node = self.root;
        loop {
            match node {
                NodeRef::Inner(i) => {
                    let inner = &self.inners[i as usize];
                    let mut idx = inner.keys.len();
                    for (j, k) in inner.keys.iter().enumerate() {
                        if key < k {
                            idx = j;
                            break;
                        }
                    }
                    node = inner.children[idx];
                }
                NodeRef::Leaf(i) => return i,
            }
        }
    }

    /// Descends to the leaf `lower` would occupy, then walks forward
    /// along the sibling chain until it finds an entry `>= lower` —
    /// the descended-to leaf alone need not contain it, since `lower`
    /// may fall in a gap between two leaves' key ranges.
    fn lower_bound_cursor(&self, lower: &K) -> Cursor {
        if self.len == 0 {
            return Cursor::End;
        }
        let mut leaf_idx = self.descend_to_leaf(lower);
        loop {
            let leaf = &self.leaves[leaf_idx as usize];
            if let Some(pos) = leaf.entries.iter().position(|(k, _)| k >= lower) {
                return Cursor::At {
                    leaf: leaf_idx,
                    entry: pos as u32,
                };
            }
            match leaf.next {
                Some(next) => leaf_idx = next,
                None => return Cursor::End,
            }
        }
    }
}

fn leftmost_key<K: Clone, V>(leaves: &[LeafNode<K, V>], inners: &[InnerNode<K>], node: NodeRef) -> K {
    match node {
        NodeRef::Leaf(i) => leaves[i as usize].entries[0].0.clone(),
        NodeRef::Inner(i) => leftmost_key(leaves, inners, inners[i as usize].children[0]),
    }
}

fn advance<K, V>(tree: &StaticIndex<K, V>, cursor: Cursor) -> Cursor {
    match cursor {
        Cursor::End => Cursor::End,
        Cursor::At { leaf, entry } => {
            let leaf_node = &tree.leaves[leaf as usize];
            let next_entry = entry + 1;
            if (next_entry as usize) < leaf_node.entries.len() {
                Cursor::At {
                    leaf,
                    entry: next_entry,
                }
            } else if let Some(next_leaf) = leaf_node.next {
                Cursor::At {
                    leaf: next_leaf,
                    entry: 0,
                }
            } else {
                Cursor::End
            }
        }
    }
}

/// Iterator over every entry in ascending key order. See
/// [`StaticIndex::iter`].
pub struct Iter<'a, K, V> {
    tree: &'a StaticIndex<K, V>,
    cursor: Cursor,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor {
            Cursor::End => None,
            Cursor::At { leaf, entry } => {
                let (k, v) = &self.tree.leaves[leaf as usize].entries[entry as usize];
                self.cursor = advance(self.tree, self.cursor);
                Some((k, v))
            }
        }
    }
}

/// Iterator over a half-open key range. See [`StaticIndex::in_range`].
pub struct Range<'a, K, V> {
    tree: &'a StaticIndex<K, V>,
    cursor: Cursor,
    hi: K,
}

impl<'a, K: Ord, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor {
            Cursor::End => None,
            Cursor::At { leaf, entry } => {
                let (k, v) = &self.tree.leaves[leaf as usize].entries[entry as usize];
                if k >= &self.hi {
                    self.cursor = Cursor::End;
                    return None;
                }
                self.cursor = advance(self.tree, self.cursor);
                Some((k, v))
            }
        }
    }
}

/// Iterator over leaves, in sibling-chain order. See
/// [`StaticIndex::leaves`].
pub struct LeafIter<'a, K, V> {
    tree: &'a StaticIndex<K, V>,
    next: Option<u32>,
}

impl<'a, K, V> Iterator for LeafIter<'a, K, V> {
    type Item = &'a [(K, V)];

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let leaf = &self.tree.leaves[idx as usize];
        self.next = leaf.next;
        Some(&leaf.entries)
    }
}
