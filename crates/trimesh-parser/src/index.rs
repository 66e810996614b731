// Trimesh - Streaming Mesh Loaders
// Copyright (C) 2025 Trimesh Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Deduplication of face corners into output vertices
//!
//! Text meshes index positions, texture coordinates and normals separately
//! for every face corner. [`VertexIndex`] turns each distinct
//! (position, texcoord, normal) triple into one dense output vertex id,
//! handed out in first-seen order. A hash map answers lookups while the
//! stream is parsed; the dense entry list is already in id order, so after
//! [`VertexIndex::finalize`] drops the map, `id → triple` is a plain slice
//! access.

use crate::buffer::GrowableBuffer;
use crate::error::{MeshError, Result};
use std::collections::HashMap;

/// One-based corner indices, 0 when a component is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CornerKey {
    /// Position index
    pub position: u32,
    /// Texture coordinate index
    pub texcoord: u32,
    /// Normal index
    pub normal: u32,
}

impl CornerKey {
    /// Build a key from resolved one-based indices
    pub fn new(position: u32, texcoord: u32, normal: u32) -> Self {
        CornerKey {
            position,
            texcoord,
            normal,
        }
    }
}

/// Corner triple to output id mapping
#[derive(Debug, Default)]
pub struct VertexIndex {
    lookup: HashMap<CornerKey, u32>,
    entries: GrowableBuffer<CornerKey>,
    sealed: bool,
}

impl VertexIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Output id for `key`, allocating the next id on first sight
    pub fn resolve(&mut self, key: CornerKey) -> Result<u32> {
        if self.sealed {
            return Err(MeshError::Sealed);
        }
        if let Some(&id) = self.lookup.get(&key) {
            return Ok(id);
        }

        let id = self.entries.len() as u32;
        self.lookup
            .try_reserve(1)
            .map_err(|_| MeshError::Allocation {
                requested: self.entries.len() + 1,
            })?;
        self.entries.push(key)?;
        self.lookup.insert(key, id);
        Ok(id)
    }

    /// Seal the index; later calls are no-ops
    pub fn finalize(&mut self) {
        if self.sealed {
            return;
        }
        self.lookup = HashMap::new();
        self.sealed = true;
    }

    /// Whether finalize has run
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of distinct corners seen
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no corner has been seen
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Corner behind output id `id`
    pub fn get(&self, id: usize) -> Option<CornerKey> {
        self.entries.get(id).copied()
    }
}
