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

//! Append-only record buffer with explicit capacity bookkeeping
//!
//! Both parsers accumulate records through [`GrowableBuffer`]. It tracks a
//! logical capacity separate from the backing `Vec` so that two growth
//! policies can coexist:
//!
//! - [`GrowableBuffer::push`] doubles the capacity whenever it runs out
//!   (starting at 128 records), which suits streams with no declared sizes.
//! - [`GrowableBuffer::reserve_exact`] followed by
//!   [`GrowableBuffer::push_reserved`] grows once to a declared count and
//!   refuses to write past it, so an oversized record array is reported
//!   instead of silently dropped.
//!
//! Every reservation is fallible. A failed reservation returns
//! [`MeshError::Allocation`] and leaves the committed records untouched.

use crate::error::{MeshError, Result};

/// Capacity of the first geometric growth step
pub const MIN_CAPACITY: usize = 128;

/// Append-only sequence with doubling growth
#[derive(Debug, Clone, PartialEq)]
pub struct GrowableBuffer<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> GrowableBuffer<T> {
    /// Create an empty buffer without allocating
    pub fn new() -> Self {
        GrowableBuffer {
            items: Vec::new(),
            capacity: 0,
        }
    }

    /// Number of committed records
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no record has been committed
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ensure room for `additional` more records, doubling as needed
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let needed = self.needed(additional)?;
        if needed <= self.capacity {
            return Ok(());
        }

        let mut new_capacity = self.capacity.max(MIN_CAPACITY);
        while new_capacity < needed {
            new_capacity = new_capacity.checked_mul(2).unwrap_or(needed);
        }
        self.grow_to(new_capacity)
    }

    /// Ensure room for exactly `additional` more records
    pub fn reserve_exact(&mut self, additional: usize) -> Result<()> {
        let needed = self.needed(additional)?;
        if needed <= self.capacity {
            return Ok(());
        }
        self.grow_to(needed)
    }

    /// Append a record, growing geometrically
    pub fn push(&mut self, item: T) -> Result<()> {
        self.reserve(1)?;
        self.items.push(item);
        Ok(())
    }

    /// Append a record into capacity that was reserved up front
    pub fn push_reserved(&mut self, item: T) -> Result<()> {
        if self.items.len() >= self.capacity {
            return Err(MeshError::Capacity {
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Drop all records, keeping the capacity for reuse
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Record at `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Most recently committed record
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Most recently committed record, mutably
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    /// Committed records as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn needed(&self, additional: usize) -> Result<usize> {
        self.items
            .len()
            .checked_add(additional)
            .ok_or(MeshError::Allocation {
                requested: usize::MAX,
            })
    }

    fn grow_to(&mut self, new_capacity: usize) -> Result<()> {
        let additional = new_capacity - self.items.len();
        self.items
            .try_reserve_exact(additional)
            .map_err(|_| MeshError::Allocation {
                requested: new_capacity,
            })?;
        self.capacity = new_capacity;
        Ok(())
    }
}

impl<T> Default for GrowableBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_unallocated() {
        let buffer: GrowableBuffer<u8> = GrowableBuffer::new();
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_push_doubles_capacity() {
        let mut buffer = GrowableBuffer::new();
        buffer.push(1u32).unwrap();
        assert_eq!(buffer.capacity(), MIN_CAPACITY);

        for i in 1..=MIN_CAPACITY as u32 {
            buffer.push(i).unwrap();
        }
        assert_eq!(buffer.len(), MIN_CAPACITY + 1);
        assert_eq!(buffer.capacity(), MIN_CAPACITY * 2);
    }

    #[test]
    fn test_reserve_exact_grows_to_declared_count() {
        let mut buffer: GrowableBuffer<[f32; 3]> = GrowableBuffer::new();
        buffer.reserve_exact(5).unwrap();
        assert_eq!(buffer.capacity(), 5);

        for _ in 0..5 {
            buffer.push_reserved([0.0; 3]).unwrap();
        }
        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn test_push_reserved_refuses_overflow() {
        let mut buffer = GrowableBuffer::new();
        buffer.reserve_exact(2).unwrap();
        buffer.push_reserved(1u16).unwrap();
        buffer.push_reserved(2u16).unwrap();

        let err = buffer.push_reserved(3u16).unwrap_err();
        assert!(matches!(err, MeshError::Capacity { capacity: 2 }));
        assert_eq!(buffer.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_failed_reservation_keeps_committed_records() {
        let mut buffer = GrowableBuffer::new();
        buffer.push(7u64).unwrap();
        let capacity = buffer.capacity();

        let err = buffer.reserve(usize::MAX).unwrap_err();
        assert!(err.is_allocation());
        assert_eq!(buffer.capacity(), capacity);
        assert_eq!(buffer.as_slice(), &[7]);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buffer = GrowableBuffer::new();
        buffer.push(b'a').unwrap();
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), MIN_CAPACITY);
    }

    #[test]
    fn test_last_mut_updates_in_place() {
        let mut buffer = GrowableBuffer::new();
        buffer.push((0u32, 0u32)).unwrap();
        buffer.last_mut().unwrap().1 = 9;
        assert_eq!(buffer.last(), Some(&(0, 9)));
    }
}
