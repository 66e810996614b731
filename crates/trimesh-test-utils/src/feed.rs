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

//! Helpers that push a byte stream through a feed callback in pieces
//!
//! The callback receives each piece and whether it is the last one, which
//! matches the shape of the parsers' `feed` methods:
//!
//! ```
//! use trimesh_test_utils::feed_in_chunks;
//!
//! let mut pieces = Vec::new();
//! feed_in_chunks::<(), _>(b"abcde", 2, |piece, last| {
//!     pieces.push((piece.to_vec(), last));
//!     Ok(())
//! })
//! .unwrap();
//! assert_eq!(pieces.len(), 3);
//! assert!(pieces[2].1);
//! ```

/// Feed `data` in pieces of `chunk_size` bytes; empty input is one final call
pub fn feed_in_chunks<E, F>(data: &[u8], chunk_size: usize, mut feed: F) -> Result<(), E>
where
    F: FnMut(&[u8], bool) -> Result<(), E>,
{
    let chunk_size = chunk_size.max(1);
    if data.is_empty() {
        return feed(&[], true);
    }

    let mut pieces = data.chunks(chunk_size).peekable();
    while let Some(piece) = pieces.next() {
        feed(piece, pieces.peek().is_none())?;
    }
    Ok(())
}

/// Feed `data` cut at the given offsets, then an empty final call
///
/// Offsets are clamped to the input and may repeat, which produces empty
/// pieces in between.
pub fn feed_at_splits<E, F>(data: &[u8], splits: &[usize], mut feed: F) -> Result<(), E>
where
    F: FnMut(&[u8], bool) -> Result<(), E>,
{
    let mut cuts: Vec<usize> = splits.iter().map(|&at| at.min(data.len())).collect();
    cuts.sort_unstable();

    let mut start = 0;
    for cut in cuts {
        feed(&data[start..cut], false)?;
        start = cut;
    }
    feed(&data[start..], false)?;
    feed(&[], true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(splits: &[usize]) -> Vec<(Vec<u8>, bool)> {
        let mut pieces = Vec::new();
        feed_at_splits::<(), _>(b"hello", splits, |piece, last| {
            pieces.push((piece.to_vec(), last));
            Ok(())
        })
        .unwrap();
        pieces
    }

    #[test]
    fn test_splits_cover_input_once() {
        let pieces = collect(&[4, 1, 9]);
        let joined: Vec<u8> = pieces.iter().flat_map(|(p, _)| p.clone()).collect();
        assert_eq!(joined, b"hello");
        assert_eq!(pieces.iter().filter(|(_, last)| *last).count(), 1);
        assert!(pieces.last().unwrap().1);
    }

    #[test]
    fn test_empty_input_is_single_final_call() {
        let mut calls = 0;
        feed_in_chunks::<(), _>(&[], 8, |piece, last| {
            assert!(piece.is_empty() && last);
            calls += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(calls, 1);
    }
}
