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

//! # Trimesh Test Utilities
//!
//! Shared test utilities for Trimesh crates providing:
//! - A 3DS chunk writer for building binary fixtures in memory
//! - OBJ and MTL sample text with known record counts
//! - Helpers that feed a byte stream in arbitrary pieces
//! - CLI command helpers for the `trimeshinfo` binary

pub mod cli;
pub mod feed;
pub mod fixtures;
pub mod tds;

// Re-export commonly used items at crate root
pub use cli::{trimeshinfo, TrimeshinfoCommand};
pub use feed::{feed_at_splits, feed_in_chunks};
pub use fixtures::{expected_counts, TestFixtures};
pub use tds::TdsBuilder;
