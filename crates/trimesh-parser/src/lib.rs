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

//! Streaming mesh loaders for 3DS and Wavefront OBJ/MTL
//!
//! This crate provides:
//! - [`TdsParser`], an incremental parser for binary 3DS chunk streams
//! - [`ObjParser`], an incremental parser for OBJ and MTL directive text
//! - [`MeshSource`], the read-only accessors both parsers share
//! - [`Trimesh`], a consolidated mesh with an interleaved vertex layout
//! - [`MeshLoader`], an async file front end feeding the parsers in pieces
//!
//! Parsers accept input in any split, down to one byte per call, and only
//! answer accessor queries after the call flagged as final.
//!
//! ```
//! use trimesh_parser::{MeshSource, ObjParser};
//!
//! let mut parser = ObjParser::new()?;
//! parser.feed(b"v 0 0 0\nv 1 0 0\nv 0 1 0\n", false)?;
//! parser.feed(b"f 1 2 3\n", true)?;
//!
//! assert_eq!(parser.vertex_count(), 3);
//! assert_eq!(parser.face(0), Some([0, 1, 2]));
//! # Ok::<(), trimesh_parser::MeshError>(())
//! ```

pub mod buffer;
pub mod chunk;
pub mod error;
pub mod index;
pub mod loader;
pub mod obj;
pub mod source;
pub mod tds;
pub mod trimesh;

// Re-export commonly used types
pub use buffer::GrowableBuffer;
pub use chunk::{ChunkHandler, ChunkId};
pub use error::{MeshError, Result};
pub use index::{CornerKey, VertexIndex};
pub use loader::{MeshFormat, MeshLoader, DEFAULT_CHUNK_SIZE};
pub use obj::{ObjParser, BUILTIN_MATERIALS, DEFAULT_OBJECT_NAME};
pub use source::{
    FeedStatus, Material, MaterialReference, MeshRecords, MeshSource, Object, Vertex,
};
pub use tds::TdsParser;
pub use trimesh::{Bounds, Trimesh, TrimeshSummary, VertexFormat};
