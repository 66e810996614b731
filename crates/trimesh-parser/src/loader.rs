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

//! File front end for the parsers
//!
//! [`MeshLoader`] picks a parser from the file extension, streams the file
//! through it in fixed-size pieces and assembles a [`Trimesh`]. For OBJ
//! files the `mtllib` libraries named by the main file are looked up next
//! to it and fed into the same parser before the final call.
//!
//! # Examples
//!
//! ```no_run
//! use trimesh_parser::{MeshLoader, VertexFormat};
//!
//! # async fn example() -> trimesh_parser::Result<()> {
//! let loader = MeshLoader::new()
//!     .with_chunk_size(4096)
//!     .with_vertex_format(VertexFormat::POSITION);
//! let mesh = loader.load("models/teapot.obj").await?;
//! println!("{}", mesh.summary("teapot"));
//! # Ok(())
//! # }
//! ```

use crate::error::{MeshError, Result};
use crate::obj::ObjParser;
use crate::source::FeedStatus;
use crate::tds::TdsParser;
use crate::trimesh::{Trimesh, VertexFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, instrument, warn};

/// Read size used when none is configured
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Supported mesh file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshFormat {
    /// Binary 3DS chunks
    ThreeDs,
    /// Wavefront OBJ text
    Obj,
}

impl MeshFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "3ds" => Some(MeshFormat::ThreeDs),
            "obj" => Some(MeshFormat::Obj),
            _ => None,
        }
    }

    /// Detect format from a path, failing for unknown extensions
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| {
                MeshError::unsupported_format(format!("{}", path.display()))
            })
    }
}

/// Streams mesh files through the matching parser
#[derive(Debug, Clone)]
pub struct MeshLoader {
    chunk_size: usize,
    vertex_format: VertexFormat,
    resolve_material_libraries: bool,
}

impl MeshLoader {
    /// Loader with 1 KiB reads, every vertex component and library lookup
    pub fn new() -> Self {
        MeshLoader {
            chunk_size: DEFAULT_CHUNK_SIZE,
            vertex_format: VertexFormat::ALL,
            resolve_material_libraries: true,
        }
    }

    /// Set the read size; zero is raised to one byte
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Set the interleaved vertex layout of loaded meshes
    pub fn with_vertex_format(mut self, vertex_format: VertexFormat) -> Self {
        self.vertex_format = vertex_format;
        self
    }

    /// Enable or disable `mtllib` lookup
    pub fn with_material_libraries(mut self, enabled: bool) -> Self {
        self.resolve_material_libraries = enabled;
        self
    }

    /// Configured read size
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Configured vertex layout
    pub fn vertex_format(&self) -> VertexFormat {
        self.vertex_format
    }

    /// Whether `mtllib` libraries are loaded
    pub fn resolves_material_libraries(&self) -> bool {
        self.resolve_material_libraries
    }

    /// Load and assemble the mesh at `path`
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Trimesh> {
        let path = path.as_ref();
        let format = MeshFormat::from_path(path)?;
        debug!("Detected mesh format: {:?}", format);

        let mesh = match format {
            MeshFormat::ThreeDs => self.load_3ds(path).await?,
            MeshFormat::Obj => self.load_obj(path).await?,
        };

        info!(
            "Loaded {}: vertices={}, faces={}, objects={}",
            path.display(),
            mesh.vertex_count(),
            mesh.faces().len(),
            mesh.objects().len()
        );
        Ok(mesh)
    }

    /// Parse an in-memory file, fed in configured pieces
    ///
    /// Material libraries are not resolved.
    pub fn parse_bytes(&self, format: MeshFormat, data: &[u8]) -> Result<Trimesh> {
        match format {
            MeshFormat::ThreeDs => {
                let mut parser = TdsParser::new();
                self.feed_slices(data, |piece, last| parser.feed(piece, last))?;
                Trimesh::from_source(&parser, self.vertex_format)
            }
            MeshFormat::Obj => {
                let mut parser = ObjParser::new()?;
                self.feed_slices(data, |piece, last| parser.feed(piece, last))?;
                Trimesh::from_source(&parser, self.vertex_format)
            }
        }
    }

    #[instrument(skip(self))]
    async fn load_3ds(&self, path: &Path) -> Result<Trimesh> {
        let mut parser = TdsParser::new();
        self.stream_file(path, |piece, last| parser.feed(piece, last))
            .await?;

        if parser.truncated() {
            warn!("{} ends inside a chunk; partial records dropped", path.display());
        }
        Trimesh::from_source(&parser, self.vertex_format)
    }

    #[instrument(skip(self))]
    async fn load_obj(&self, path: &Path) -> Result<Trimesh> {
        let mut parser = ObjParser::new()?;
        self.stream_file(path, |piece, _| parser.feed(piece, false))
            .await?;
        // close a last line that has no newline before library text follows
        parser.feed(b"\n", false)?;

        if self.resolve_material_libraries {
            let directory = path.parent().unwrap_or_else(|| Path::new(""));
            let libraries = parser.requested_material_libraries().to_vec();
            for library in libraries {
                let library_path = directory.join(&library);
                let streamed = self
                    .stream_file(&library_path, |piece, _| parser.feed(piece, false))
                    .await;

                match streamed {
                    Ok(_) => {
                        parser.feed(b"\n", false)?;
                        debug!("Loaded material library {}", library_path.display());
                    }
                    Err(MeshError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                        warn!("Material library {} not found", library_path.display());
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        parser.feed(&[], true)?;
        Trimesh::from_source(&parser, self.vertex_format)
    }

    /// Read `path` in chunk-size pieces, flagging the short last one
    async fn stream_file<F>(&self, path: &Path, mut feed: F) -> Result<u64>
    where
        F: FnMut(&[u8], bool) -> Result<FeedStatus>,
    {
        let mut file = tokio::fs::File::open(path).await?;
        let mut buffer = vec![0u8; self.chunk_size];
        let mut total = 0u64;

        loop {
            let filled = read_full(&mut file, &mut buffer).await?;
            let last = filled < buffer.len();
            feed(&buffer[..filled], last)?;
            total += filled as u64;
            if last {
                break;
            }
        }

        debug!("Streamed {} bytes from {}", total, path.display());
        Ok(total)
    }

    fn feed_slices<F>(&self, data: &[u8], mut feed: F) -> Result<()>
    where
        F: FnMut(&[u8], bool) -> Result<FeedStatus>,
    {
        let mut pieces = data.chunks(self.chunk_size).peekable();
        if pieces.peek().is_none() {
            feed(&[], true)?;
            return Ok(());
        }
        while let Some(piece) = pieces.next() {
            feed(piece, pieces.peek().is_none())?;
        }
        Ok(())
    }
}

impl Default for MeshLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill `buffer` unless the file ends first
async fn read_full(file: &mut tokio::fs::File, buffer: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        let read = file.read(&mut buffer[filled..]).await?;
        if read == 0 {
            break;
        }
        filled += read;
    }
    Ok(filled)
}
