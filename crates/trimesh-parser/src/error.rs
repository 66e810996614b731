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

//! Error types for mesh parsing operations

use thiserror::Error;

/// Mesh parsing errors
#[derive(Debug, Error)]
pub enum MeshError {
    /// Malformed chunk bounds with no safe boundary to resume at
    #[error("malformed stream at byte {offset}: {reason}")]
    Stream {
        /// Absolute stream offset of the offending byte
        offset: u64,
        /// What was wrong with the stream
        reason: String,
    },

    /// Buffer growth failed
    #[error("allocation of {requested} records failed")]
    Allocation {
        /// Number of records the failed reservation asked for
        requested: usize,
    },

    /// A bounded push ran past the reserved capacity
    #[error("buffer capacity of {capacity} records exceeded")]
    Capacity {
        /// Capacity reserved before the push
        capacity: usize,
    },

    /// Bytes were fed after the final call
    #[error("parser already reached its terminal state")]
    Finished,

    /// Bytes were fed after an unrecoverable error
    #[error("parser was abandoned after an earlier error")]
    Aborted,

    /// Vertex index insertion after finalize
    #[error("vertex index is sealed")]
    Sealed,

    /// Assembling from a parser that has not been finalized
    #[error("parser has not reached its terminal state")]
    NotTerminal,

    /// Unsupported mesh format
    #[error("unsupported mesh format: {0}")]
    UnsupportedFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Create a stream error at the given offset
    pub fn stream<S: Into<String>>(offset: u64, reason: S) -> Self {
        MeshError::Stream {
            offset,
            reason: reason.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format<S: Into<String>>(msg: S) -> Self {
        MeshError::UnsupportedFormat(msg.into())
    }

    /// Check if this is a stream error
    pub fn is_stream(&self) -> bool {
        matches!(self, MeshError::Stream { .. })
    }

    /// Check if this is an allocation error
    pub fn is_allocation(&self) -> bool {
        matches!(self, MeshError::Allocation { .. })
    }

    /// Check if this error leaves the parser unusable
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MeshError::Stream { .. }
                | MeshError::Allocation { .. }
                | MeshError::Capacity { .. }
                | MeshError::Sealed
        )
    }
}

/// Result type for mesh operations
pub type Result<T> = std::result::Result<T, MeshError>;
