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

//! Structured logging setup for Trimesh binaries
//!
//! ```ignore
//! use trimesh_observability::{init_tracing, LogFormat};
//!
//! fn main() -> Result<(), trimesh_observability::LogError> {
//!     init_tracing(LogFormat::Compact, Some("debug"))?;
//!     tracing::info!("Loader started");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod initialization;

pub use config::{validate_level, LogConfig, LogError, LogFormat, LogOutput, LEVELS};
pub use initialization::{init_tracing, init_tracing_with_config};

/// Tracing re-exports for convenience
pub use tracing::{debug, error, info, trace, warn, Level};
