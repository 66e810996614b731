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

//! Configuration schema

use serde::{Deserialize, Serialize};

/// Largest accepted read size, 16 MiB
pub const MAX_READ_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Mesh loading settings
    pub loader: LoaderConfig,

    /// Logging settings
    pub observability: ObservabilityConfig,
}

/// Mesh loading settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoaderConfig {
    /// Bytes read from disk per parser feed
    #[serde(default = "default_read_chunk_size")]
    pub read_chunk_size: usize,

    /// Interleaved vertex components: `p`osition, `t`excoord, `n`ormal
    #[serde(default = "default_vertex_format")]
    pub vertex_format: String,

    /// Whether OBJ `mtllib` libraries are loaded
    #[serde(default = "default_true")]
    pub load_material_libraries: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            read_chunk_size: default_read_chunk_size(),
            vertex_format: default_vertex_format(),
            load_material_libraries: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservabilityConfig {
    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (pretty, compact, json)
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        ObservabilityConfig {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_read_chunk_size() -> usize {
    1024
}

fn default_vertex_format() -> String {
    "ptn".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}
