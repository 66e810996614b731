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

//! Configuration validation

use crate::error::{ConfigError, ConfigResult};
use crate::schema::*;

/// Log levels accepted by `observability.log_level`
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Log formats accepted by `observability.log_format`
pub const VALID_LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

/// Validator for configuration settings
pub trait Validator {
    /// Check the settings, reporting the first problem found
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for Config {
    fn validate(&self) -> ConfigResult<()> {
        self.loader.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

impl Validator for LoaderConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.read_chunk_size == 0 || self.read_chunk_size > MAX_READ_CHUNK_SIZE {
            return Err(ConfigError::invalid_value(
                "loader.read_chunk_size",
                format!(
                    "must be between 1 and {}, got {}",
                    MAX_READ_CHUNK_SIZE, self.read_chunk_size
                ),
            ));
        }

        let components: Vec<char> = self
            .vertex_format
            .chars()
            .filter(|c| !matches!(c, ',' | ' '))
            .collect();
        if components.is_empty() {
            return Err(ConfigError::MissingRequired("loader.vertex_format".to_string()));
        }
        if let Some(bad) = components
            .iter()
            .find(|c| !matches!(c.to_ascii_lowercase(), 'p' | 't' | 'n'))
        {
            return Err(ConfigError::invalid_value(
                "loader.vertex_format",
                format!("unknown component '{}', expected p, t or n", bad),
            ));
        }

        Ok(())
    }
}

impl Validator for ObservabilityConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "observability.log_level",
                format!("must be one of: {}", VALID_LOG_LEVELS.join(", ")),
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.log_format.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "observability.log_format",
                format!("must be one of: {}", VALID_LOG_FORMATS.join(", ")),
            ));
        }

        Ok(())
    }
}
