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

//! Global subscriber installation; one test per process

use trimesh_observability::{init_tracing_with_config, LogConfig, LogError, LogFormat};

#[test]
fn test_second_installation_is_rejected() {
    let config = LogConfig::new()
        .with_format(LogFormat::Json)
        .with_level("debug")
        .with_color(false);
    assert!(init_tracing_with_config(config.clone()).is_ok());

    trimesh_observability::debug!("subscriber installed");

    let again = init_tracing_with_config(config);
    assert!(matches!(again, Err(LogError::ConfigError(_))));
}
