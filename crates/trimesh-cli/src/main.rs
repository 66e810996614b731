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

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use commands::InfoCmd;
use std::path::PathBuf;
use trimesh_config::{Config, ConfigLoader};
use trimesh_observability::{init_tracing_with_config, LogConfig, LogFormat};
use trimesh_parser::{MeshLoader, VertexFormat};

#[derive(Parser)]
#[command(name = "trimeshinfo")]
#[command(version, about = "Inspect 3DS and OBJ meshes")]
#[command(
    long_about = "trimeshinfo streams each file through the Trimesh loaders and prints \
object, vertex, face and material counts. OBJ material libraries named by mtllib \
are read from the directory of the OBJ file."
)]
#[command(author = "Trimesh Contributors")]
struct Cli {
    #[command(flatten)]
    info: InfoCmd,

    /// Bytes handed to the parser per feed call
    #[arg(long, value_name = "BYTES")]
    chunk_size: Option<usize>,

    /// Configuration file (toml, yaml or json)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_name = "FORMAT", value_parser = ["pretty", "compact", "json"])]
    log_format: Option<String>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_config(&self, config: &Config) -> Result<LogConfig> {
        let log_config = if self.verbose > 0 || self.quiet {
            LogConfig::for_verbosity(self.verbose, self.quiet)
        } else if std::env::var_os("RUST_LOG").is_some() {
            LogConfig::new()
        } else {
            LogConfig::new().with_level(config.observability.log_level.clone())
        };

        let format: LogFormat = self
            .log_format
            .as_deref()
            .unwrap_or(&config.observability.log_format)
            .parse()?;

        Ok(log_config
            .with_format(format)
            .with_color(console::colors_enabled_stderr()))
    }

    fn mesh_loader(&self, config: &Config) -> Result<MeshLoader> {
        let vertex_format: VertexFormat = config
            .loader
            .vertex_format
            .parse()
            .context("Invalid loader.vertex_format")?;

        Ok(MeshLoader::new()
            .with_chunk_size(self.chunk_size.unwrap_or(config.loader.read_chunk_size))
            .with_vertex_format(vertex_format)
            .with_material_libraries(config.loader.load_material_libraries))
    }
}

async fn run(cli: &Cli) -> Result<usize> {
    let config = ConfigLoader::new()
        .load_or_default(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;

    init_tracing_with_config(cli.log_config(&config)?)?;
    tracing::debug!("Effective configuration: {:?}", config);

    let loader = cli.mesh_loader(&config)?;
    cli.info.execute(&loader).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(0) => Ok(()),
        Ok(_) => std::process::exit(1),
        Err(e) => {
            output::error(&format!("Error: {:#}", e));
            std::process::exit(1);
        }
    }
}
