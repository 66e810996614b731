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

use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};
use trimesh_parser::{MeshLoader, Trimesh, TrimeshSummary};

/// Print counts and listings for mesh files
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// Mesh files (.3ds or .obj)
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// List objects with their face ranges
    #[arg(long)]
    pub objects: bool,

    /// List materials with their diffuse colors
    #[arg(long)]
    pub materials: bool,

    /// Print a JSON array of summaries
    #[arg(long)]
    pub json: bool,
}

impl InfoCmd {
    /// Load every file and print its summary
    ///
    /// Returns the number of files that failed to load. Failures are
    /// reported on stderr and do not stop the remaining files.
    pub async fn execute(&self, loader: &MeshLoader) -> Result<usize> {
        let mut summaries = Vec::with_capacity(self.files.len());
        let mut failed = 0;

        for (i, path) in self.files.iter().enumerate() {
            let label = path.display().to_string();
            debug!("Inspecting {}", label);

            let mesh = match loader.load(path).await {
                Ok(mesh) => mesh,
                Err(e) => {
                    output::error(&format!("{}: {}", label, e));
                    failed += 1;
                    continue;
                }
            };

            let summary = mesh.summary(label);
            if self.json {
                summaries.push(summary);
                continue;
            }

            if i > 0 {
                println!();
            }
            self.print_text(&mesh, &summary);
        }

        if self.json {
            let json = serde_json::to_string_pretty(&summaries)
                .context("Failed to serialize summaries")?;
            println!("{}", json);
        }

        info!(
            "Inspected {} file(s), {} failed",
            self.files.len(),
            failed
        );
        Ok(failed)
    }

    fn print_text(&self, mesh: &Trimesh, summary: &TrimeshSummary) {
        if self.files.len() > 1 {
            output::header(&summary.source);
        }
        println!("{}", summary);

        if summary.faces == 0 {
            output::warning(&format!("{}: mesh has no faces", summary.source));
        }

        if self.objects {
            output::section("Object list:");
            for object in mesh.objects() {
                let range = object.face_range();
                output::entry(
                    &object.name,
                    &format!("faces {}..{}", range.start, range.end),
                );
            }
        }

        if self.materials {
            output::section("Material list:");
            for material in mesh.materials() {
                let [r, g, b, a] = material.diffuse;
                let mut note = format!("diffuse {:.3} {:.3} {:.3} alpha {:.3}", r, g, b, a);
                if let Some(map) = &material.texture_map {
                    note.push_str(&format!(" map {}", map));
                }
                output::entry(&material.name, &note);
            }
        }
    }
}
