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

//! Console output helpers shared by commands.
//!
//! Diagnostics go to stderr, results to stdout. Styling is dropped
//! automatically when the stream is not a terminal.

use console::style;

/// Print an error message to stderr with a red cross.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").for_stderr().red().bold(), msg);
}

/// Print a warning message to stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("!").for_stderr().yellow().bold(), msg);
}

/// Print a file heading.
pub fn header(msg: &str) {
    println!("{}", style(msg).green().bold());
}

/// Print a section title such as `Objects:`.
pub fn section(title: &str) {
    println!("{}", style(title).bold());
}

/// Print an indented listing entry with a dimmed annotation.
pub fn entry(name: &str, note: &str) {
    println!("  {} {}", style(name).cyan(), style(note).dim());
}
