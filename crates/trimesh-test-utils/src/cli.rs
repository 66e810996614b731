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

//! CLI test helpers.
//!
//! Wrappers around `assert_cmd` for running the `trimeshinfo` binary.

use assert_cmd::Command;
use std::path::Path;

/// Get a Command for the trimeshinfo binary.
///
/// # Example
/// ```ignore
/// use trimesh_test_utils::trimeshinfo;
///
/// trimeshinfo()
///     .arg("model.obj")
///     .assert()
///     .success();
/// ```
#[allow(deprecated)] // cargo_bin is deprecated but still works for our use case
pub fn trimeshinfo() -> Command {
    Command::cargo_bin("trimeshinfo").expect("trimeshinfo binary not found")
}

/// Fluent API wrapper for common trimeshinfo invocations.
pub struct TrimeshinfoCommand {
    cmd: Command,
}

impl TrimeshinfoCommand {
    /// Create a new TrimeshinfoCommand.
    pub fn new() -> Self {
        let mut cmd = trimeshinfo();
        // keep log output out of the asserted streams
        cmd.env_remove("RUST_LOG").arg("--quiet");
        Self { cmd }
    }

    /// Set the working directory for the command.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    /// Add an argument to the command.
    pub fn arg(mut self, arg: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.arg(arg);
        self
    }

    /// Add multiple arguments to the command.
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Set an environment variable for the command.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Execute the command and assert success.
    pub fn run_success(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().success()
    }

    /// Execute the command and assert failure.
    pub fn run_failure(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().failure()
    }

    /// Get the underlying Command for custom assertions.
    pub fn into_inner(self) -> Command {
        self.cmd
    }
}

impl Default for TrimeshinfoCommand {
    fn default() -> Self {
        Self::new()
    }
}
