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

//! End-to-end tests for the `trimeshinfo` binary

#![allow(clippy::unwrap_used)]

use predicates::prelude::*;
use tempfile::TempDir;
use trimesh_test_utils::{expected_counts, trimeshinfo, TestFixtures, TrimeshinfoCommand};

#[test]
fn test_no_args_prints_usage() {
    trimeshinfo()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_version() {
    trimeshinfo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trimeshinfo"));
}

#[test]
fn test_triangle_counts() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::triangle(dir.path());

    TrimeshinfoCommand::new()
        .arg(&path)
        .run_success()
        .stdout(predicate::str::contains(expected_counts(1, 3, 1, 8)));
}

#[test]
fn test_cube_reads_material_library() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::cube(dir.path());

    TrimeshinfoCommand::new()
        .arg(&path)
        .run_success()
        .stdout(predicate::str::contains(expected_counts(1, 8, 12, 10)));
}

#[test]
fn test_cube_without_material_library() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::write(dir.path(), "cube.obj", trimesh_test_utils::fixtures::CUBE_OBJ);

    // mtllib names a file that does not exist; it is skipped
    TrimeshinfoCommand::new()
        .arg(&path)
        .run_success()
        .stdout(predicate::str::contains(expected_counts(1, 8, 12, 8)));
}

#[test]
fn test_material_libraries_disabled_by_env() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::cube(dir.path());

    TrimeshinfoCommand::new()
        .env("TRIMESH_LOAD_MATERIAL_LIBRARIES", "false")
        .arg(&path)
        .run_success()
        .stdout(predicate::str::contains(expected_counts(1, 8, 12, 8)));
}

#[test]
fn test_3ds_scene_counts() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::scene_3ds(dir.path());

    TrimeshinfoCommand::new()
        .arg(&path)
        .run_success()
        .stdout(predicate::str::contains(expected_counts(2, 8, 4, 2)));
}

#[test]
fn test_tiny_chunk_size_gives_same_counts() {
    let dir = TempDir::new().unwrap();
    let scene = TestFixtures::scene_3ds(dir.path());
    let cube = TestFixtures::cube(dir.path());

    TrimeshinfoCommand::new()
        .args(&["--chunk-size", "1"])
        .arg(&scene)
        .arg(&cube)
        .run_success()
        .stdout(predicate::str::contains(expected_counts(2, 8, 4, 2)))
        .stdout(predicate::str::contains(expected_counts(1, 8, 12, 10)));
}

#[test]
fn test_listings() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::scene_3ds(dir.path());

    TrimeshinfoCommand::new()
        .args(&["--objects", "--materials"])
        .arg(&path)
        .run_success()
        .stdout(predicate::str::contains("Object list:"))
        .stdout(predicate::str::contains("bottom"))
        .stdout(predicate::str::contains("top"))
        .stdout(predicate::str::contains("Material list:"))
        .stdout(predicate::str::contains("glass"))
        .stdout(predicate::str::contains("glass.png"));
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let triangle = TestFixtures::triangle(dir.path());
    let scene = TestFixtures::scene_3ds(dir.path());

    let output = TrimeshinfoCommand::new()
        .arg("--json")
        .arg(&triangle)
        .arg(&scene)
        .run_success()
        .get_output()
        .stdout
        .clone();

    let summaries: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let summaries = summaries.as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["faces"], 1);
    assert_eq!(summaries[0]["object_names"][0], "n/a");
    assert_eq!(summaries[1]["objects"], 2);
    assert_eq!(summaries[1]["material_names"][1], "glass");
}

#[test]
fn test_unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::write(dir.path(), "model.stl", "solid empty\n");

    TrimeshinfoCommand::new()
        .arg(&path)
        .run_failure()
        .stderr(predicate::str::contains("model.stl"));
}

#[test]
fn test_failures_are_marked_on_stderr_only() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::write(dir.path(), "model.stl", "solid empty\n");

    TrimeshinfoCommand::new()
        .arg(&path)
        .run_failure()
        .stderr(predicate::str::starts_with("✗ "))
        .stderr(predicate::str::contains("unsupported mesh format"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_empty_mesh_warns_on_stderr() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::write(dir.path(), "points.obj", "v 0 0 0\n");

    TrimeshinfoCommand::new()
        .arg(&path)
        .run_success()
        .stderr(predicate::str::contains("! "))
        .stderr(predicate::str::contains("mesh has no faces"))
        .stdout(predicate::str::contains("Faces: 0"));
}

#[test]
fn test_missing_file_does_not_stop_others() {
    let dir = TempDir::new().unwrap();
    let triangle = TestFixtures::triangle(dir.path());

    TrimeshinfoCommand::new()
        .arg(dir.path().join("absent.obj"))
        .arg(&triangle)
        .run_failure()
        .stderr(predicate::str::contains("absent.obj"))
        .stdout(predicate::str::contains(expected_counts(1, 3, 1, 8)));
}

#[test]
fn test_config_file_chunk_size() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::triangle(dir.path());
    let config = TestFixtures::write(
        dir.path(),
        "trimesh.toml",
        "[loader]\nread_chunk_size = 2\nvertex_format = \"p\"\n",
    );

    TrimeshinfoCommand::new()
        .arg("--config")
        .arg(&config)
        .arg(&path)
        .run_success()
        .stdout(predicate::str::contains(expected_counts(1, 3, 1, 8)));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::triangle(dir.path());
    let config = TestFixtures::write(
        dir.path(),
        "trimesh.toml",
        "[loader]\nread_chunk_size = 0\n",
    );

    TrimeshinfoCommand::new()
        .arg("--config")
        .arg(&config)
        .arg(&path)
        .run_failure()
        .stderr(predicate::str::contains("read_chunk_size"));
}

#[test]
fn test_rejects_unknown_log_format() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::triangle(dir.path());

    TrimeshinfoCommand::new()
        .args(&["--log-format", "xml"])
        .arg(&path)
        .run_failure();
}
