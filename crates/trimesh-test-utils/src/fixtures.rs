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

//! Test fixture management.
//!
//! Sample OBJ/MTL text and 3DS bytes with known record counts, plus
//! helpers to write them into a temporary directory.

use crate::tds;
use std::fs;
use std::path::{Path, PathBuf};

/// A single triangle with no object or material directives
pub const TRIANGLE_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

/// Unit cube of six quads using two materials from `cube.mtl`
pub const CUBE_OBJ: &str = "\
# unit cube
mtllib cube.mtl
o cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
usemtl wood
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
usemtl metal
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
";

/// Materials referenced by [`CUBE_OBJ`]
pub const CUBE_MTL: &str = "\
newmtl wood
Ka 0.2 0.1 0.05
Kd 0.6 0.4 0.2
Ns 25.5
newmtl metal
Kd 0.7 0.7 0.75
Ks 1 1 1
d 0.9
map_Kd metal.png
";

/// Two objects with normals, texcoords and relative indices
pub const TWO_OBJECTS_OBJ: &str = "\
o left
v -1 0 0
v 0 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
o right
v 1 0 0
v 2 0 0
v 2 1 0
v 1 1 0
f -4/-3/-1 -3/-2/-1 -2/-1/-1 -1/-1/-1
";

/// Expected `trimeshinfo` count block
pub fn expected_counts(objects: usize, vertices: usize, faces: usize, materials: usize) -> String {
    format!(
        "Objects: {}\nVertices: {}\nFaces: {}\nMaterials: {}",
        objects, vertices, faces, materials
    )
}

/// Test fixture management utilities.
pub struct TestFixtures;

impl TestFixtures {
    /// Write `content` to `dir/name` and return the path
    pub fn write(dir: &Path, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("failed to write fixture");
        path
    }

    /// Write the cube and its material library, returning the OBJ path
    pub fn cube(dir: &Path) -> PathBuf {
        Self::write(dir, "cube.mtl", CUBE_MTL);
        Self::write(dir, "cube.obj", CUBE_OBJ)
    }

    /// Write the single triangle
    pub fn triangle(dir: &Path) -> PathBuf {
        Self::write(dir, "triangle.obj", TRIANGLE_OBJ)
    }

    /// Write the two-quad 3DS scene
    pub fn scene_3ds(dir: &Path) -> PathBuf {
        Self::write(dir, "scene.3ds", tds::sample_scene())
    }

    /// Large OBJ grid of `size` x `size` quads for benchmarks
    pub fn grid_obj(size: usize) -> String {
        let mut text = String::from("o grid\n");
        for y in 0..=size {
            for x in 0..=size {
                text.push_str(&format!("v {} {} 0\nvt {} {}\n", x, y, x, y));
            }
        }
        text.push_str("vn 0 0 1\n");
        let row = size + 1;
        for y in 0..size {
            for x in 0..size {
                let a = y * row + x + 1;
                let (b, c, d) = (a + 1, a + row + 1, a + row);
                text.push_str(&format!(
                    "f {a}/{a}/1 {b}/{b}/1 {c}/{c}/1 {d}/{d}/1\n",
                    a = a,
                    b = b,
                    c = c,
                    d = d
                ));
            }
        }
        text
    }

    /// Large 3DS grid of `size` x `size` quads for benchmarks; `size` <= 180
    pub fn grid_3ds(size: u16) -> Vec<u8> {
        let row = size + 1;
        let mut points = Vec::new();
        for y in 0..row {
            for x in 0..row {
                points.push([f32::from(x), f32::from(y), 0.0]);
            }
        }
        let mut faces = Vec::new();
        for y in 0..size {
            for x in 0..size {
                let a = y * row + x;
                faces.push([a, a + 1, a + row + 1]);
                faces.push([a, a + row + 1, a + row]);
            }
        }
        tds::main(&[tds::editor(&[tds::object(
            "grid",
            &[tds::tri_mesh(&[
                tds::point_array(&points),
                tds::face_array(&faces, &[]),
            ])],
        )])])
    }
}
