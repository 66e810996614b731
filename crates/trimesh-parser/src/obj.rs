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

//! Incremental OBJ/MTL parser
//!
//! [`ObjParser`] tokenizes directive lines as bytes arrive, so a line may be
//! split across any number of [`ObjParser::feed`] calls. Material library
//! text can be pushed into the same parser before the final call; the names
//! requested by `mtllib` lines are available mid-stream through
//! [`ObjParser::requested_material_libraries`].
//!
//! Face corners are deduplicated through a [`VertexIndex`], so every output
//! vertex is one distinct (position, texcoord, normal) combination and
//! polygons are fan-triangulated from their first corner.

use crate::buffer::GrowableBuffer;
use crate::error::{MeshError, Result};
use crate::index::{CornerKey, VertexIndex};
use crate::source::{FeedStatus, Material, MeshRecords, MeshSource, Vertex};
use tracing::{debug, trace, warn};

/// Name of the object synthesized when a file declares none
pub const DEFAULT_OBJECT_NAME: &str = "n/a";

/// Materials every text mesh starts with
pub const BUILTIN_MATERIALS: [(&str, [f32; 3]); 8] = [
    ("white", [1.0, 1.0, 1.0]),
    ("red", [1.0, 0.0, 0.0]),
    ("green", [0.0, 1.0, 0.0]),
    ("blue", [0.0, 0.0, 1.0]),
    ("yellow", [1.0, 1.0, 0.0]),
    ("magenta", [1.0, 0.0, 1.0]),
    ("cyan", [0.0, 1.0, 1.0]),
    ("black", [0.0, 0.0, 0.0]),
];

/// Tokenizer position within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    SearchCommand,
    ParseCommand,
    SearchParameter,
    ParseParameter,
    /// Skipping to end of line, then resuming the stored stage
    Comment(Resume),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    SearchCommand,
    ParseCommand,
    SearchParameter,
    ParseParameter,
}

impl From<Resume> for Stage {
    fn from(resume: Resume) -> Self {
        match resume {
            Resume::SearchCommand => Stage::SearchCommand,
            Resume::ParseCommand => Stage::ParseCommand,
            Resume::SearchParameter => Stage::SearchParameter,
            Resume::ParseParameter => Stage::ParseParameter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    Terminal,
    Failed,
}

#[derive(Debug)]
struct Cursor {
    stage: Stage,
    command: Vec<u8>,
    parameter: Vec<u8>,
    corners: Vec<u32>,
    line: u64,
    offset: u64,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor {
            stage: Stage::SearchCommand,
            command: Vec::with_capacity(16),
            parameter: Vec::with_capacity(128),
            corners: Vec::with_capacity(8),
            line: 1,
            offset: 0,
        }
    }
}

/// Streaming OBJ/MTL parser
#[derive(Debug)]
pub struct ObjParser {
    cursor: Cursor,
    records: MeshRecords,
    positions: GrowableBuffer<[f64; 3]>,
    texcoords: GrowableBuffer<[f64; 2]>,
    normals: GrowableBuffer<[f64; 3]>,
    index: VertexIndex,
    libraries: Vec<String>,
    phase: Phase,
}

impl ObjParser {
    /// Create a parser seeded with the built-in materials
    pub fn new() -> Result<Self> {
        let mut records = MeshRecords::default();
        for (name, rgb) in BUILTIN_MATERIALS {
            records.add_material(Material::with_color(name, rgb))?;
        }

        Ok(ObjParser {
            cursor: Cursor::default(),
            records,
            positions: GrowableBuffer::new(),
            texcoords: GrowableBuffer::new(),
            normals: GrowableBuffer::new(),
            index: VertexIndex::new(),
            libraries: Vec::new(),
            phase: Phase::Active,
        })
    }

    /// Push the next piece of text; `is_final` marks the last piece
    ///
    /// A line without a trailing newline is dispatched by the final call.
    pub fn feed(&mut self, bytes: &[u8], is_final: bool) -> Result<FeedStatus> {
        match self.phase {
            Phase::Terminal => return Err(MeshError::Finished),
            Phase::Failed => return Err(MeshError::Aborted),
            Phase::Active => {}
        }

        let outcome = self.consume(bytes).and_then(|()| {
            if is_final {
                self.finalize()
            } else {
                Ok(())
            }
        });
        if let Err(err) = outcome {
            if err.is_fatal() {
                warn!("OBJ parse abandoned at line {}: {}", self.cursor.line, err);
                self.phase = Phase::Failed;
            }
            return Err(err);
        }

        Ok(if is_final {
            FeedStatus::Complete
        } else {
            FeedStatus::Pending
        })
    }

    /// Library names from `mtllib` lines seen so far, in order
    pub fn requested_material_libraries(&self) -> &[String] {
        &self.libraries
    }

    /// Whether an earlier feed failed
    pub fn is_failed(&self) -> bool {
        self.phase == Phase::Failed
    }

    /// Total bytes consumed so far
    pub fn bytes_consumed(&self) -> u64 {
        self.cursor.offset
    }

    fn consume(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.push_byte(byte)?;
            self.cursor.offset += 1;
        }
        Ok(())
    }

    fn push_byte(&mut self, byte: u8) -> Result<()> {
        match self.cursor.stage {
            Stage::SearchCommand => match byte {
                b' ' | b'\t' | b'\r' | b'\n' => {}
                b'#' => self.cursor.stage = Stage::Comment(Resume::SearchCommand),
                _ => {
                    self.cursor.command.push(byte);
                    self.cursor.stage = Stage::ParseCommand;
                }
            },
            Stage::ParseCommand => match byte {
                b' ' | b'\t' | b'\r' => self.cursor.stage = Stage::SearchParameter,
                b'\n' => self.end_line()?,
                b'#' => self.cursor.stage = Stage::Comment(Resume::ParseCommand),
                _ => self.cursor.command.push(byte),
            },
            Stage::SearchParameter => match byte {
                b' ' | b'\t' | b'\r' => {}
                b'\n' => self.end_line()?,
                b'#' => self.cursor.stage = Stage::Comment(Resume::SearchParameter),
                _ => {
                    self.cursor.parameter.push(byte);
                    self.cursor.stage = Stage::ParseParameter;
                }
            },
            Stage::ParseParameter => match byte {
                b'\n' => self.end_line()?,
                b'#' => self.cursor.stage = Stage::Comment(Resume::ParseParameter),
                _ => self.cursor.parameter.push(byte),
            },
            Stage::Comment(resume) => {
                if byte == b'\n' {
                    // the newline still ends the interrupted line
                    self.cursor.stage = resume.into();
                    return self.push_byte(byte);
                }
            }
        }

        if byte == b'\n' {
            self.cursor.line += 1;
        }
        Ok(())
    }

    fn end_line(&mut self) -> Result<()> {
        let command = std::mem::take(&mut self.cursor.command);
        let mut parameter = std::mem::take(&mut self.cursor.parameter);
        while matches!(parameter.last(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            parameter.pop();
        }

        let outcome = self.dispatch(
            &String::from_utf8_lossy(&command),
            &String::from_utf8_lossy(&parameter),
        );

        self.cursor.command = command;
        self.cursor.command.clear();
        self.cursor.parameter = parameter;
        self.cursor.parameter.clear();
        self.cursor.stage = Stage::SearchCommand;
        outcome
    }

    fn dispatch(&mut self, command: &str, parameter: &str) -> Result<()> {
        match command {
            "v" => {
                let [x, y, z] = parse_floats::<3>(parameter);
                self.positions.push([x, y, z])
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(parameter);
                self.texcoords.push([u, v])
            }
            "vn" => {
                let [x, y, z] = parse_floats::<3>(parameter);
                self.normals.push([x, y, z])
            }
            "f" => self.add_polygon(parameter),
            "o" => {
                let face_total = self.records.face_total();
                self.records.close_object(face_total);
                debug!("object '{}' starts at face {}", parameter, face_total);
                self.records.add_object(parameter, face_total)
            }
            "usemtl" => {
                let face_total = self.records.face_total();
                self.close_material_reference(face_total);
                self.records.open_material_reference(parameter, face_total)
            }
            "mtllib" => {
                for library in parameter.split_whitespace() {
                    debug!("material library '{}' requested", library);
                    self.libraries.push(library.to_string());
                }
                Ok(())
            }
            "newmtl" => {
                debug!("material '{}'", parameter);
                self.records.add_material(Material::new(parameter))
            }
            "Ka" | "Kd" | "Ks" => {
                let [r, g, b] = parse_floats::<3>(parameter).map(|c| c as f32);
                if let Some(material) = self.records.current_material_mut() {
                    let target = match command {
                        "Ka" => &mut material.ambient,
                        "Kd" => &mut material.diffuse,
                        _ => &mut material.specular,
                    };
                    target[..3].copy_from_slice(&[r, g, b]);
                }
                Ok(())
            }
            "Ns" => {
                let [value] = parse_floats::<1>(parameter);
                if let Some(material) = self.records.current_material_mut() {
                    material.shininess = (value / 255.0) as f32;
                }
                Ok(())
            }
            "Tr" => {
                let [value] = parse_floats::<1>(parameter);
                if let Some(material) = self.records.current_material_mut() {
                    material.set_opacity((1.0 - value / 255.0) as f32);
                }
                Ok(())
            }
            "d" => {
                let [value] = parse_floats::<1>(parameter);
                if let Some(material) = self.records.current_material_mut() {
                    material.set_opacity(value as f32);
                }
                Ok(())
            }
            "map_Kd" => {
                if let Some(material) = self.records.current_material_mut() {
                    material.texture_map = Some(parameter.to_string());
                }
                Ok(())
            }
            _ => {
                trace!("ignoring '{}' on line {}", command, self.cursor.line);
                Ok(())
            }
        }
    }

    fn add_polygon(&mut self, parameter: &str) -> Result<()> {
        let counts = [
            self.positions.len(),
            self.texcoords.len(),
            self.normals.len(),
        ];

        let mut corners = std::mem::take(&mut self.cursor.corners);
        corners.clear();
        let mut outcome = Ok(());
        for corner in parameter.split_whitespace() {
            let mut parts = corner.split('/');
            let mut component = |count: usize| resolve_index(parts.next(), count);
            let key = CornerKey::new(
                component(counts[0]),
                component(counts[1]),
                component(counts[2]),
            );
            match self.index.resolve(key) {
                Ok(id) => corners.push(id),
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            }
        }

        if outcome.is_ok() {
            outcome = self.push_fan(&corners);
        }
        self.cursor.corners = corners;
        outcome
    }

    /// Triangulate around the first corner
    fn push_fan(&mut self, corners: &[u32]) -> Result<()> {
        if corners.len() < 3 {
            trace!(
                "dropping face with {} corners on line {}",
                corners.len(),
                self.cursor.line
            );
            return Ok(());
        }

        let first = corners[0];
        for pair in corners[1..].windows(2) {
            self.records.push_face([first, pair[0], pair[1]])?;
        }
        Ok(())
    }

    fn close_material_reference(&mut self, face_end: u32) {
        if let Some(start) = self
            .records
            .material_references()
            .last()
            .map(|reference| reference.face_start)
        {
            self.records
                .set_reference_range(start, face_end.saturating_sub(start));
        }
    }

    fn finalize(&mut self) -> Result<()> {
        // a final line without its newline
        self.push_byte(b'\n')?;

        let face_total = self.records.face_total();
        if !self.records.has_objects() {
            self.records.add_object(DEFAULT_OBJECT_NAME, 0)?;
        }
        self.records.close_object(face_total);
        self.close_material_reference(face_total);
        self.index.finalize();
        self.phase = Phase::Terminal;

        debug!(
            "OBJ parse complete: objects={}, vertices={}, faces={}, materials={}",
            self.records.objects().len(),
            self.index.len(),
            face_total,
            self.records.materials().len()
        );
        Ok(())
    }

    fn corner_data<const N: usize>(buffer: &GrowableBuffer<[f64; N]>, index: u32) -> [f64; N] {
        index
            .checked_sub(1)
            .and_then(|i| buffer.get(i as usize))
            .copied()
            .unwrap_or([0.0; N])
    }
}

impl MeshSource for ObjParser {
    fn records(&self) -> Option<&MeshRecords> {
        (self.phase == Phase::Terminal).then_some(&self.records)
    }

    fn vertex_count(&self) -> usize {
        if self.is_terminal() {
            self.index.len()
        } else {
            0
        }
    }

    fn vertex(&self, index: usize) -> Option<Vertex> {
        self.records()?;
        let key = self.index.get(index)?;
        Some(Vertex {
            position: Self::corner_data(&self.positions, key.position),
            texcoord: Self::corner_data(&self.texcoords, key.texcoord),
            normal: Self::corner_data(&self.normals, key.normal),
        })
    }

    fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }
}

/// Up to `N` whitespace-separated numbers; missing or unparsable ones are 0
fn parse_floats<const N: usize>(parameter: &str) -> [f64; N] {
    let mut values = [0.0; N];
    for (slot, token) in values.iter_mut().zip(parameter.split_whitespace()) {
        *slot = token.parse().unwrap_or(0.0);
    }
    values
}

/// One-based index of a corner component, 0 when absent
///
/// Negative values count back from the `count` elements declared so far.
fn resolve_index(component: Option<&str>, count: usize) -> u32 {
    let Some(value) = component
        .filter(|text| !text.is_empty())
        .and_then(|text| text.parse::<i64>().ok())
    else {
        return 0;
    };

    let resolved = if value < 0 {
        count as i64 + 1 + value
    } else {
        value
    };
    if resolved < 1 {
        return 0;
    }
    u32::try_from(resolved).unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ObjParser {
        let mut parser = ObjParser::new().unwrap();
        assert_eq!(
            parser.feed(text.as_bytes(), true).unwrap(),
            FeedStatus::Complete
        );
        parser
    }

    const QUADS: &str = "\
mtllib scene.mtl
o floor
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 1
vn 0 0 1
usemtl red
f 1/1/1 2/1/1 3/2/1 4/2/1
o wall
usemtl blue
f -4 -3 -2
f -4//-1 -2//-1 -1//-1
";

    #[test]
    fn test_single_triangle() {
        let parser = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");

        assert_eq!(parser.object_count(), 1);
        let object = parser.object(0).unwrap();
        assert_eq!(object.name, "n/a");
        assert_eq!(object.face_range(), 0..1);

        assert_eq!(parser.vertex_count(), 3);
        assert_eq!(parser.face_count(), 1);
        assert_eq!(parser.face(0), Some([0, 1, 2]));
        assert_eq!(parser.face_u16(0), Some([0, 1, 2]));
        assert_eq!(parser.vertex(1).unwrap().position, [1.0, 0.0, 0.0]);

        assert_eq!(parser.material_count(), 8);
        assert_eq!(parser.material(0).unwrap().name, "white");
        assert_eq!(parser.material(1).unwrap().diffuse, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(parser.material_reference_count(), 0);
    }

    #[test]
    fn test_fan_triangulation() {
        let parser = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        assert_eq!(parser.face_count(), 2);
        assert_eq!(parser.face(0), Some([0, 1, 2]));
        assert_eq!(parser.face(1), Some([0, 2, 3]));
    }

    #[test]
    fn test_degenerate_faces_emit_nothing() {
        let parser = parse("v 0 0 0\nv 1 0 0\nf 1 2\nf\n");
        assert_eq!(parser.face_count(), 0);
    }

    #[test]
    fn test_objects_materials_and_negative_indices() {
        let parser = parse(QUADS);

        assert_eq!(parser.requested_material_libraries(), ["scene.mtl"]);
        assert_eq!(parser.object_count(), 2);
        assert_eq!(parser.object(0).unwrap().face_range(), 0..2);
        assert_eq!(parser.object(1).unwrap().name, "wall");
        assert_eq!(parser.object(1).unwrap().face_range(), 2..4);

        assert_eq!(parser.material_reference_count(), 2);
        assert_eq!(parser.material_reference(0).unwrap().name, "red");
        assert_eq!(parser.material_reference(0).unwrap().face_range(), 0..2);
        assert_eq!(parser.material_reference(1).unwrap().face_range(), 2..4);

        // -4 -3 -2 resolve to positions 1 2 3 with no texcoord or normal
        let corner = parser.vertex(parser.face(2).unwrap()[1] as usize).unwrap();
        assert_eq!(corner.position, [1.0, 0.0, 0.0]);
        assert_eq!(corner.texcoord, [0.0, 0.0]);

        let with_normal = parser.vertex(parser.face(3).unwrap()[0] as usize).unwrap();
        assert_eq!(with_normal.normal, [0.0, 0.0, 1.0]);
        assert!(parser.has_normals());
    }

    #[test]
    fn test_shared_corners_are_deduplicated() {
        let parser = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4\nf 1/0 3 4\n");
        // 1/0 has an explicit zero texcoord, the same as no texcoord
        assert_eq!(parser.vertex_count(), 4);
        assert_eq!(parser.face(2), Some([0, 2, 3]));
    }

    #[test]
    fn test_distinct_texcoords_split_vertices() {
        let parser = parse("v 0 0 0\nvt 0 0\nvt 1 1\nf 1/1 1/2 1\n");
        assert_eq!(parser.vertex_count(), 3);
        assert_eq!(parser.vertex(1).unwrap().texcoord, [1.0, 1.0]);
    }

    #[test]
    fn test_corner_order_keeps_vertex_set() {
        const HEAD: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 1\n";

        fn sorted_vertices(parser: &ObjParser) -> Vec<[f64; 8]> {
            let mut vertices: Vec<[f64; 8]> = (0..parser.vertex_count())
                .map(|i| {
                    let v = parser.vertex(i).unwrap();
                    let [x, y, z] = v.position;
                    let [s, t] = v.texcoord;
                    let [nx, ny, nz] = v.normal;
                    [x, y, z, s, t, nx, ny, nz]
                })
                .collect();
            vertices.sort_by(|a, b| a.partial_cmp(b).unwrap());
            vertices
        }

        let forward = parse(&format!("{}f 1/1 2/2 3/1\n", HEAD));
        let rotated = parse(&format!("{}f 3/1 1/1 2/2\n", HEAD));

        assert_eq!(forward.vertex_count(), 3);
        assert_eq!(rotated.vertex_count(), forward.vertex_count());
        assert_eq!(sorted_vertices(&rotated), sorted_vertices(&forward));
        assert_eq!(forward.face(0), Some([0, 1, 2]));
        assert_eq!(rotated.face(0), Some([0, 1, 2]));
    }

    #[test]
    fn test_comments_and_line_endings() {
        let text = "# header\r\nv 1 2 3 # trailing\r\nv 4 5 6\r\n\tv   7 8 9\t\r\n#\nf 1 2 3";
        let parser = parse(text);

        assert_eq!(parser.vertex_count(), 3);
        assert_eq!(parser.vertex(0).unwrap().position, [1.0, 2.0, 3.0]);
        assert_eq!(parser.vertex(2).unwrap().position, [7.0, 8.0, 9.0]);
        assert_eq!(parser.face_count(), 1);
    }

    #[test]
    fn test_comment_inside_directive_name_ends_the_line() {
        let parser = parse("o#x\nv 1 1 1\n");
        assert_eq!(parser.object(0).unwrap().name, "");
    }

    #[test]
    fn test_unparsable_numbers_read_as_zero() {
        let parser = parse("v 1.5 abc\nf 1 1 1\n");
        assert_eq!(parser.vertex(0).unwrap().position, [1.5, 0.0, 0.0]);
    }

    #[test]
    fn test_material_directives() {
        let text = "\
newmtl glass
Ka 0.1 0.2 0.3
Kd 0.4 0.5 0.6
Ks 1 1 1
Ns 51
Tr 51
map_Kd textures/glass.png
newmtl tinted
d 0.25
unknown directive
";
        let parser = parse(text);
        assert_eq!(parser.material_count(), 10);

        let glass = parser.material(8).unwrap();
        assert_eq!(glass.ambient, [0.1, 0.2, 0.3, 0.8]);
        assert_eq!(glass.diffuse, [0.4, 0.5, 0.6, 0.8]);
        assert_eq!(glass.specular, [1.0, 1.0, 1.0, 0.8]);
        assert!((glass.shininess - 0.2).abs() < 1e-6);
        assert_eq!(glass.texture_map.as_deref(), Some("textures/glass.png"));

        let tinted = parser.material(9).unwrap();
        assert_eq!(tinted.opacity(), 0.25);
        assert_eq!(tinted.ambient[..3], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_libraries_are_visible_mid_stream() {
        let mut parser = ObjParser::new().unwrap();
        parser.feed(b"mtllib a.mtl  b.mtl\nv 0 0 0\n", false).unwrap();
        assert_eq!(parser.requested_material_libraries(), ["a.mtl", "b.mtl"]);

        parser.feed(b"newmtl from_library\nKd 0 0 1\n", false).unwrap();
        parser.feed(&[], true).unwrap();
        assert_eq!(parser.material(8).unwrap().name, "from_library");
    }

    #[test]
    fn test_every_split_point_gives_identical_records() {
        let bytes = QUADS.as_bytes();
        let whole = parse(QUADS);

        for split in 0..=bytes.len() {
            let mut parser = ObjParser::new().unwrap();
            parser.feed(&bytes[..split], false).unwrap();
            parser.feed(&bytes[split..], true).unwrap();

            let split_records = parser.records().unwrap();
            let whole_records = whole.records().unwrap();
            assert_eq!(split_records.objects(), whole_records.objects());
            assert_eq!(split_records.faces(), whole_records.faces());
            assert_eq!(
                split_records.material_references(),
                whole_records.material_references()
            );
            assert_eq!(parser.vertex_count(), whole.vertex_count());
            for i in 0..whole.vertex_count() {
                assert_eq!(parser.vertex(i), whole.vertex(i));
            }
        }
    }

    #[test]
    fn test_lifecycle_errors() {
        let mut parser = ObjParser::new().unwrap();
        parser.feed(b"v 0 0 0\n", false).unwrap();
        assert_eq!(parser.vertex_count(), 0);
        assert!(parser.object(0).is_none());

        parser.feed(b"", true).unwrap();
        assert!(parser.is_terminal());
        assert!(matches!(parser.feed(b"v", false), Err(MeshError::Finished)));
        assert!(matches!(parser.feed(b"", true), Err(MeshError::Finished)));
    }

    #[test]
    fn test_faces_before_first_object_belong_to_none() {
        let parser = parse("v 0 0 0\nf 1 1 1\no late\nf 1 1 1\n");
        assert_eq!(parser.object_count(), 1);
        assert_eq!(parser.object(0).unwrap().face_range(), 1..2);
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index(Some("3"), 10), 3);
        assert_eq!(resolve_index(Some("-1"), 10), 10);
        assert_eq!(resolve_index(Some("-10"), 10), 1);
        assert_eq!(resolve_index(Some("-11"), 10), 0);
        assert_eq!(resolve_index(Some(""), 10), 0);
        assert_eq!(resolve_index(Some("x"), 10), 0);
        assert_eq!(resolve_index(None, 10), 0);
    }
}
