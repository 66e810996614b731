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

//! Incremental 3DS parser
//!
//! [`TdsParser`] consumes a 3DS byte stream in pieces of any size, down to
//! one byte per [`TdsParser::feed`] call. Container chunks fall straight
//! through to their children, so no nesting stack is kept; data chunks are
//! decoded by a field reader and everything else is skipped by its declared
//! payload length.
//!
//! # Examples
//!
//! ```
//! use trimesh_parser::{FeedStatus, MeshSource, TdsParser};
//!
//! let mut parser = TdsParser::new();
//! // an empty main chunk
//! let status = parser.feed(&[0x4D, 0x4D, 6, 0, 0, 0], true)?;
//!
//! assert_eq!(status, FeedStatus::Complete);
//! assert_eq!(parser.object_count(), 0);
//! # Ok::<(), trimesh_parser::MeshError>(())
//! ```

use crate::buffer::GrowableBuffer;
use crate::chunk::{
    decode_color, decode_scalar, handler_for, read_f32_le, read_u16_le, read_u32_le,
    ChunkHandler, ColorSlot, ScalarSlot, HEADER_LEN,
};
use crate::error::{MeshError, Result};
use crate::source::{FeedStatus, Material, MeshRecords, MeshSource, Vertex};
use tracing::{debug, trace, warn};

/// Largest property payload that is buffered before decoding
pub const MAX_PROPERTY_LEN: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayKind {
    Points,
    Texcoords,
    Faces,
}

impl ArrayKind {
    fn record_len(self) -> u32 {
        match self {
            ArrayKind::Points => 12,
            ArrayKind::Texcoords => 8,
            // three indices and a flags word
            ArrayKind::Faces => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameTarget {
    Object,
    Material,
    MaterialGroup,
    MapName,
}

/// What the next input byte belongs to; `remaining` counts payload bytes
/// left in the current chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Header,
    Skip { remaining: u32 },
    Name { target: NameTarget, remaining: u32 },
    Count { kind: ArrayKind, remaining: u32 },
    Records { kind: ArrayKind, left: u32, remaining: u32 },
    GroupCount { remaining: u32 },
    Property { handler: ChunkHandler, remaining: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    Terminal,
    Failed,
}

/// Short-lived decoding position
#[derive(Debug)]
struct Cursor {
    stage: Stage,
    scratch: Vec<u8>,
    offset: u64,
    /// Vertices committed before the current point array
    point_base: u32,
    /// Faces already covered by material groups
    assigned_faces: u32,
    /// A face array sized the open object and is still being read
    open_face_array: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor {
            stage: Stage::Header,
            scratch: Vec::with_capacity(HEADER_LEN as usize),
            offset: 0,
            point_base: 0,
            assigned_faces: 0,
            open_face_array: false,
        }
    }
}

/// Streaming 3DS parser
#[derive(Debug)]
pub struct TdsParser {
    cursor: Cursor,
    records: MeshRecords,
    positions: GrowableBuffer<[f32; 3]>,
    texcoords: GrowableBuffer<[f32; 2]>,
    phase: Phase,
    truncated: bool,
}

impl TdsParser {
    /// Create a parser expecting the first chunk header
    pub fn new() -> Self {
        TdsParser {
            cursor: Cursor::default(),
            records: MeshRecords::default(),
            positions: GrowableBuffer::new(),
            texcoords: GrowableBuffer::new(),
            phase: Phase::Active,
            truncated: false,
        }
    }

    /// Push the next piece of the stream; `is_final` marks the last piece
    ///
    /// An error from a malformed chunk or a failed allocation leaves the
    /// parser failed: later calls return [`MeshError::Aborted`] and the
    /// accessors stay empty.
    pub fn feed(&mut self, bytes: &[u8], is_final: bool) -> Result<FeedStatus> {
        match self.phase {
            Phase::Terminal => return Err(MeshError::Finished),
            Phase::Failed => return Err(MeshError::Aborted),
            Phase::Active => {}
        }

        if let Err(err) = self.consume(bytes) {
            if err.is_fatal() {
                warn!("3DS parse abandoned: {}", err);
                self.phase = Phase::Failed;
            }
            return Err(err);
        }

        if is_final {
            self.finalize();
            Ok(FeedStatus::Complete)
        } else {
            Ok(FeedStatus::Pending)
        }
    }

    /// Whether the stream ended inside a chunk
    pub fn truncated(&self) -> bool {
        self.truncated
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
        let mut pos = 0;
        while pos < bytes.len() {
            let used = self.step(&bytes[pos..])?;
            pos += used;
            self.cursor.offset += used as u64;
        }
        // zero-payload stages left behind by the last byte
        self.settle()
    }

    /// Resolve stages that need no input before the next byte arrives
    fn settle(&mut self) -> Result<()> {
        while self.stage_is_exhausted() {
            self.step(&[])?;
        }
        Ok(())
    }

    fn stage_is_exhausted(&self) -> bool {
        match self.cursor.stage {
            Stage::Header => false,
            Stage::Skip { remaining } => remaining == 0,
            Stage::Name { remaining, .. } => remaining == 0,
            Stage::Count { remaining, .. } => remaining < 2,
            Stage::Records {
                kind,
                left,
                remaining,
            } => left == 0 || remaining < kind.record_len(),
            Stage::GroupCount { remaining } => remaining < 2,
            Stage::Property { remaining, .. } => remaining as usize <= self.cursor.scratch.len(),
        }
    }

    /// Advance by at most one field and report the bytes taken
    fn step(&mut self, input: &[u8]) -> Result<usize> {
        match self.cursor.stage {
            Stage::Header => self.read_header(input),
            Stage::Skip { remaining } => {
                let used = (remaining as usize).min(input.len());
                let remaining = remaining - used as u32;
                self.cursor.stage = if remaining == 0 {
                    Stage::Header
                } else {
                    Stage::Skip { remaining }
                };
                Ok(used)
            }
            Stage::Name { target, remaining } => self.read_name(input, target, remaining),
            Stage::Count { kind, remaining } => self.read_count(input, kind, remaining),
            Stage::Records {
                kind,
                left,
                remaining,
            } => self.read_record(input, kind, left, remaining),
            Stage::GroupCount { remaining } => self.read_group_count(input, remaining),
            Stage::Property { handler, remaining } => {
                self.read_property(input, handler, remaining)
            }
        }
    }

    /// Copy input into scratch until it holds `need` bytes
    fn fill(&mut self, input: &[u8], need: usize) -> (usize, bool) {
        let missing = need.saturating_sub(self.cursor.scratch.len());
        let used = missing.min(input.len());
        self.cursor.scratch.extend_from_slice(&input[..used]);
        (used, self.cursor.scratch.len() >= need)
    }

    fn read_header(&mut self, input: &[u8]) -> Result<usize> {
        let (used, full) = self.fill(input, HEADER_LEN as usize);
        if !full {
            return Ok(used);
        }

        let id = read_u16_le(&self.cursor.scratch).unwrap_or_default();
        let length = self
            .cursor
            .scratch
            .get(2..)
            .and_then(read_u32_le)
            .unwrap_or_default();
        self.cursor.scratch.clear();

        let start = self.cursor.offset + used as u64 - u64::from(HEADER_LEN);
        if length < HEADER_LEN {
            return Err(MeshError::stream(
                start,
                format!("chunk {:#06x} declares length {} below its header", id, length),
            ));
        }

        let payload = length - HEADER_LEN;
        let handler = handler_for(id);
        trace!(
            "chunk {:#06x} at byte {}: {} payload bytes, {:?}",
            id,
            start,
            payload,
            handler
        );

        self.cursor.stage = match handler {
            ChunkHandler::Container => Stage::Header,
            ChunkHandler::Skip => Stage::Skip { remaining: payload },
            ChunkHandler::ObjectName => Stage::Name {
                target: NameTarget::Object,
                remaining: payload,
            },
            ChunkHandler::MaterialName => Stage::Name {
                target: NameTarget::Material,
                remaining: payload,
            },
            ChunkHandler::MaterialGroup => Stage::Name {
                target: NameTarget::MaterialGroup,
                remaining: payload,
            },
            ChunkHandler::MapName => Stage::Name {
                target: NameTarget::MapName,
                remaining: payload,
            },
            ChunkHandler::PointArray => Stage::Count {
                kind: ArrayKind::Points,
                remaining: payload,
            },
            ChunkHandler::TexcoordArray => Stage::Count {
                kind: ArrayKind::Texcoords,
                remaining: payload,
            },
            ChunkHandler::FaceArray => Stage::Count {
                kind: ArrayKind::Faces,
                remaining: payload,
            },
            ChunkHandler::Color(_) | ChunkHandler::Scalar(_) if payload > MAX_PROPERTY_LEN => {
                warn!(
                    "skipping oversized property chunk {:#06x} at byte {} ({} bytes)",
                    id, start, payload
                );
                Stage::Skip { remaining: payload }
            }
            ChunkHandler::Color(_) | ChunkHandler::Scalar(_) => Stage::Property {
                handler,
                remaining: payload,
            },
        };
        Ok(used)
    }

    fn read_name(&mut self, input: &[u8], target: NameTarget, remaining: u32) -> Result<usize> {
        let window = &input[..(remaining as usize).min(input.len())];
        let (used, terminated) = match window.iter().position(|&b| b == 0) {
            Some(nul) => {
                self.cursor.scratch.extend_from_slice(&window[..nul]);
                (nul + 1, true)
            }
            None => {
                self.cursor.scratch.extend_from_slice(window);
                (window.len(), false)
            }
        };
        let remaining = remaining - used as u32;

        if !terminated && remaining > 0 {
            self.cursor.stage = Stage::Name { target, remaining };
            return Ok(used);
        }
        if !terminated {
            warn!("name field ran to the end of its chunk without a terminator");
        }

        let name = String::from_utf8_lossy(&self.cursor.scratch).into_owned();
        self.cursor.scratch.clear();
        self.finish_name(target, name, remaining)?;
        Ok(used)
    }

    fn finish_name(&mut self, target: NameTarget, name: String, remaining: u32) -> Result<()> {
        match target {
            NameTarget::Object => {
                debug!("object '{}'", name);
                self.records.add_object(name, self.records.face_total())?;
                // children follow inside the object chunk
                self.cursor.stage = Stage::Header;
            }
            NameTarget::Material => {
                debug!("material '{}'", name);
                self.records.add_material(Material::new(name))?;
                self.cursor.stage = Self::skip_rest(remaining);
            }
            NameTarget::MapName => {
                match self.records.current_material_mut() {
                    Some(material) => material.texture_map = Some(name),
                    None => warn!("map name '{}' outside any material", name),
                }
                self.cursor.stage = Self::skip_rest(remaining);
            }
            NameTarget::MaterialGroup => {
                self.records.open_material_reference(name, self.cursor.assigned_faces)?;
                self.cursor.stage = Stage::GroupCount { remaining };
            }
        }
        Ok(())
    }

    fn read_group_count(&mut self, input: &[u8], remaining: u32) -> Result<usize> {
        if remaining < 2 {
            warn!("material group without a face count");
            self.cursor.scratch.clear();
            self.cursor.stage = Self::skip_rest(remaining);
            return Ok(0);
        }

        let (used, full) = self.fill(input, 2);
        if !full {
            return Ok(used);
        }
        let count = u32::from(read_u16_le(&self.cursor.scratch).unwrap_or_default());
        self.cursor.scratch.clear();

        let start = self.cursor.assigned_faces;
        let count = if count > u32::MAX - start {
            warn!("material group at face {} overruns the face id range", start);
            u32::MAX - start
        } else {
            count
        };
        self.records.set_reference_range(start, count);
        self.cursor.assigned_faces = start + count;
        trace!("material group covers faces {}..{}", start, self.cursor.assigned_faces);

        // the face id list is not needed
        self.cursor.stage = Self::skip_rest(remaining - 2);
        Ok(used)
    }

    fn read_count(&mut self, input: &[u8], kind: ArrayKind, remaining: u32) -> Result<usize> {
        if remaining < 2 {
            warn!("{:?} array without a record count", kind);
            self.cursor.scratch.clear();
            self.cursor.stage = Self::skip_rest(remaining);
            return Ok(0);
        }

        let (used, full) = self.fill(input, 2);
        if !full {
            return Ok(used);
        }
        let count = read_u16_le(&self.cursor.scratch).unwrap_or_default();
        self.cursor.scratch.clear();
        let records = usize::from(count);

        match kind {
            ArrayKind::Points => {
                self.cursor.point_base = self.positions.len() as u32;
                self.positions.reserve_exact(records)?;
            }
            ArrayKind::Texcoords => self.texcoords.reserve_exact(records)?,
            ArrayKind::Faces => {
                let face_start = self.records.face_total();
                match self.records.last_object_mut() {
                    Some(object) => {
                        object.face_start = face_start;
                        object.face_count = u32::from(count);
                        self.cursor.open_face_array = true;
                    }
                    None => warn!("face array outside any object"),
                }
                self.records.reserve_faces(records)?;
            }
        }
        debug!("{:?} array of {} records", kind, count);

        self.cursor.stage = Stage::Records {
            kind,
            left: u32::from(count),
            remaining: remaining - 2,
        };
        Ok(used)
    }

    fn read_record(
        &mut self,
        input: &[u8],
        kind: ArrayKind,
        left: u32,
        remaining: u32,
    ) -> Result<usize> {
        let record_len = kind.record_len();
        if left == 0 {
            self.finish_array(kind, remaining);
            return Ok(0);
        }
        if remaining < record_len {
            warn!(
                "{:?} array declares {} more records than its chunk holds",
                kind, left
            );
            self.cursor.scratch.clear();
            self.abandon_array(kind);
            self.cursor.stage = Self::skip_rest(remaining);
            return Ok(0);
        }

        let (used, full) = self.fill(input, record_len as usize);
        if !full {
            return Ok(used);
        }

        let field = |at: usize| {
            self.cursor
                .scratch
                .get(at..)
                .and_then(read_f32_le)
                .unwrap_or_default()
        };
        match kind {
            ArrayKind::Points => {
                let point = [field(0), field(4), field(8)];
                self.positions.push_reserved(point)?;
            }
            ArrayKind::Texcoords => {
                let uv = [field(0), field(4)];
                self.texcoords.push_reserved(uv)?;
            }
            ArrayKind::Faces => {
                let base = self.cursor.point_base;
                let index = |at: usize| {
                    let local = self
                        .cursor
                        .scratch
                        .get(at..)
                        .and_then(read_u16_le)
                        .unwrap_or_default();
                    base.saturating_add(u32::from(local))
                };
                let face = [index(0), index(2), index(4)];
                self.records.push_reserved_face(face)?;
            }
        }
        self.cursor.scratch.clear();

        let left = left - 1;
        let remaining = remaining - record_len;
        if left == 0 {
            self.finish_array(kind, remaining);
        } else {
            self.cursor.stage = Stage::Records {
                kind,
                left,
                remaining,
            };
        }
        Ok(used)
    }

    fn finish_array(&mut self, kind: ArrayKind, remaining: u32) {
        self.cursor.stage = match kind {
            ArrayKind::Faces => {
                self.cursor.open_face_array = false;
                // material groups and smoothing follow as children
                Stage::Header
            }
            ArrayKind::Points | ArrayKind::Texcoords => Self::skip_rest(remaining),
        };
    }

    /// Shrink the open object to the faces actually read
    fn abandon_array(&mut self, kind: ArrayKind) {
        if kind == ArrayKind::Faces && self.cursor.open_face_array {
            self.records.close_object(self.records.face_total());
            self.cursor.open_face_array = false;
        }
    }

    fn read_property(
        &mut self,
        input: &[u8],
        handler: ChunkHandler,
        remaining: u32,
    ) -> Result<usize> {
        let (used, full) = self.fill(input, remaining as usize);
        if !full {
            return Ok(used);
        }

        let payload = std::mem::take(&mut self.cursor.scratch);
        self.apply_property(handler, &payload);
        self.cursor.scratch = payload;
        self.cursor.scratch.clear();
        self.cursor.stage = Stage::Header;
        Ok(used)
    }

    fn apply_property(&mut self, handler: ChunkHandler, payload: &[u8]) {
        let Some(material) = self.records.current_material_mut() else {
            warn!("{:?} property outside any material", handler);
            return;
        };

        match handler {
            ChunkHandler::Color(slot) => {
                let Some(rgb) = decode_color(payload) else {
                    warn!("abandoning {:?} color: unknown tag or short payload", slot);
                    return;
                };
                let target = match slot {
                    ColorSlot::Ambient => &mut material.ambient,
                    ColorSlot::Diffuse => &mut material.diffuse,
                    ColorSlot::Specular => &mut material.specular,
                };
                target[..3].copy_from_slice(&rgb);
            }
            ChunkHandler::Scalar(slot) => {
                let Some(value) = decode_scalar(payload) else {
                    warn!("abandoning {:?} value: unknown tag or short payload", slot);
                    return;
                };
                match slot {
                    ScalarSlot::Shininess => material.shininess = value,
                    ScalarSlot::Transparency => material.set_opacity(1.0 - value),
                }
            }
            _ => {}
        }
    }

    fn skip_rest(remaining: u32) -> Stage {
        if remaining == 0 {
            Stage::Header
        } else {
            Stage::Skip { remaining }
        }
    }

    fn finalize(&mut self) {
        let clean = self.cursor.stage == Stage::Header && self.cursor.scratch.is_empty();
        if !clean {
            self.truncated = true;
            warn!(
                "3DS stream ended inside a chunk at byte {} ({:?})",
                self.cursor.offset, self.cursor.stage
            );
            if let Stage::Records { kind, .. } = self.cursor.stage {
                self.abandon_array(kind);
            }
            self.cursor.scratch.clear();
        }
        self.cursor.stage = Stage::Header;
        self.phase = Phase::Terminal;

        debug!(
            "3DS parse complete: objects={}, vertices={}, faces={}, materials={}",
            self.records.objects().len(),
            self.positions.len(),
            self.records.face_total(),
            self.records.materials().len()
        );
    }
}

impl Default for TdsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshSource for TdsParser {
    fn records(&self) -> Option<&MeshRecords> {
        (self.phase == Phase::Terminal).then_some(&self.records)
    }

    fn vertex_count(&self) -> usize {
        if self.is_terminal() {
            self.positions.len()
        } else {
            0
        }
    }

    fn vertex(&self, index: usize) -> Option<Vertex> {
        self.records()?;
        let position = self.positions.get(index).copied()?;
        let texcoord = self.texcoords.get(index).copied().unwrap_or_default();
        Some(Vertex {
            position: position.map(f64::from),
            texcoord: texcoord.map(f64::from),
            normal: [0.0; 3],
        })
    }

    fn has_normals(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn chunk(id: u16, payload: &[u8]) -> Vec<u8> {
        let mut bytes = id.to_le_bytes().to_vec();
        bytes.extend_from_slice(&(payload.len() as u32 + 6).to_le_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    fn cstr(name: &str) -> Vec<u8> {
        let mut bytes = name.as_bytes().to_vec();
        bytes.push(0);
        bytes
    }

    fn points(points: &[[f32; 3]]) -> Vec<u8> {
        let mut payload = (points.len() as u16).to_le_bytes().to_vec();
        for point in points {
            for c in point {
                payload.extend_from_slice(&c.to_le_bytes());
            }
        }
        chunk(0x4110, &payload)
    }

    fn faces(faces: &[[u16; 3]], children: &[u8]) -> Vec<u8> {
        let mut payload = (faces.len() as u16).to_le_bytes().to_vec();
        for face in faces {
            for i in face {
                payload.extend_from_slice(&i.to_le_bytes());
            }
            payload.extend_from_slice(&0u16.to_le_bytes());
        }
        payload.extend_from_slice(children);
        chunk(0x4120, &payload)
    }

    fn material_group(name: &str, ids: &[u16]) -> Vec<u8> {
        let mut payload = cstr(name);
        payload.extend_from_slice(&(ids.len() as u16).to_le_bytes());
        for id in ids {
            payload.extend_from_slice(&id.to_le_bytes());
        }
        chunk(0x4130, &payload)
    }

    fn object(name: &str, mesh: &[u8]) -> Vec<u8> {
        let mut payload = cstr(name);
        payload.extend_from_slice(&chunk(0x4100, mesh));
        chunk(0x4000, &payload)
    }

    fn triangle_object(name: &str, group: &str) -> Vec<u8> {
        let mut mesh = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        mesh.extend(faces(&[[0, 1, 2]], &material_group(group, &[0])));
        object(name, &mesh)
    }

    fn sample() -> Vec<u8> {
        let mut material = chunk(0xA000, &cstr("red"));
        material.extend(chunk(0xA020, &chunk(0x0011, &[255, 0, 0])));
        material.extend(chunk(0xA040, &chunk(0x0030, &50u16.to_le_bytes())));
        material.extend(chunk(0xA050, &chunk(0x0030, &25u16.to_le_bytes())));

        let mut editor = chunk(0xAFFF, &material);
        editor.extend(triangle_object("first", "red"));
        editor.extend(chunk(0x4150, &[1, 2, 3, 4]));
        editor.extend(triangle_object("second", "red"));
        chunk(0x4D4D, &chunk(0x3D3D, &editor))
    }

    fn parse(bytes: &[u8]) -> TdsParser {
        let mut parser = TdsParser::new();
        assert_eq!(parser.feed(bytes, true).unwrap(), FeedStatus::Complete);
        parser
    }

    #[test]
    fn test_sample_records() {
        let parser = parse(&sample());
        assert!(!parser.truncated());

        assert_eq!(parser.object_count(), 2);
        assert_eq!(parser.object(0).unwrap().name, "first");
        assert_eq!(parser.object(1).unwrap().face_range(), 1..2);

        assert_eq!(parser.vertex_count(), 6);
        assert_eq!(parser.face_count(), 2);
        assert_eq!(parser.face(0), Some([0, 1, 2]));
        // indices of the second object are offset past the first point array
        assert_eq!(parser.face(1), Some([3, 4, 5]));
        assert_eq!(parser.vertex(4).unwrap().position, [1.0, 0.0, 0.0]);
        assert!(!parser.has_normals());

        let red = parser.material(0).unwrap();
        assert_eq!(red.name, "red");
        assert_eq!(red.diffuse, [1.0, 0.0, 0.0, 0.75]);
        assert_eq!(red.shininess, 0.5);
        assert_eq!(red.ambient[3], 0.75);

        assert_eq!(parser.material_reference_count(), 2);
        assert_eq!(parser.material_reference(0).unwrap().face_range(), 0..1);
        assert_eq!(parser.material_reference(1).unwrap().face_range(), 1..2);
    }

    #[test]
    fn test_every_split_point_gives_identical_records() {
        let bytes = sample();
        let whole = parse(&bytes);

        for split in 0..=bytes.len() {
            let mut parser = TdsParser::new();
            parser.feed(&bytes[..split], false).unwrap();
            parser.feed(&bytes[split..], true).unwrap();

            let split_records = parser.records().unwrap();
            let whole_records = whole.records().unwrap();
            assert_eq!(split_records.objects(), whole_records.objects());
            assert_eq!(split_records.faces(), whole_records.faces());
            assert_eq!(split_records.materials(), whole_records.materials());
            assert_eq!(
                split_records.material_references(),
                whole_records.material_references()
            );
            assert_eq!(parser.vertex_count(), whole.vertex_count());
        }
    }

    #[test]
    fn test_one_byte_per_call() {
        let bytes = sample();
        let mut parser = TdsParser::new();
        for byte in &bytes {
            let status = parser.feed(std::slice::from_ref(byte), false).unwrap();
            assert_eq!(status, FeedStatus::Pending);
        }
        parser.feed(&[], true).unwrap();

        assert_eq!(parser.face_count(), 2);
        assert_eq!(parser.bytes_consumed(), bytes.len() as u64);
    }

    #[test]
    fn test_unknown_and_empty_chunks_are_skipped_exactly() {
        let mut editor = chunk(0xB000, &[0xFF; 17]);
        editor.extend(chunk(0x4160, &[0u8; 48]));
        editor.extend(chunk(0x1234, &[]));
        editor.extend(chunk(0x4111, &[]));
        editor.extend(triangle_object("after", "none"));
        let parser = parse(&chunk(0x4D4D, &chunk(0x3D3D, &editor)));

        assert!(!parser.truncated());
        assert_eq!(parser.object_count(), 1);
        assert_eq!(parser.object(0).unwrap().name, "after");
        assert_eq!(parser.face(0), Some([0, 1, 2]));
    }

    #[test]
    fn test_texcoords_attach_by_point_index() {
        let mut mesh = points(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let mut uv = 1u16.to_le_bytes().to_vec();
        uv.extend_from_slice(&0.5f32.to_le_bytes());
        uv.extend_from_slice(&0.25f32.to_le_bytes());
        mesh.extend(chunk(0x4140, &uv));
        let parser = parse(&object("uv", &mesh));

        assert_eq!(parser.vertex(0).unwrap().texcoord, [0.5, 0.25]);
        assert_eq!(parser.vertex(1).unwrap().texcoord, [0.0, 0.0]);
        assert_eq!(parser.vertex_f32(1).unwrap().position, [4.0, 5.0, 6.0]);
        assert!(parser.vertex(2).is_none());
    }

    #[test]
    fn test_short_chunk_length_is_fatal() {
        let mut parser = TdsParser::new();
        let mut bytes = chunk(0x4D4D, &[]);
        bytes.extend_from_slice(&[0x00, 0xB0, 3, 0, 0, 0]);

        let err = parser.feed(&bytes, false).unwrap_err();
        match err {
            MeshError::Stream { offset, .. } => assert_eq!(offset, 6),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(parser.is_failed());
        assert!(matches!(parser.feed(&[], true), Err(MeshError::Aborted)));
        assert_eq!(parser.object_count(), 0);
    }

    #[test]
    fn test_feed_after_completion_is_rejected() {
        let mut parser = parse(&chunk(0x4D4D, &[]));
        assert!(matches!(parser.feed(&[0], false), Err(MeshError::Finished)));
        assert!(parser.is_terminal());
    }

    #[test]
    fn test_accessors_are_empty_before_final_call() {
        let bytes = sample();
        let mut parser = TdsParser::new();
        parser.feed(&bytes, false).unwrap();

        assert_eq!(parser.object_count(), 0);
        assert_eq!(parser.vertex_count(), 0);
        assert!(parser.vertex(0).is_none());
        assert!(parser.face(0).is_none());
    }

    #[test]
    fn test_truncated_stream_keeps_complete_records() {
        let bytes = sample();
        // cut inside the second object's face record
        let cut = bytes.len() - material_group("red", &[0]).len() - 3;
        let mut parser = TdsParser::new();
        parser.feed(&bytes[..cut], true).unwrap();

        assert!(parser.truncated());
        assert_eq!(parser.object_count(), 2);
        assert_eq!(parser.face_count(), 1);
        assert_eq!(parser.object(1).unwrap().face_count, 0);
        assert_eq!(parser.vertex_count(), 6);
    }

    #[test]
    fn test_bad_property_tag_is_abandoned() {
        let mut material = chunk(0xA000, &cstr("odd"));
        material.extend(chunk(0xA010, &chunk(0x0042, &[1, 2, 3])));
        material.extend(chunk(0xA030, &chunk(0x0011, &[0, 0])));
        material.extend(chunk(0xA020, &chunk(0x0011, &[0, 255, 0])));
        let parser = parse(&chunk(0xAFFF, &material));

        let odd = parser.material(0).unwrap();
        assert_eq!(odd.ambient, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(odd.specular, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(odd.diffuse, [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_map_name_sets_texture() {
        let mut material = chunk(0xA000, &cstr("wood"));
        material.extend(chunk(0xA200, &chunk(0xA300, &cstr("wood.png"))));
        let parser = parse(&chunk(0xAFFF, &material));

        let wood = parser.material(0).unwrap();
        assert_eq!(wood.texture_map.as_deref(), Some("wood.png"));
    }

    #[test]
    fn test_oversized_face_count_is_abandoned() {
        // declares two faces but only carries one
        let mut payload = 2u16.to_le_bytes().to_vec();
        payload.extend_from_slice(&[0, 0, 1, 0, 2, 0, 0, 0]);
        let mut mesh = points(&[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        mesh.extend(chunk(0x4120, &payload));
        let parser = parse(&object("short", &mesh));

        assert!(!parser.truncated());
        assert_eq!(parser.face_count(), 1);
        assert_eq!(parser.object(0).unwrap().face_count, 1);
    }

    #[test]
    fn test_material_groups_stop_at_face_id_limit() {
        // each group claims 65535 faces; together they exceed u32::MAX
        let mut payload = cstr("a");
        payload.extend_from_slice(&u16::MAX.to_le_bytes());
        let group = chunk(0x4130, &payload);
        let bytes = group.repeat(65_540);
        let parser = parse(&bytes);

        assert_eq!(parser.material_reference_count(), 65_540);
        let full = parser.material_reference(65_536).unwrap();
        assert_eq!(full.face_range().end, u32::MAX);
        let last = parser.material_reference(65_539).unwrap();
        assert_eq!(last.face_start, u32::MAX);
        assert_eq!(last.face_count, 0);
        assert_eq!(last.face_range(), u32::MAX..u32::MAX);
    }
}
