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

//! Records shared by both parsers and the read-only accessor surface
//!
//! Parsers accumulate [`Object`], [`Material`], [`MaterialReference`] and
//! face records into a [`MeshRecords`] value. Callers read them back through
//! the [`MeshSource`] trait, which has the same shape for every format and
//! only answers once the parser has reached its terminal state. Before that,
//! and for out-of-range indices, accessors return `0` or `None`.

use crate::buffer::GrowableBuffer;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Ambient and diffuse color of a fresh material
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Specular color of a fresh material
pub const DEFAULT_SPECULAR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Shininess of a fresh material
pub const DEFAULT_SHININESS: f32 = 1.0;

/// Outcome of a successful feed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// More bytes are expected
    Pending,
    /// The final call was processed and the parser is terminal
    Complete,
}

/// Named run of faces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    /// Object name
    pub name: String,
    /// First face of the object
    pub face_start: u32,
    /// Number of faces
    pub face_count: u32,
}

impl Object {
    /// Create an object whose range is not known yet
    pub fn new(name: impl Into<String>, face_start: u32) -> Self {
        Object {
            name: name.into(),
            face_start,
            face_count: 0,
        }
    }

    /// Faces covered by this object
    pub fn face_range(&self) -> Range<u32> {
        self.face_start..self.face_start.saturating_add(self.face_count)
    }
}

/// Surface description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Material name
    pub name: String,
    /// Ambient RGBA
    pub ambient: [f32; 4],
    /// Diffuse RGBA
    pub diffuse: [f32; 4],
    /// Specular RGBA
    pub specular: [f32; 4],
    /// Shininess, 0..1 for text files
    pub shininess: f32,
    /// Texture map file name, if any
    pub texture_map: Option<String>,
}

impl Material {
    /// Create a material with the default colors
    pub fn new(name: impl Into<String>) -> Self {
        Material {
            name: name.into(),
            ambient: DEFAULT_COLOR,
            diffuse: DEFAULT_COLOR,
            specular: DEFAULT_SPECULAR,
            shininess: DEFAULT_SHININESS,
            texture_map: None,
        }
    }

    /// Create an opaque material whose ambient and diffuse are `rgb`
    pub fn with_color(name: impl Into<String>, rgb: [f32; 3]) -> Self {
        let color = [rgb[0], rgb[1], rgb[2], 1.0];
        Material {
            ambient: color,
            diffuse: color,
            ..Material::new(name)
        }
    }

    /// Set the alpha of all three colors
    pub fn set_opacity(&mut self, opacity: f32) {
        self.ambient[3] = opacity;
        self.diffuse[3] = opacity;
        self.specular[3] = opacity;
    }

    /// Alpha shared by the three colors
    pub fn opacity(&self) -> f32 {
        self.diffuse[3]
    }
}

/// Assignment of one material to a contiguous run of faces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialReference {
    /// Referenced material name
    pub name: String,
    /// First face of the run
    pub face_start: u32,
    /// Number of faces in the run
    pub face_count: u32,
}

impl MaterialReference {
    /// Faces covered by this reference
    pub fn face_range(&self) -> Range<u32> {
        self.face_start..self.face_start.saturating_add(self.face_count)
    }
}

/// Position, texture coordinate and normal of one output vertex
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex<T = f64> {
    /// Position xyz
    pub position: [T; 3],
    /// Texture coordinate uv
    pub texcoord: [T; 2],
    /// Normal xyz
    pub normal: [T; 3],
}

impl Vertex<f64> {
    /// Single precision copy
    pub fn to_f32(&self) -> Vertex<f32> {
        Vertex {
            position: self.position.map(|c| c as f32),
            texcoord: self.texcoord.map(|c| c as f32),
            normal: self.normal.map(|c| c as f32),
        }
    }
}

/// Collections both parsers accumulate
#[derive(Debug, Default)]
pub struct MeshRecords {
    objects: GrowableBuffer<Object>,
    materials: GrowableBuffer<Material>,
    material_references: GrowableBuffer<MaterialReference>,
    faces: GrowableBuffer<[u32; 3]>,
}

impl MeshRecords {
    /// Objects in declaration order
    pub fn objects(&self) -> &[Object] {
        self.objects.as_slice()
    }

    /// Materials in declaration order
    pub fn materials(&self) -> &[Material] {
        self.materials.as_slice()
    }

    /// Material references in declaration order
    pub fn material_references(&self) -> &[MaterialReference] {
        self.material_references.as_slice()
    }

    /// Triangles as output vertex ids
    pub fn faces(&self) -> &[[u32; 3]] {
        self.faces.as_slice()
    }

    pub(crate) fn face_total(&self) -> u32 {
        self.faces.len() as u32
    }

    pub(crate) fn add_object(&mut self, name: impl Into<String>, face_start: u32) -> Result<()> {
        self.objects.push(Object::new(name, face_start))
    }

    pub(crate) fn has_objects(&self) -> bool {
        !self.objects.is_empty()
    }

    pub(crate) fn last_object_mut(&mut self) -> Option<&mut Object> {
        self.objects.last_mut()
    }

    /// Close the open object so it ends at `face_end`
    pub(crate) fn close_object(&mut self, face_end: u32) {
        if let Some(object) = self.objects.last_mut() {
            object.face_count = face_end.saturating_sub(object.face_start);
        }
    }

    pub(crate) fn add_material(&mut self, material: Material) -> Result<()> {
        self.materials.push(material)
    }

    pub(crate) fn current_material_mut(&mut self) -> Option<&mut Material> {
        self.materials.last_mut()
    }

    pub(crate) fn open_material_reference(
        &mut self,
        name: impl Into<String>,
        face_start: u32,
    ) -> Result<()> {
        self.material_references.push(MaterialReference {
            name: name.into(),
            face_start,
            face_count: 0,
        })
    }

    /// Set the range of the most recently opened reference
    pub(crate) fn set_reference_range(&mut self, face_start: u32, face_count: u32) {
        if let Some(reference) = self.material_references.last_mut() {
            reference.face_start = face_start;
            reference.face_count = face_count;
        }
    }

    pub(crate) fn reserve_faces(&mut self, additional: usize) -> Result<()> {
        self.faces.reserve_exact(additional)
    }

    pub(crate) fn push_face(&mut self, face: [u32; 3]) -> Result<()> {
        self.faces.push(face)
    }

    pub(crate) fn push_reserved_face(&mut self, face: [u32; 3]) -> Result<()> {
        self.faces.push_reserved(face)
    }
}

/// Read-only view of a parsed mesh
///
/// Implementors provide the terminal-gated [`MeshSource::records`] plus the
/// format-specific vertex lookup; everything else is derived.
pub trait MeshSource {
    /// Accumulated records, `None` until the parser is terminal
    fn records(&self) -> Option<&MeshRecords>;

    /// Number of output vertices, 0 until terminal
    fn vertex_count(&self) -> usize;

    /// Output vertex at `index` in double precision
    fn vertex(&self, index: usize) -> Option<Vertex>;

    /// Whether the stream carried normals
    fn has_normals(&self) -> bool;

    /// Whether finalize has run
    fn is_terminal(&self) -> bool {
        self.records().is_some()
    }

    /// Output vertex at `index` in single precision
    fn vertex_f32(&self, index: usize) -> Option<Vertex<f32>> {
        self.vertex(index).map(|vertex| vertex.to_f32())
    }

    /// Number of objects
    fn object_count(&self) -> usize {
        self.records().map_or(0, |records| records.objects().len())
    }

    /// Object at `index`
    fn object(&self, index: usize) -> Option<&Object> {
        self.records()?.objects().get(index)
    }

    /// Number of materials
    fn material_count(&self) -> usize {
        self.records().map_or(0, |records| records.materials().len())
    }

    /// Material at `index`
    fn material(&self, index: usize) -> Option<&Material> {
        self.records()?.materials().get(index)
    }

    /// Number of material references
    fn material_reference_count(&self) -> usize {
        self.records()
            .map_or(0, |records| records.material_references().len())
    }

    /// Material reference at `index`
    fn material_reference(&self, index: usize) -> Option<&MaterialReference> {
        self.records()?.material_references().get(index)
    }

    /// Number of triangles
    fn face_count(&self) -> usize {
        self.records().map_or(0, |records| records.faces().len())
    }

    /// Triangle at `index` as wide indices
    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.records()?.faces().get(index).copied()
    }

    /// Triangle at `index` as 16-bit indices, `None` if one does not fit
    fn face_u16(&self, index: usize) -> Option<[u16; 3]> {
        let [a, b, c] = self.face(index)?;
        Some([
            u16::try_from(a).ok()?,
            u16::try_from(b).ok()?,
            u16::try_from(c).ok()?,
        ])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Fixture {
        records: MeshRecords,
        terminal: bool,
    }

    impl MeshSource for Fixture {
        fn records(&self) -> Option<&MeshRecords> {
            self.terminal.then_some(&self.records)
        }

        fn vertex_count(&self) -> usize {
            0
        }

        fn vertex(&self, _index: usize) -> Option<Vertex> {
            None
        }

        fn has_normals(&self) -> bool {
            false
        }
    }

    fn fixture(terminal: bool) -> Fixture {
        let mut records = MeshRecords::default();
        records.add_object("box", 0).unwrap();
        records.push_face([0, 1, 2]).unwrap();
        records.push_face([0, 70_000, 2]).unwrap();
        records.close_object(2);
        Fixture { records, terminal }
    }

    #[test]
    fn test_material_defaults() {
        let material = Material::new("plain");
        assert_eq!(material.ambient, DEFAULT_COLOR);
        assert_eq!(material.diffuse, DEFAULT_COLOR);
        assert_eq!(material.specular, DEFAULT_SPECULAR);
        assert_eq!(material.shininess, 1.0);
        assert!(material.texture_map.is_none());
    }

    #[test]
    fn test_material_opacity() {
        let mut material = Material::with_color("red", [1.0, 0.0, 0.0]);
        material.set_opacity(0.25);
        assert_eq!(material.ambient, [1.0, 0.0, 0.0, 0.25]);
        assert_eq!(material.specular[3], 0.25);
        assert_eq!(material.opacity(), 0.25);
    }

    #[test]
    fn test_accessors_are_gated_on_terminal_state() {
        let source = fixture(false);
        assert!(!source.is_terminal());
        assert_eq!(source.object_count(), 0);
        assert_eq!(source.face_count(), 0);
        assert!(source.object(0).is_none());
        assert!(source.face(0).is_none());
    }

    #[test]
    fn test_accessors_after_terminal() {
        let source = fixture(true);
        assert_eq!(source.object_count(), 1);
        assert_eq!(source.object(0).unwrap().face_range(), 0..2);
        assert!(source.object(1).is_none());
        assert_eq!(source.face(0), Some([0, 1, 2]));
        assert_eq!(source.face_u16(0), Some([0, 1, 2]));
    }

    #[test]
    fn test_face_ranges_saturate() {
        let reference = MaterialReference {
            name: "edge".to_string(),
            face_start: u32::MAX,
            face_count: 65_535,
        };
        assert_eq!(reference.face_range(), u32::MAX..u32::MAX);

        let mut object = Object::new("edge", u32::MAX - 1);
        object.face_count = 10;
        assert_eq!(object.face_range(), u32::MAX - 1..u32::MAX);
    }

    #[test]
    fn test_face_u16_rejects_wide_indices() {
        let source = fixture(true);
        assert_eq!(source.face(1), Some([0, 70_000, 2]));
        assert_eq!(source.face_u16(1), None);
    }

    #[test]
    fn test_vertex_to_f32() {
        let vertex = Vertex {
            position: [1.5, -2.0, 0.25],
            texcoord: [0.5, 1.0],
            normal: [0.0, 0.0, 1.0],
        };
        let single = vertex.to_f32();
        assert_eq!(single.position, [1.5f32, -2.0, 0.25]);
        assert_eq!(single.normal, [0.0f32, 0.0, 1.0]);
    }
}
