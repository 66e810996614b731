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

//! Consolidated, format-agnostic mesh
//!
//! [`Trimesh::from_source`] copies the records of a terminal parser and
//! interleaves its vertices as `f32` in the order position, texcoord,
//! normal, keeping only the components selected by a [`VertexFormat`].

use crate::error::{MeshError, Result};
use crate::source::{Material, MaterialReference, MeshSource, Object};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Components stored per interleaved vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexFormat {
    /// Position xyz
    pub position: bool,
    /// Texture coordinate uv
    pub texcoord: bool,
    /// Normal xyz
    pub normal: bool,
}

impl VertexFormat {
    /// Positions only
    pub const POSITION: VertexFormat = VertexFormat {
        position: true,
        texcoord: false,
        normal: false,
    };

    /// Every component
    pub const ALL: VertexFormat = VertexFormat {
        position: true,
        texcoord: true,
        normal: true,
    };

    /// Floats per interleaved vertex
    pub fn stride(&self) -> usize {
        let flag = |on: bool, width: usize| if on { width } else { 0 };
        flag(self.position, 3) + flag(self.texcoord, 2) + flag(self.normal, 3)
    }
}

impl Default for VertexFormat {
    fn default() -> Self {
        VertexFormat::ALL
    }
}

impl FromStr for VertexFormat {
    type Err = MeshError;

    /// Parse a component list such as `ptn` or `p,n`
    fn from_str(s: &str) -> Result<Self> {
        let mut format = VertexFormat {
            position: false,
            texcoord: false,
            normal: false,
        };
        for c in s.chars().filter(|c| !matches!(c, ',' | ' ')) {
            match c.to_ascii_lowercase() {
                'p' => format.position = true,
                't' => format.texcoord = true,
                'n' => format.normal = true,
                other => {
                    return Err(MeshError::unsupported_format(format!(
                        "unknown vertex component '{}'",
                        other
                    )));
                }
            }
        }
        Ok(format)
    }
}

/// Axis-aligned bounds of the vertex positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest xyz
    pub min: [f32; 3],
    /// Largest xyz
    pub max: [f32; 3],
}

impl Bounds {
    fn expand(&mut self, point: [f32; 3]) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(point[axis]);
            self.max[axis] = self.max[axis].max(point[axis]);
        }
    }

    /// Extent along each axis
    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// Mesh assembled from a terminal parser
#[derive(Debug, Clone, PartialEq)]
pub struct Trimesh {
    objects: Vec<Object>,
    materials: Vec<Material>,
    material_references: Vec<MaterialReference>,
    faces: Vec<[u32; 3]>,
    vertices: Vec<f32>,
    vertex_count: usize,
    vertex_format: VertexFormat,
    has_normals: bool,
    bounds: Option<Bounds>,
}

impl Trimesh {
    /// Copy everything out of `source`
    ///
    /// Fails with [`MeshError::NotTerminal`] unless the source has seen its
    /// final feed call.
    pub fn from_source<S>(source: &S, vertex_format: VertexFormat) -> Result<Self>
    where
        S: MeshSource + ?Sized,
    {
        let records = source.records().ok_or(MeshError::NotTerminal)?;

        let vertex_count = source.vertex_count();
        let stride = vertex_format.stride();
        let mut vertices = Vec::new();
        let requested = vertex_count.saturating_mul(stride);
        vertices
            .try_reserve_exact(requested)
            .map_err(|_| MeshError::Allocation { requested })?;

        let mut bounds: Option<Bounds> = None;
        for vertex in (0..vertex_count).filter_map(|i| source.vertex_f32(i)) {
            if vertex_format.position {
                vertices.extend_from_slice(&vertex.position);
            }
            if vertex_format.texcoord {
                vertices.extend_from_slice(&vertex.texcoord);
            }
            if vertex_format.normal {
                vertices.extend_from_slice(&vertex.normal);
            }

            match bounds.as_mut() {
                Some(bounds) => bounds.expand(vertex.position),
                None => {
                    bounds = Some(Bounds {
                        min: vertex.position,
                        max: vertex.position,
                    })
                }
            }
        }

        Ok(Trimesh {
            objects: records.objects().to_vec(),
            materials: records.materials().to_vec(),
            material_references: records.material_references().to_vec(),
            faces: records.faces().to_vec(),
            vertices,
            vertex_count,
            vertex_format,
            has_normals: source.has_normals(),
            bounds,
        })
    }

    /// Selected vertex layout
    pub fn vertex_format(&self) -> VertexFormat {
        self.vertex_format
    }

    /// Floats per vertex
    pub fn vertex_stride(&self) -> usize {
        self.vertex_format.stride()
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Interleaved floats of vertex `index`
    pub fn vertex(&self, index: usize) -> Option<&[f32]> {
        if index >= self.vertex_count {
            return None;
        }
        let stride = self.vertex_stride();
        let start = index.checked_mul(stride)?;
        self.vertices.get(start..start.checked_add(stride)?)
    }

    /// All interleaved vertex data
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Triangles
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Objects
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Materials
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Material references
    pub fn material_references(&self) -> &[MaterialReference] {
        &self.material_references
    }

    /// Whether the source carried normals
    pub fn has_normals(&self) -> bool {
        self.has_normals
    }

    /// Position bounds, `None` for a mesh without vertices
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Counts and names, labelled with `source`
    pub fn summary(&self, source: impl Into<String>) -> TrimeshSummary {
        TrimeshSummary {
            source: source.into(),
            objects: self.objects.len(),
            vertices: self.vertex_count,
            faces: self.faces.len(),
            materials: self.materials.len(),
            object_names: self.objects.iter().map(|o| o.name.clone()).collect(),
            material_names: self.materials.iter().map(|m| m.name.clone()).collect(),
            bounds: self.bounds,
        }
    }
}

/// Serializable overview of a [`Trimesh`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimeshSummary {
    /// Where the mesh came from
    pub source: String,
    /// Number of objects
    pub objects: usize,
    /// Number of vertices
    pub vertices: usize,
    /// Number of triangles
    pub faces: usize,
    /// Number of materials
    pub materials: usize,
    /// Object names in order
    pub object_names: Vec<String>,
    /// Material names in order
    pub material_names: Vec<String>,
    /// Position bounds
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bounds: Option<Bounds>,
}

impl fmt::Display for TrimeshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objects: {}", self.objects)?;
        writeln!(f, "Vertices: {}", self.vertices)?;
        writeln!(f, "Faces: {}", self.faces)?;
        write!(f, "Materials: {}", self.materials)
    }
}
