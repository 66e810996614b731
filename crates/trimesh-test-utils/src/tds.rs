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

//! In-memory 3DS writer
//!
//! Every helper returns a complete chunk (id, length, payload) so fixtures
//! compose by concatenation:
//!
//! ```
//! use trimesh_test_utils::tds;
//!
//! let mesh = tds::tri_mesh(&[
//!     tds::point_array(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
//!     tds::face_array(&[[0, 1, 2]], &[]),
//! ]);
//! let file = tds::main(&[tds::editor(&[tds::object("tri", &[mesh])])]);
//! assert_eq!(&file[..2], &[0x4D, 0x4D]);
//! ```

/// Main chunk id
pub const MAIN: u16 = 0x4D4D;
/// Editor chunk id
pub const EDITOR: u16 = 0x3D3D;
/// Object chunk id
pub const OBJECT: u16 = 0x4000;
/// Triangle mesh chunk id
pub const TRI_MESH: u16 = 0x4100;
/// Point array chunk id
pub const POINT_ARRAY: u16 = 0x4110;
/// Face array chunk id
pub const FACE_ARRAY: u16 = 0x4120;
/// Material group chunk id
pub const MATERIAL_GROUP: u16 = 0x4130;
/// Texcoord array chunk id
pub const TEXCOORD_ARRAY: u16 = 0x4140;
/// Smooth group chunk id
pub const SMOOTH_GROUP: u16 = 0x4150;
/// Mesh matrix chunk id
pub const MESH_MATRIX: u16 = 0x4160;
/// Material block chunk id
pub const MATERIAL: u16 = 0xAFFF;
/// Material name chunk id
pub const MATERIAL_NAME: u16 = 0xA000;
/// Ambient color chunk id
pub const AMBIENT: u16 = 0xA010;
/// Diffuse color chunk id
pub const DIFFUSE: u16 = 0xA020;
/// Specular color chunk id
pub const SPECULAR: u16 = 0xA030;
/// Shininess chunk id
pub const SHININESS: u16 = 0xA040;
/// Transparency chunk id
pub const TRANSPARENCY: u16 = 0xA050;
/// Texture map chunk id
pub const TEXTURE_MAP: u16 = 0xA200;
/// Map file name chunk id
pub const MAP_NAME: u16 = 0xA300;

/// Sequence of chunks written back to back
#[derive(Debug, Clone, Default)]
pub struct TdsBuilder {
    bytes: Vec<u8>,
}

impl TdsBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk with the given payload
    pub fn chunk(mut self, id: u16, payload: &[u8]) -> Self {
        self.bytes.extend(chunk(id, payload));
        self
    }

    /// Append bytes that are already chunk-encoded
    pub fn raw(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.bytes.extend_from_slice(bytes.as_ref());
        self
    }

    /// Append a chunk whose declared length is `length` regardless of payload
    pub fn with_length(mut self, id: u16, length: u32, payload: &[u8]) -> Self {
        self.bytes.extend_from_slice(&id.to_le_bytes());
        self.bytes.extend_from_slice(&length.to_le_bytes());
        self.bytes.extend_from_slice(payload);
        self
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing was written
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Finish and return the bytes
    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// One chunk: id, length including the header, payload
pub fn chunk(id: u16, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(payload.len() + 6);
    bytes.extend_from_slice(&id.to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u32 + 6).to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// Chunk whose payload is the concatenation of `children`
pub fn container(id: u16, children: &[Vec<u8>]) -> Vec<u8> {
    chunk(id, &children.concat())
}

/// Null-terminated string
pub fn cstr(name: &str) -> Vec<u8> {
    let mut bytes = name.as_bytes().to_vec();
    bytes.push(0);
    bytes
}

/// Main chunk
pub fn main(children: &[Vec<u8>]) -> Vec<u8> {
    container(MAIN, children)
}

/// Editor chunk
pub fn editor(children: &[Vec<u8>]) -> Vec<u8> {
    container(EDITOR, children)
}

/// Named object followed by its children
pub fn object(name: &str, children: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = cstr(name);
    payload.extend(children.concat());
    chunk(OBJECT, &payload)
}

/// Triangle mesh container
pub fn tri_mesh(children: &[Vec<u8>]) -> Vec<u8> {
    container(TRI_MESH, children)
}

/// Point array
pub fn point_array(points: &[[f32; 3]]) -> Vec<u8> {
    let mut payload = (points.len() as u16).to_le_bytes().to_vec();
    for value in points.iter().flatten() {
        payload.extend_from_slice(&value.to_le_bytes());
    }
    chunk(POINT_ARRAY, &payload)
}

/// Texcoord array
pub fn texcoord_array(uvs: &[[f32; 2]]) -> Vec<u8> {
    let mut payload = (uvs.len() as u16).to_le_bytes().to_vec();
    for value in uvs.iter().flatten() {
        payload.extend_from_slice(&value.to_le_bytes());
    }
    chunk(TEXCOORD_ARRAY, &payload)
}

/// Face array with zero flags, followed by `children`
pub fn face_array(faces: &[[u16; 3]], children: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = (faces.len() as u16).to_le_bytes().to_vec();
    for face in faces {
        for index in face {
            payload.extend_from_slice(&index.to_le_bytes());
        }
        payload.extend_from_slice(&0u16.to_le_bytes());
    }
    payload.extend(children.concat());
    chunk(FACE_ARRAY, &payload)
}

/// Material group naming the faces that use `name`
pub fn material_group(name: &str, face_ids: &[u16]) -> Vec<u8> {
    let mut payload = cstr(name);
    payload.extend_from_slice(&(face_ids.len() as u16).to_le_bytes());
    for id in face_ids {
        payload.extend_from_slice(&id.to_le_bytes());
    }
    chunk(MATERIAL_GROUP, &payload)
}

/// Color property with three floats
pub fn color_f32(id: u16, rgb: [f32; 3]) -> Vec<u8> {
    let mut value = Vec::with_capacity(12);
    for c in rgb {
        value.extend_from_slice(&c.to_le_bytes());
    }
    chunk(id, &chunk(0x0010, &value))
}

/// Color property with three bytes
pub fn color_u8(id: u16, rgb: [u8; 3]) -> Vec<u8> {
    chunk(id, &chunk(0x0011, &rgb))
}

/// Percentage property as a 16-bit integer
pub fn percent_u16(id: u16, percent: u16) -> Vec<u8> {
    chunk(id, &chunk(0x0030, &percent.to_le_bytes()))
}

/// Percentage property as a float
pub fn percent_f32(id: u16, percent: f32) -> Vec<u8> {
    chunk(id, &chunk(0x0031, &percent.to_le_bytes()))
}

/// Material block with a diffuse color and optional extra properties
pub fn material(name: &str, diffuse: [u8; 3], properties: &[Vec<u8>]) -> Vec<u8> {
    let mut children = vec![chunk(MATERIAL_NAME, &cstr(name)), color_u8(DIFFUSE, diffuse)];
    children.extend_from_slice(properties);
    container(MATERIAL, &children)
}

/// Texture map block naming `file`
pub fn texture_map(file: &str) -> Vec<u8> {
    container(TEXTURE_MAP, &[chunk(MAP_NAME, &cstr(file))])
}

/// Unit quad split into two triangles, all faces using `material_name`
pub fn quad_object(name: &str, material_name: &str, z: f32) -> Vec<u8> {
    object(
        name,
        &[tri_mesh(&[
            point_array(&[[0.0, 0.0, z], [1.0, 0.0, z], [1.0, 1.0, z], [0.0, 1.0, z]]),
            texcoord_array(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
            face_array(
                &[[0, 1, 2], [0, 2, 3]],
                &[
                    material_group(material_name, &[0, 1]),
                    chunk(SMOOTH_GROUP, &[1, 0, 0, 0, 1, 0, 0, 0]),
                ],
            ),
            chunk(MESH_MATRIX, &[0u8; 48]),
        ])],
    )
}

/// Two quads with two materials: 2 objects, 8 vertices, 4 faces, 2 materials
pub fn sample_scene() -> Vec<u8> {
    main(&[
        chunk(0x0002, &3u32.to_le_bytes()),
        editor(&[
            material("red", [255, 0, 0], &[percent_u16(SHININESS, 40)]),
            material(
                "glass",
                [0, 0, 255],
                &[percent_u16(TRANSPARENCY, 50), texture_map("glass.png")],
            ),
            quad_object("bottom", "red", 0.0),
            quad_object("top", "glass", 1.0),
        ]),
    ])
}
