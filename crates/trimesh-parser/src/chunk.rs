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

//! 3DS chunk vocabulary and little-endian field decoding
//!
//! Every chunk starts with a 2-byte id and a 4-byte length, both
//! little-endian, where the length counts the 6-byte header itself.
//! [`ChunkId`] is the closed set of ids the parser understands and
//! [`ChunkId::handler`] maps each one to the way its payload is consumed.
//! Ids outside the set are skipped by length.

/// Size of the id + length header
pub const HEADER_LEN: u32 = 6;

/// Property value tag: three little-endian floats
pub const TAG_COLOR_F32: u8 = 0x10;

/// Property value tag: three bytes, or a float percentage for scalars
pub const TAG_COLOR_24: u8 = 0x11;

/// Property value tag: 16-bit integer percentage
pub const TAG_PERCENT_U16: u8 = 0x30;

/// Property value tag: float percentage
pub const TAG_PERCENT_F32: u8 = 0x31;

/// Known chunk ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ChunkId {
    /// File root
    Main = 0x4D4D,
    /// 3D editor section
    Editor = 0x3D3D,
    /// Named object
    Object = 0x4000,
    /// Triangle mesh of an object
    TriMesh = 0x4100,
    /// Vertex positions
    PointArray = 0x4110,
    /// Per-vertex flags
    PointFlagArray = 0x4111,
    /// Triangles
    FaceArray = 0x4120,
    /// Faces using one material
    MaterialGroup = 0x4130,
    /// Texture coordinates
    TexcoordArray = 0x4140,
    /// Smoothing groups
    SmoothGroup = 0x4150,
    /// Local coordinate system
    MeshMatrix = 0x4160,
    /// Material block
    Material = 0xAFFF,
    /// Material name
    MaterialName = 0xA000,
    /// Ambient color
    AmbientColor = 0xA010,
    /// Diffuse color
    DiffuseColor = 0xA020,
    /// Specular color
    SpecularColor = 0xA030,
    /// Shininess percentage
    Shininess = 0xA040,
    /// Transparency percentage
    Transparency = 0xA050,
    /// Texture map block
    TextureMap = 0xA200,
    /// Bump map block
    BumpMap = 0xA230,
    /// Second texture map block
    SecondTextureMap = 0xA33A,
    /// Map file name
    MapName = 0xA300,
}

/// Color property a chunk writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    /// Ambient RGB
    Ambient,
    /// Diffuse RGB
    Diffuse,
    /// Specular RGB
    Specular,
}

/// Scalar property a chunk writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarSlot {
    /// Shininess
    Shininess,
    /// Transparency, stored as opacity
    Transparency,
}

/// How the payload of a chunk is consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkHandler {
    /// Payload is a sequence of child chunks
    Container,
    /// Null-terminated object name, then children
    ObjectName,
    /// Count + xyz floats
    PointArray,
    /// Count + uv floats
    TexcoordArray,
    /// Count + index triples with flags, then children
    FaceArray,
    /// Material name, face count, face ids
    MaterialGroup,
    /// Null-terminated material name
    MaterialName,
    /// Color sub-chunk
    Color(ColorSlot),
    /// Percentage sub-chunk
    Scalar(ScalarSlot),
    /// Null-terminated map file name
    MapName,
    /// Payload is skipped
    Skip,
}

impl ChunkId {
    /// Every known id
    pub const ALL: [ChunkId; 22] = [
        ChunkId::Main,
        ChunkId::Editor,
        ChunkId::Object,
        ChunkId::TriMesh,
        ChunkId::PointArray,
        ChunkId::PointFlagArray,
        ChunkId::FaceArray,
        ChunkId::MaterialGroup,
        ChunkId::TexcoordArray,
        ChunkId::SmoothGroup,
        ChunkId::MeshMatrix,
        ChunkId::Material,
        ChunkId::MaterialName,
        ChunkId::AmbientColor,
        ChunkId::DiffuseColor,
        ChunkId::SpecularColor,
        ChunkId::Shininess,
        ChunkId::Transparency,
        ChunkId::TextureMap,
        ChunkId::BumpMap,
        ChunkId::SecondTextureMap,
        ChunkId::MapName,
    ];

    /// Look up a raw id
    pub fn from_u16(id: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|known| *known as u16 == id)
    }

    /// Payload handling for this id
    pub fn handler(self) -> ChunkHandler {
        match self {
            ChunkId::Main
            | ChunkId::Editor
            | ChunkId::TriMesh
            | ChunkId::Material
            | ChunkId::TextureMap
            | ChunkId::BumpMap
            | ChunkId::SecondTextureMap => ChunkHandler::Container,
            ChunkId::Object => ChunkHandler::ObjectName,
            ChunkId::PointArray => ChunkHandler::PointArray,
            ChunkId::TexcoordArray => ChunkHandler::TexcoordArray,
            ChunkId::FaceArray => ChunkHandler::FaceArray,
            ChunkId::MaterialGroup => ChunkHandler::MaterialGroup,
            ChunkId::MaterialName => ChunkHandler::MaterialName,
            ChunkId::AmbientColor => ChunkHandler::Color(ColorSlot::Ambient),
            ChunkId::DiffuseColor => ChunkHandler::Color(ColorSlot::Diffuse),
            ChunkId::SpecularColor => ChunkHandler::Color(ColorSlot::Specular),
            ChunkId::Shininess => ChunkHandler::Scalar(ScalarSlot::Shininess),
            ChunkId::Transparency => ChunkHandler::Scalar(ScalarSlot::Transparency),
            ChunkId::MapName => ChunkHandler::MapName,
            // smoothing groups and the mesh matrix share the plain skip path
            ChunkId::PointFlagArray | ChunkId::SmoothGroup | ChunkId::MeshMatrix => {
                ChunkHandler::Skip
            }
        }
    }
}

/// Handler for a raw id, skipping unknown ones
pub fn handler_for(id: u16) -> ChunkHandler {
    ChunkId::from_u16(id).map_or(ChunkHandler::Skip, ChunkId::handler)
}

/// Little-endian u16 at the start of `bytes`
pub fn read_u16_le(bytes: &[u8]) -> Option<u16> {
    let raw: [u8; 2] = bytes.get(..2)?.try_into().ok()?;
    Some(u16::from_le_bytes(raw))
}

/// Little-endian u32 at the start of `bytes`
pub fn read_u32_le(bytes: &[u8]) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(u32::from_le_bytes(raw))
}

/// Little-endian f32 at the start of `bytes`
pub fn read_f32_le(bytes: &[u8]) -> Option<f32> {
    let raw: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(f32::from_le_bytes(raw))
}

/// Decode a color property payload (sub-chunk header included)
pub fn decode_color(payload: &[u8]) -> Option<[f32; 3]> {
    let tag = *payload.first()?;
    let data = payload.get(HEADER_LEN as usize..)?;

    match tag {
        TAG_COLOR_F32 => Some([
            read_f32_le(data)?,
            read_f32_le(data.get(4..)?)?,
            read_f32_le(data.get(8..)?)?,
        ]),
        TAG_COLOR_24 => {
            let rgb = data.get(..3)?;
            Some([
                f32::from(rgb[0]) / 255.0,
                f32::from(rgb[1]) / 255.0,
                f32::from(rgb[2]) / 255.0,
            ])
        }
        _ => None,
    }
}

/// Decode a percentage property payload (sub-chunk header included) to 0..1
pub fn decode_scalar(payload: &[u8]) -> Option<f32> {
    let tag = *payload.first()?;
    let data = payload.get(HEADER_LEN as usize..)?;

    match tag {
        TAG_PERCENT_U16 => Some(f32::from(read_u16_le(data)?) / 100.0),
        TAG_COLOR_24 | TAG_PERCENT_F32 => Some(read_f32_le(data)? / 100.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_id_round_trips() {
        for id in ChunkId::ALL {
            assert_eq!(ChunkId::from_u16(id as u16), Some(id));
        }
        assert_eq!(ChunkId::from_u16(0x0002), None);
    }

    #[test]
    fn test_handler_table() {
        assert_eq!(handler_for(0x4D4D), ChunkHandler::Container);
        assert_eq!(handler_for(0x4000), ChunkHandler::ObjectName);
        assert_eq!(handler_for(0x4110), ChunkHandler::PointArray);
        assert_eq!(handler_for(0x4120), ChunkHandler::FaceArray);
        assert_eq!(handler_for(0xA020), ChunkHandler::Color(ColorSlot::Diffuse));
        assert_eq!(
            handler_for(0xA050),
            ChunkHandler::Scalar(ScalarSlot::Transparency)
        );
        assert_eq!(handler_for(0x4150), ChunkHandler::Skip);
        assert_eq!(handler_for(0x4160), ChunkHandler::Skip);
        assert_eq!(handler_for(0xB000), ChunkHandler::Skip);
    }

    #[test]
    fn test_fixed_bytes_decode_identically_on_any_host() {
        assert_eq!(read_u16_le(&[0x34, 0x12]), Some(0x1234));
        assert_eq!(read_u32_le(&[0x78, 0x56, 0x34, 0x12]), Some(0x1234_5678));
        assert_eq!(read_f32_le(&[0x00, 0x00, 0x80, 0x3F]), Some(1.0));
        assert_eq!(read_f32_le(&[0x00, 0x00, 0x20, 0xC1]), Some(-10.0));
        assert_eq!(read_u16_le(&[0x01]), None);
    }

    #[test]
    fn test_decode_float_color() {
        let mut payload = vec![0x10, 0x00, 18, 0, 0, 0];
        payload.extend_from_slice(&0.5f32.to_le_bytes());
        payload.extend_from_slice(&0.25f32.to_le_bytes());
        payload.extend_from_slice(&1.0f32.to_le_bytes());
        assert_eq!(decode_color(&payload), Some([0.5, 0.25, 1.0]));
    }

    #[test]
    fn test_decode_byte_color() {
        let payload = [0x11, 0x00, 9, 0, 0, 0, 255, 0, 51];
        assert_eq!(decode_color(&payload), Some([1.0, 0.0, 0.2]));
    }

    #[test]
    fn test_decode_color_rejects_short_or_unknown_payloads() {
        assert_eq!(decode_color(&[0x11, 0x00, 9, 0, 0, 0, 255]), None);
        assert_eq!(decode_color(&[0x42, 0x00, 9, 0, 0, 0, 1, 2, 3]), None);
        assert_eq!(decode_color(&[]), None);
    }

    #[test]
    fn test_decode_percentages() {
        let int_percent = [0x30, 0x00, 8, 0, 0, 0, 50, 0];
        assert_eq!(decode_scalar(&int_percent), Some(0.5));

        let mut float_percent = vec![0x31, 0x00, 10, 0, 0, 0];
        float_percent.extend_from_slice(&25.0f32.to_le_bytes());
        assert_eq!(decode_scalar(&float_percent), Some(0.25));

        float_percent[0] = 0x11;
        assert_eq!(decode_scalar(&float_percent), Some(0.25));
    }
}
