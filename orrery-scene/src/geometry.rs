use std::sync::Arc;

use crate::StateSet;

/// How an attribute array maps onto a drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    PerVertex,
    Overall,
}

/// Typed vertex attribute data.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Float(Vec<f32>),
    Vec2(Vec<glam::Vec2>),
    Vec3(Vec<glam::Vec3>),
    Vec4(Vec<glam::Vec4>),
}

impl ArrayData {
    pub fn len(&self) -> usize {
        match self {
            ArrayData::Float(values) => values.len(),
            ArrayData::Vec2(values) => values.len(),
            ArrayData::Vec3(values) => values.len(),
            ArrayData::Vec4(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw little-endian bytes, ready for upload by a host runtime.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ArrayData::Float(values) => bytemuck::cast_slice(values),
            ArrayData::Vec2(values) => bytemuck::cast_slice(values),
            ArrayData::Vec3(values) => bytemuck::cast_slice(values),
            ArrayData::Vec4(values) => bytemuck::cast_slice(values),
        }
    }
}

/// An attribute array plus its binding tag.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArray {
    pub data: ArrayData,
    pub binding: Binding,
}

impl AttributeArray {
    pub fn per_vertex(data: ArrayData) -> Self {
        Self {
            data,
            binding: Binding::PerVertex,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Topology used to interpret an index sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Points,
    Lines,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Decoded index sequence, kept at its source component width.
#[derive(Debug, Clone, PartialEq)]
pub enum Indices {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl Indices {
    pub fn len(&self) -> usize {
        match self {
            Indices::U8(values) => values.len(),
            Indices::U16(values) => values.len(),
            Indices::U32(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        match self {
            Indices::U8(values) => values.get(index).map(|&value| value as u32),
            Indices::U16(values) => values.get(index).map(|&value| value as u32),
            Indices::U32(values) => values.get(index).copied(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.len()).map(move |index| self.get(index).unwrap_or(0))
    }

    /// Largest index in the sequence, if any.
    pub fn max(&self) -> Option<u32> {
        self.iter().max()
    }
}

/// One indexed draw call.
///
/// `mode: None` marks a topology the reader did not recognize; consumers
/// must treat such a set as non-renderable.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSet {
    pub mode: Option<DrawMode>,
    pub indices: Indices,
}

/// A drawable leaf: bound attribute arrays, index sets and render state.
///
/// Attribute arrays are shared (`Arc`) between every drawable referencing
/// the same source accessor.
#[derive(Debug, Default)]
pub struct Geometry {
    pub positions: Option<Arc<AttributeArray>>,
    pub normals: Option<Arc<AttributeArray>>,
    pub tex_coords: [Option<Arc<AttributeArray>>; 2],
    pub colors: Option<Arc<AttributeArray>>,
    pub primitive_sets: Vec<PrimitiveSet>,
    pub state: StateSet,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertex count implied by the position array; 0 when unbound.
    pub fn vertex_count(&self) -> usize {
        self.positions.as_ref().map_or(0, |array| array.len())
    }
}
