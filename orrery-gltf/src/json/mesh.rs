use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

use super::{Accessor, Document, Material};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mesh {
    pub name: Option<String>,
    pub primitives: Vec<MeshPrimitive>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshPrimitive {
    #[serde(default)]
    pub attributes: HashMap<String, usize>,

    pub indices: Option<usize>,
    pub material: Option<usize>,

    #[serde(default)]
    pub mode: PrimitiveMode,
}

impl MeshPrimitive {
    pub fn attribute<'a: 'b, 'b>(&'a self, name: &str, doc: &'b Document) -> Option<&'b Accessor> {
        self.attributes
            .get(name)
            .and_then(|id| doc.accessors.get(*id))
    }

    pub fn material<'a: 'b, 'b>(&'a self, doc: &'b Document) -> Option<&'b Material> {
        self.material.and_then(|id| doc.materials.get(id))
    }
}

/// Topology code of a primitive.
///
/// Codes outside the format's enumeration parse into `Unsupported` so a
/// bad primitive degrades instead of failing the whole document.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum PrimitiveMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
    Unsupported(usize),
}

impl PrimitiveMode {
    /// The renderable draw mode for this code.
    ///
    /// `LineStrip` and unknown codes have no counterpart and yield `None`,
    /// the non-renderable sentinel consumers must check for.
    pub fn draw_mode(&self) -> Option<scene::DrawMode> {
        match self {
            PrimitiveMode::Points => Some(scene::DrawMode::Points),
            PrimitiveMode::Lines => Some(scene::DrawMode::Lines),
            PrimitiveMode::LineLoop => Some(scene::DrawMode::LineLoop),
            PrimitiveMode::Triangles => Some(scene::DrawMode::Triangles),
            PrimitiveMode::TriangleStrip => Some(scene::DrawMode::TriangleStrip),
            PrimitiveMode::TriangleFan => Some(scene::DrawMode::TriangleFan),
            PrimitiveMode::LineStrip | PrimitiveMode::Unsupported(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for PrimitiveMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match usize::deserialize(deserializer)? {
            0 => PrimitiveMode::Points,
            1 => PrimitiveMode::Lines,
            2 => PrimitiveMode::LineLoop,
            3 => PrimitiveMode::LineStrip,
            4 => PrimitiveMode::Triangles,
            5 => PrimitiveMode::TriangleStrip,
            6 => PrimitiveMode::TriangleFan,
            value => PrimitiveMode::Unsupported(value),
        })
    }
}

#[test]
fn primitive_defaults_to_triangles() -> serde_json::Result<()> {
    let primitive: MeshPrimitive =
        serde_json::from_str(r#"{ "attributes": { "POSITION": 0 }, "indices": 1 }"#)?;

    assert_eq!(primitive.mode, PrimitiveMode::Triangles);
    assert_eq!(primitive.indices, Some(1));
    assert_eq!(primitive.material, None);

    Ok(())
}

#[test]
fn attribute_lookup_tolerates_bad_indices() -> serde_json::Result<()> {
    let doc: Document = serde_json::from_str(
        r#"{
            "accessors": [
                { "bufferView": 0, "componentType": 5126, "type": "VEC3", "count": 3 }
            ],
            "meshes": [{
                "primitives": [
                    { "attributes": { "POSITION": 0, "NORMAL": 9 }, "indices": 0 }
                ]
            }]
        }"#,
    )?;

    let primitive = &doc.meshes[0].primitives[0];
    assert!(primitive.attribute("POSITION", &doc).is_some());
    assert!(primitive.attribute("NORMAL", &doc).is_none());
    assert!(primitive.attribute("COLOR_0", &doc).is_none());

    Ok(())
}

#[test]
fn line_strip_has_no_draw_mode() {
    assert_eq!(PrimitiveMode::LineStrip.draw_mode(), None);
    assert_eq!(
        PrimitiveMode::TriangleFan.draw_mode(),
        Some(scene::DrawMode::TriangleFan)
    );
}

#[test]
fn unknown_mode_parses_to_unsupported() -> serde_json::Result<()> {
    let primitive: MeshPrimitive = serde_json::from_str(
        r#"{ "attributes": { "POSITION": 0 }, "indices": 1, "mode": 9 }"#,
    )?;

    assert_eq!(primitive.mode, PrimitiveMode::Unsupported(9));
    assert_eq!(primitive.mode.draw_mode(), None);

    Ok(())
}
