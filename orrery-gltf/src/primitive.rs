//! Assembly of drawable geometry from mesh primitives.

use std::sync::Arc;

use scene::{ArrayData, AttributeArray, Geometry, Group, Indices, Node, PrimitiveSet};

use crate::error::ReadError;
use crate::json::{self, AlphaMode, ComponentType};
use crate::texture::resolve_texture;
use crate::view::AccessorView;
use crate::Env;

/// Convert one mesh into a group of drawables, one per primitive.
///
/// A primitive that fails conversion is skipped with a diagnostic; its
/// siblings still land in the group.
pub fn build_mesh(
    env: &Env<'_>,
    mesh: &json::Mesh,
    arrays: &[Option<Arc<AttributeArray>>],
) -> Group {
    let mut group = Group {
        name: mesh.name.clone(),
        children: Vec::new(),
    };

    log::debug!(
        "building {} primitives of mesh {:?}",
        mesh.primitives.len(),
        mesh.name
    );

    for (index, primitive) in mesh.primitives.iter().enumerate() {
        match build_primitive(env, primitive, arrays) {
            Ok(geometry) => group.children.push(Node::Geometry(geometry)),
            Err(err) => {
                log::warn!("skipping primitive {index} of mesh {:?}: {err}", mesh.name);
            }
        }
    }

    group
}

fn build_primitive(
    env: &Env<'_>,
    primitive: &json::MeshPrimitive,
    arrays: &[Option<Arc<AttributeArray>>],
) -> Result<Geometry, ReadError> {
    // A primitive without an index accessor is invalid here.
    let indices_index = primitive
        .indices
        .ok_or_else(|| ReadError::MalformedFile("primitive has no index accessor".into()))?;

    let mut geometry = Geometry::new();

    let material = primitive.material(env.doc);
    let base_color_factor = material
        .map(json::Material::base_color_factor)
        .unwrap_or(glam::Vec4::ONE);

    if let Some(material) = material {
        if let Some(texture_ref) = material.base_color_texture() {
            geometry.state.base_color_texture = resolve_texture(env, texture_ref.index);
        }

        if let Some(texture_ref) = &material.emissive_texture {
            geometry.state.emissive_texture = resolve_texture(env, texture_ref.index);
        }

        // MASK is handled like BLEND: no alpha-cutoff discard, just the
        // transparent bin.
        if matches!(material.alpha_mode, AlphaMode::Blend | AlphaMode::Mask) {
            geometry.state.set_transparent();
        }
    }

    for (semantic, &accessor_index) in &primitive.attributes {
        let Some(array) = arrays.get(accessor_index).and_then(Option::as_ref) else {
            log::debug!("attribute {semantic} has no extracted array");
            continue;
        };

        match semantic.as_str() {
            "POSITION" => geometry.positions = Some(Arc::clone(array)),
            "NORMAL" => geometry.normals = Some(Arc::clone(array)),
            "TEXCOORD_0" => geometry.tex_coords[0] = Some(Arc::clone(array)),
            "TEXCOORD_1" => geometry.tex_coords[1] = Some(Arc::clone(array)),
            "COLOR_0" => geometry.colors = Some(Arc::clone(array)),
            other => log::debug!("ignoring attribute {other}"),
        }
    }

    // No color attribute: bind a uniform array of the material's base color.
    if geometry.colors.is_none() {
        geometry.colors = Some(Arc::new(AttributeArray::per_vertex(ArrayData::Vec4(vec![
            base_color_factor;
            geometry.vertex_count()
        ]))));
    }

    let view = AccessorView::new(env.doc, indices_index)?;
    let indices = decode_indices(&view)?;

    let vertex_count = geometry.vertex_count();
    if let Some(max) = indices.max() {
        if max as usize >= vertex_count {
            return Err(ReadError::MalformedFile(format!(
                "index {max} exceeds vertex count {vertex_count}"
            )));
        }
    }

    let mode = primitive.mode.draw_mode();
    if mode.is_none() {
        log::debug!("primitive mode {:?} is not renderable", primitive.mode);
    }

    geometry.primitive_sets.push(PrimitiveSet { mode, indices });

    if !env.options.skip_normals && geometry.normals.is_none() {
        generate_normals(&mut geometry);
    }

    Ok(geometry)
}

/// Decode an index accessor at its source component width.
fn decode_indices(view: &AccessorView<'_>) -> Result<Indices, ReadError> {
    let count = view.count();

    match view.component_type() {
        ComponentType::UnsignedByte => Ok(Indices::U8(
            (0..count)
                .map(|i| view.index_at(i).map(|value| value as u8))
                .collect::<Result<_, _>>()?,
        )),
        ComponentType::UnsignedShort => Ok(Indices::U16(
            (0..count)
                .map(|i| view.index_at(i).map(|value| value as u16))
                .collect::<Result<_, _>>()?,
        )),
        ComponentType::UnsignedInt => Ok(Indices::U32(
            (0..count).map(|i| view.index_at(i)).collect::<Result<_, _>>()?,
        )),
        other => Err(ReadError::UnsupportedFeature(format!(
            "index component type {other:?}"
        ))),
    }
}

/// Smooth per-vertex normals accumulated from triangle face normals.
///
/// Covers the three triangle topologies; other modes contribute nothing.
/// Vertices not referenced by any triangle keep a zero normal.
fn generate_normals(geometry: &mut Geometry) {
    let Some(positions) = geometry.positions.as_ref() else {
        return;
    };
    let ArrayData::Vec3(positions) = &positions.data else {
        return;
    };

    let mut normals = vec![glam::Vec3::ZERO; positions.len()];

    for set in &geometry.primitive_sets {
        for_each_triangle(set, |a, b, c| {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            if a >= positions.len() || b >= positions.len() || c >= positions.len() {
                return;
            }

            // Cross product is area-weighted, so larger faces dominate.
            let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        });
    }

    for normal in &mut normals {
        *normal = normal.normalize_or_zero();
    }

    geometry.normals = Some(Arc::new(AttributeArray::per_vertex(ArrayData::Vec3(
        normals,
    ))));
}

/// Visit every triangle of a primitive set, respecting strip winding.
fn for_each_triangle<F: FnMut(u32, u32, u32)>(set: &PrimitiveSet, mut visit: F) {
    let indices = &set.indices;
    let len = indices.len();

    let index = |i: usize| indices.get(i).unwrap_or(0);

    match set.mode {
        Some(scene::DrawMode::Triangles) => {
            for tri in 0..len / 3 {
                visit(index(tri * 3), index(tri * 3 + 1), index(tri * 3 + 2));
            }
        }
        Some(scene::DrawMode::TriangleStrip) => {
            for i in 0..len.saturating_sub(2) {
                if i % 2 == 0 {
                    visit(index(i), index(i + 1), index(i + 2));
                } else {
                    visit(index(i + 1), index(i), index(i + 2));
                }
            }
        }
        Some(scene::DrawMode::TriangleFan) => {
            for i in 1..len.saturating_sub(1) {
                visit(index(0), index(i), index(i + 1));
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{Document, ElementType};
    use crate::ReadOptions;

    /// One-buffer document: a unit triangle in the XY plane with u16
    /// indices [0, 1, 2] and no material.
    fn triangle_doc() -> Document {
        let positions: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let mut bytes: Vec<u8> = positions
            .iter()
            .flatten()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let index_offset = bytes.len();
        for index in [0u16, 1, 2] {
            bytes.extend_from_slice(&index.to_le_bytes());
        }

        let mut doc = Document {
            accessors: vec![
                json::Accessor {
                    buffer_view: Some(0),
                    byte_offset: 0,
                    component_type: ComponentType::Float,
                    ty: ElementType::Vec3,
                    count: 3,
                },
                json::Accessor {
                    buffer_view: Some(1),
                    byte_offset: 0,
                    component_type: ComponentType::UnsignedShort,
                    ty: ElementType::Scalar,
                    count: 3,
                },
            ],
            buffer_views: vec![
                json::BufferView {
                    buffer: 0,
                    byte_length: index_offset,
                    byte_offset: 0,
                    byte_stride: None,
                },
                json::BufferView {
                    buffer: 0,
                    byte_length: 6,
                    byte_offset: index_offset,
                    byte_stride: None,
                },
            ],
            buffers: vec![json::Buffer {
                byte_length: bytes.len(),
                uri: None,
                data: Vec::new(),
            }],
            meshes: vec![serde_json::from_str(
                r#"{ "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1 }] }"#,
            )
            .unwrap()],
            ..Document::default()
        };
        doc.buffers[0].bind_data(bytes);
        doc
    }

    fn build(doc: &Document, options: &ReadOptions) -> Group {
        let env = Env {
            doc,
            referrer: None,
            options,
        };
        let arrays = crate::extract::extract_arrays(doc);
        build_mesh(&env, &doc.meshes[0], &arrays)
    }

    #[test]
    fn triangle_primitive_converts_whole() {
        let doc = triangle_doc();
        let options = ReadOptions::default();
        let group = build(&doc, &options);

        assert_eq!(group.children.len(), 1);
        let Node::Geometry(geometry) = &group.children[0] else {
            panic!("expected a geometry child");
        };

        assert_eq!(geometry.vertex_count(), 3);

        let set = &geometry.primitive_sets[0];
        assert_eq!(set.mode, Some(scene::DrawMode::Triangles));
        assert_eq!(set.indices, Indices::U16(vec![0, 1, 2]));

        // Synthesized colors: uniform opaque white, one per vertex.
        let colors = geometry.colors.as_ref().unwrap();
        assert_eq!(colors.data, ArrayData::Vec4(vec![glam::Vec4::ONE; 3]));
        assert_eq!(colors.binding, scene::Binding::PerVertex);

        // Generated normals: the triangle lies in the XY plane.
        let normals = geometry.normals.as_ref().unwrap();
        assert_eq!(normals.data, ArrayData::Vec3(vec![glam::Vec3::Z; 3]));
    }

    #[test]
    fn indices_stay_below_vertex_count() {
        let doc = triangle_doc();
        let options = ReadOptions::default();
        let group = build(&doc, &options);

        let Node::Geometry(geometry) = &group.children[0] else {
            panic!("expected a geometry child");
        };
        let max = geometry.primitive_sets[0].indices.max().unwrap();
        assert!((max as usize) < geometry.vertex_count());
    }

    #[test]
    fn out_of_range_index_rejects_primitive() {
        let mut doc = triangle_doc();
        // Point the second index at vertex 9.
        let offset = 3 * 12 + 2;
        doc.buffers[0].data[offset] = 9;

        let options = ReadOptions::default();
        let group = build(&doc, &options);
        assert!(group.children.is_empty());
    }

    #[test]
    fn skip_normals_leaves_normals_unbound() {
        let doc = triangle_doc();
        let options = ReadOptions {
            skip_normals: true,
            ..ReadOptions::default()
        };
        let group = build(&doc, &options);

        let Node::Geometry(geometry) = &group.children[0] else {
            panic!("expected a geometry child");
        };
        assert!(geometry.normals.is_none());
    }

    #[test]
    fn primitive_without_indices_is_skipped_but_siblings_convert() {
        let mut doc = triangle_doc();
        doc.meshes[0] = serde_json::from_str(
            r#"{ "primitives": [
                { "attributes": { "POSITION": 0 } },
                { "attributes": { "POSITION": 0 }, "indices": 1 }
            ] }"#,
        )
        .unwrap();

        let options = ReadOptions::default();
        let group = build(&doc, &options);

        assert_eq!(group.children.len(), 1);
    }

    #[test]
    fn masked_material_lands_in_transparent_bin() {
        let mut doc = triangle_doc();
        doc.materials = vec![serde_json::from_str(r#"{ "alphaMode": "MASK" }"#).unwrap()];
        doc.meshes[0] = serde_json::from_str(
            r#"{ "primitives": [
                { "attributes": { "POSITION": 0 }, "indices": 1, "material": 0 }
            ] }"#,
        )
        .unwrap();

        let options = ReadOptions::default();
        let group = build(&doc, &options);

        let Node::Geometry(geometry) = &group.children[0] else {
            panic!("expected a geometry child");
        };
        assert!(geometry.state.blend);
        assert!(geometry.state.transparent_bin);
    }

    #[test]
    fn line_strip_mode_becomes_sentinel() {
        let mut doc = triangle_doc();
        doc.meshes[0] = serde_json::from_str(
            r#"{ "primitives": [
                { "attributes": { "POSITION": 0 }, "indices": 1, "mode": 3 }
            ] }"#,
        )
        .unwrap();

        let options = ReadOptions::default();
        let group = build(&doc, &options);

        let Node::Geometry(geometry) = &group.children[0] else {
            panic!("expected a geometry child");
        };
        assert_eq!(geometry.primitive_sets[0].mode, None);
        // Sentinel mode also means no triangles to smooth.
        let normals = geometry.normals.as_ref().unwrap();
        assert_eq!(normals.data, ArrayData::Vec3(vec![glam::Vec3::ZERO; 3]));
    }

    #[test]
    fn strip_winding_alternates() {
        let set = PrimitiveSet {
            mode: Some(scene::DrawMode::TriangleStrip),
            indices: Indices::U16(vec![0, 1, 2, 3]),
        };

        let mut triangles = Vec::new();
        for_each_triangle(&set, |a, b, c| triangles.push((a, b, c)));
        assert_eq!(triangles, vec![(0, 1, 2), (2, 1, 3)]);

        let set = PrimitiveSet {
            mode: Some(scene::DrawMode::TriangleFan),
            indices: Indices::U16(vec![0, 1, 2, 3]),
        };
        triangles.clear();
        for_each_triangle(&set, |a, b, c| triangles.push((a, b, c)));
        assert_eq!(triangles, vec![(0, 1, 2), (0, 2, 3)]);
    }
}
