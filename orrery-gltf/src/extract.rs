//! Conversion of accessors into shared vertex-attribute arrays.

use std::sync::Arc;

use scene::{ArrayData, AttributeArray};

use crate::json::{ComponentType, Document, ElementType};
use crate::view::AccessorView;

/// Build one attribute array per accessor, indexed by accessor position.
///
/// Only float component types are extracted here; integer-backed accessors
/// (index buffers among them) and accessors whose byte ranges do not
/// validate get `None`, and consumers must check each slot before use.
/// One pass per accessor, shared afterwards by every primitive that
/// references it.
pub fn extract_arrays(doc: &Document) -> Vec<Option<Arc<AttributeArray>>> {
    doc.accessors
        .iter()
        .enumerate()
        .map(|(index, accessor)| {
            if accessor.component_type != ComponentType::Float {
                log::debug!(
                    "accessor {index}: no array for component type {:?}",
                    accessor.component_type
                );
                return None;
            }

            let view = match AccessorView::new(doc, index) {
                Ok(view) => view,
                Err(err) => {
                    log::warn!("accessor {index}: {err}");
                    return None;
                }
            };

            let count = view.count();
            let data = match view.element_type() {
                ElementType::Scalar => {
                    ArrayData::Float((0..count).map(|i| view.f32_at(i, 0)).collect())
                }
                ElementType::Vec2 => ArrayData::Vec2(
                    (0..count)
                        .map(|i| glam::vec2(view.f32_at(i, 0), view.f32_at(i, 1)))
                        .collect(),
                ),
                ElementType::Vec3 => ArrayData::Vec3(
                    (0..count)
                        .map(|i| {
                            glam::vec3(view.f32_at(i, 0), view.f32_at(i, 1), view.f32_at(i, 2))
                        })
                        .collect(),
                ),
                ElementType::Vec4 => ArrayData::Vec4(
                    (0..count)
                        .map(|i| {
                            glam::vec4(
                                view.f32_at(i, 0),
                                view.f32_at(i, 1),
                                view.f32_at(i, 2),
                                view.f32_at(i, 3),
                            )
                        })
                        .collect(),
                ),
                matrix => {
                    log::debug!("accessor {index}: no array for element type {matrix:?}");
                    return None;
                }
            };

            Some(Arc::new(AttributeArray::per_vertex(data)))
        })
        .collect()
}
