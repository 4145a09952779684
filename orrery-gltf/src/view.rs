//! Typed, strided views over raw buffer bytes.

use byteorder::{ByteOrder, LE};

use crate::error::ReadError;
use crate::json::{ComponentType, Document, ElementType};

/// A bounds-checked, read-only window over one accessor's elements.
///
/// All range arithmetic happens once at construction; reads step through
/// the validated window and cannot touch bytes outside it. The view
/// borrows the document's buffer and copies nothing.
pub struct AccessorView<'a> {
    data: &'a [u8],
    stride: usize,
    count: usize,
    component_type: ComponentType,
    element_type: ElementType,
}

impl<'a> AccessorView<'a> {
    pub fn new(doc: &'a Document, accessor_index: usize) -> Result<Self, ReadError> {
        let accessor = doc.accessors.get(accessor_index).ok_or_else(|| {
            ReadError::MalformedFile(format!("accessor index {accessor_index} out of range"))
        })?;

        let view = accessor.buffer_view(doc).ok_or_else(|| {
            ReadError::MalformedFile(format!(
                "accessor {accessor_index} has no resolvable buffer view"
            ))
        })?;

        let buffer = view.buffer(doc).ok_or_else(|| {
            ReadError::MalformedFile(format!("buffer index {} out of range", view.buffer))
        })?;

        let element_size = accessor.element_size();
        let stride = match view.byte_stride {
            Some(stride) if stride > 0 => stride,
            _ => element_size,
        };

        let overrun = || {
            ReadError::MalformedFile(format!(
                "accessor {accessor_index} overruns its buffer of {} bytes",
                buffer.data().len()
            ))
        };

        let start = view
            .byte_offset
            .checked_add(accessor.byte_offset)
            .ok_or_else(overrun)?;
        let end = match accessor.count {
            0 => start,
            count => stride
                .checked_mul(count - 1)
                .and_then(|span| span.checked_add(start))
                .and_then(|span| span.checked_add(element_size))
                .ok_or_else(overrun)?,
        };

        let data = buffer.data().get(start..end).ok_or_else(overrun)?;

        Ok(Self {
            data,
            stride,
            count: accessor.count,
            component_type: accessor.component_type,
            element_type: accessor.ty,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    fn component_bytes(&self, element: usize, component: usize) -> &[u8] {
        let offset = element * self.stride + component * self.component_type.size();
        &self.data[offset..]
    }

    /// Float component `component` of element `element`.
    ///
    /// Callers are expected to have checked `component_type()` first and to
    /// keep `element < count()` and `component` under the element arity.
    pub fn f32_at(&self, element: usize, component: usize) -> f32 {
        LE::read_f32(self.component_bytes(element, component))
    }

    /// Scalar element `element` widened to `u32`, for index accessors.
    pub fn index_at(&self, element: usize) -> Result<u32, ReadError> {
        let bytes = self.component_bytes(element, 0);
        match self.component_type {
            ComponentType::UnsignedByte => Ok(bytes[0] as u32),
            ComponentType::UnsignedShort => Ok(LE::read_u16(bytes) as u32),
            ComponentType::UnsignedInt => Ok(LE::read_u32(bytes)),
            other => Err(ReadError::UnsupportedFeature(format!(
                "index component type {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    fn doc_with_floats(bytes: Vec<u8>, stride: Option<usize>, count: usize) -> Document {
        let mut doc = Document {
            accessors: vec![json::Accessor {
                buffer_view: Some(0),
                byte_offset: 0,
                component_type: ComponentType::Float,
                ty: ElementType::Vec2,
                count,
            }],
            buffer_views: vec![json::BufferView {
                buffer: 0,
                byte_length: bytes.len(),
                byte_offset: 0,
                byte_stride: stride,
            }],
            buffers: vec![json::Buffer {
                byte_length: bytes.len(),
                uri: None,
                data: Vec::new(),
            }],
            ..Document::default()
        };
        doc.buffers[0].bind_data(bytes);
        doc
    }

    fn le_floats(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn packed_elements_read_back() {
        let doc = doc_with_floats(le_floats(&[1.0, 2.0, 3.0, 4.0]), None, 2);
        let view = AccessorView::new(&doc, 0).unwrap();

        assert_eq!(view.count(), 2);
        assert_eq!(view.f32_at(0, 0), 1.0);
        assert_eq!(view.f32_at(0, 1), 2.0);
        assert_eq!(view.f32_at(1, 0), 3.0);
        assert_eq!(view.f32_at(1, 1), 4.0);
    }

    #[test]
    fn stride_skips_padding() {
        // Two vec2 elements separated by one f32 of padding: stride 12.
        let doc = doc_with_floats(
            le_floats(&[1.0, 2.0, 99.0, 3.0, 4.0]),
            Some(12),
            2,
        );
        let view = AccessorView::new(&doc, 0).unwrap();

        assert_eq!(view.f32_at(1, 0), 3.0);
        assert_eq!(view.f32_at(1, 1), 4.0);
    }

    #[test]
    fn overrun_is_malformed() {
        // Three elements claimed over eight bytes of storage.
        let doc = doc_with_floats(le_floats(&[1.0, 2.0]), None, 3);

        assert!(matches!(
            AccessorView::new(&doc, 0),
            Err(ReadError::MalformedFile(_))
        ));
    }

    #[test]
    fn missing_view_is_malformed() {
        let mut doc = doc_with_floats(le_floats(&[1.0, 2.0]), None, 1);
        doc.accessors[0].buffer_view = None;

        assert!(matches!(
            AccessorView::new(&doc, 0),
            Err(ReadError::MalformedFile(_))
        ));
        assert!(matches!(
            AccessorView::new(&doc, 7),
            Err(ReadError::MalformedFile(_))
        ));
    }

    #[test]
    fn index_widths_decode() {
        let mut doc = doc_with_floats(vec![5, 0, 1, 0, 7, 1, 0, 0], None, 0);
        doc.accessors[0] = json::Accessor {
            buffer_view: Some(0),
            byte_offset: 0,
            component_type: ComponentType::UnsignedShort,
            ty: ElementType::Scalar,
            count: 4,
        };

        let view = AccessorView::new(&doc, 0).unwrap();
        assert_eq!(view.index_at(0).unwrap(), 5);
        assert_eq!(view.index_at(1).unwrap(), 1);
        assert_eq!(view.index_at(2).unwrap(), 263);
        assert_eq!(view.index_at(3).unwrap(), 0);
    }

    #[test]
    fn float_indices_are_unsupported() {
        let doc = doc_with_floats(le_floats(&[0.0, 1.0]), None, 1);
        let view = AccessorView::new(&doc, 0).unwrap();

        assert!(matches!(
            view.index_at(0),
            Err(ReadError::UnsupportedFeature(_))
        ));
    }
}
