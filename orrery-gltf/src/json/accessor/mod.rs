use serde::Deserialize;

use super::{BufferView, Document};

mod component_type;
mod element_type;

pub use self::component_type::*;
pub use self::element_type::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    pub buffer_view: Option<usize>,

    #[serde(default)]
    pub byte_offset: usize,

    pub component_type: ComponentType,

    #[serde(rename = "type")]
    pub ty: ElementType,

    pub count: usize,
}

impl Accessor {
    pub fn buffer_view<'a: 'b, 'b>(&'a self, doc: &'b Document) -> Option<&'b BufferView> {
        self.buffer_view.and_then(|id| doc.buffer_views.get(id))
    }

    /// Tightly packed size of one element in bytes.
    pub fn element_size(&self) -> usize {
        self.component_type.size() * self.ty.component_count()
    }
}

#[test]
fn accessor() -> serde_json::Result<()> {
    let accessor: Accessor = serde_json::from_str(
        r#"{
            "bufferView": 0,
            "componentType": 5126,
            "type": "VEC3",
            "count": 24
        }"#,
    )?;

    assert_eq!(accessor.buffer_view, Some(0));
    assert_eq!(accessor.byte_offset, 0);
    assert_eq!(accessor.component_type, ComponentType::Float);
    assert_eq!(accessor.ty, ElementType::Vec3);
    assert_eq!(accessor.count, 24);
    assert_eq!(accessor.element_size(), 12);

    Ok(())
}
