use serde::Deserialize;

use super::{BufferView, Document};

/// An image source: either an external/data URI or an embedded buffer view.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub name: Option<String>,
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    pub buffer_view: Option<usize>,
}

impl Image {
    pub fn buffer_view<'a: 'b, 'b>(&'a self, doc: &'b Document) -> Option<&'b BufferView> {
        self.buffer_view.and_then(|id| doc.buffer_views.get(id))
    }

    /// Whether the pixel data lives inside the document itself.
    pub fn is_embedded(&self) -> bool {
        self.buffer_view.is_some()
            || self.uri.as_deref().is_some_and(|uri| uri.starts_with("data:"))
    }
}

#[test]
fn embedded_detection() -> serde_json::Result<()> {
    let by_view: Image = serde_json::from_str(r#"{ "bufferView": 0, "mimeType": "image/png" }"#)?;
    assert!(by_view.is_embedded());

    let by_data_uri: Image =
        serde_json::from_str(r#"{ "uri": "data:image/png;base64,AAAA" }"#)?;
    assert!(by_data_uri.is_embedded());

    let external: Image = serde_json::from_str(r#"{ "uri": "textures/wood.png" }"#)?;
    assert!(!external.is_embedded());

    Ok(())
}
