use serde::Deserialize;

use super::{Buffer, Document};

/// A byte sub-range of a buffer, optionally strided for interleaved data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub buffer: usize,
    pub byte_length: usize,

    #[serde(default)]
    pub byte_offset: usize,

    pub byte_stride: Option<usize>,
}

impl BufferView {
    pub fn buffer<'a: 'b, 'b>(&'a self, doc: &'b Document) -> Option<&'b Buffer> {
        doc.buffers.get(self.buffer)
    }

    /// The viewed bytes, or `None` when the range exceeds the buffer.
    pub fn data<'a: 'b, 'b>(&'a self, doc: &'b Document) -> Option<&'b [u8]> {
        let start = self.byte_offset;
        let end = start.checked_add(self.byte_length)?;

        self.buffer(doc)?.data().get(start..end)
    }
}

#[test]
fn out_of_range_view_yields_none() -> serde_json::Result<()> {
    let mut doc: Document = serde_json::from_str(
        r#"{
            "buffers": [{ "byteLength": 4 }],
            "bufferViews": [
                { "buffer": 0, "byteOffset": 0, "byteLength": 4 },
                { "buffer": 0, "byteOffset": 2, "byteLength": 4 },
                { "buffer": 1, "byteOffset": 0, "byteLength": 4 }
            ]
        }"#,
    )?;
    doc.buffers[0].bind_data(vec![1, 2, 3, 4]);

    assert_eq!(doc.buffer_views[0].data(&doc), Some(&[1u8, 2, 3, 4][..]));
    assert_eq!(doc.buffer_views[1].data(&doc), None);
    assert_eq!(doc.buffer_views[2].data(&doc), None);

    Ok(())
}
