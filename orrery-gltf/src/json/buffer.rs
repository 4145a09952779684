use serde::Deserialize;

/// A raw byte buffer. `data` is filled in after parsing, either from the
/// binary container blob or by resolving `uri`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    pub byte_length: usize,
    pub uri: Option<String>,

    #[serde(skip)]
    pub(crate) data: Vec<u8>,
}

impl Buffer {
    pub(crate) fn bind_data(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
