use byteorder::{ByteOrder, LE};
use serde::Deserialize;

use super::*;
use crate::error::ReadError;

/// A parsed glTF document. Immutable once its buffers are resolved.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub asset: Option<Asset>,

    pub scene: Option<usize>,

    #[serde(default)]
    pub accessors: Vec<Accessor>,

    #[serde(default)]
    pub buffer_views: Vec<BufferView>,

    #[serde(default)]
    pub buffers: Vec<Buffer>,

    #[serde(default)]
    pub images: Vec<Image>,

    #[serde(default)]
    pub materials: Vec<Material>,

    #[serde(default)]
    pub meshes: Vec<Mesh>,

    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub samplers: Vec<Sampler>,

    #[serde(default)]
    pub scenes: Vec<Scene>,

    #[serde(default)]
    pub textures: Vec<Texture>,
}

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_HEADER_SIZE: usize = 12;
const CHUNK_HEADER_SIZE: usize = 8;

impl Document {
    /// Parse either form of the format, sniffing the binary magic.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ReadError> {
        if bytes.starts_with(GLB_MAGIC) {
            Self::from_glb_slice(bytes)
        } else {
            Self::from_json_slice(bytes)
        }
    }

    /// Parse the JSON text form.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ReadError> {
        let doc: Document = serde_json::from_slice(bytes)?;
        doc.check_version()?;
        Ok(doc)
    }

    /// Parse the binary container: a fixed header followed by chunks, of
    /// which `JSON` holds the document and `BIN\0` the buffer blob.
    pub fn from_glb_slice(bytes: &[u8]) -> Result<Self, ReadError> {
        let header = bytes
            .get(..GLB_HEADER_SIZE)
            .ok_or_else(|| ReadError::MalformedFile("truncated binary header".into()))?;

        if &header[..4] != GLB_MAGIC {
            return Err(ReadError::MalformedFile("invalid binary magic".into()));
        }

        let version = LE::read_u32(&header[4..]);
        if version != 2 {
            return Err(ReadError::UnsupportedFeature(format!(
                "binary container version {version}"
            )));
        }

        let length = (LE::read_u32(&header[8..]) as usize).min(bytes.len());

        let mut doc: Option<Document> = None;
        let mut blob: Option<Vec<u8>> = None;

        let mut cursor = GLB_HEADER_SIZE;
        while cursor + CHUNK_HEADER_SIZE <= length {
            let chunk_length = LE::read_u32(&bytes[cursor..]) as usize;
            let chunk_type = &bytes[cursor + 4..cursor + CHUNK_HEADER_SIZE];

            let data_start = cursor + CHUNK_HEADER_SIZE;
            let data = bytes
                .get(data_start..data_start + chunk_length)
                .ok_or_else(|| ReadError::MalformedFile("truncated chunk".into()))?;

            match chunk_type {
                b"JSON" => doc = Some(serde_json::from_slice(data)?),
                b"BIN\0" => blob = Some(data.to_vec()),
                other => {
                    log::debug!(
                        "ignoring unknown chunk type {:?}",
                        String::from_utf8_lossy(other)
                    );
                }
            }

            // Chunks are 4-byte aligned.
            cursor = data_start + chunk_length + (4 - chunk_length % 4) % 4;
        }

        let mut doc =
            doc.ok_or_else(|| ReadError::MalformedFile("no JSON chunk in file".into()))?;
        doc.check_version()?;

        if let Some(blob) = blob {
            doc.bind_blob(blob);
        }

        Ok(doc)
    }

    fn check_version(&self) -> Result<(), ReadError> {
        match &self.asset {
            Some(asset) if !asset.version.starts_with('2') => Err(ReadError::UnsupportedFeature(
                format!("asset version {}", asset.version),
            )),
            _ => Ok(()),
        }
    }

    /// Attach the binary container blob to the buffer that declares no URI.
    fn bind_blob(&mut self, blob: Vec<u8>) {
        if let Some(buffer) = self.buffers.iter_mut().find(|buffer| buffer.uri.is_none()) {
            buffer.bind_data(blob);
        }
    }
}
