#![warn(clippy::all)]

//! Reader converting glTF 2.0 documents into [`scene`] graph fragments.
//!
//! Both the JSON text form and the binary container are handled. One call
//! converts one document; malformed primitives, nodes and textures are
//! contained with logged diagnostics and the rest of the scene is still
//! returned. Only a top-level decode failure aborts the read.

pub mod json;

mod builder;
mod error;
mod extract;
mod primitive;
mod texture;
mod uri;
mod view;

use std::path::Path;
use std::sync::Arc;

use scene::TextureCache;

pub use error::ReadError;

use crate::uri::Location;

/// Collaborator fetching network-located resources.
///
/// Supplied by the host when documents may reference `http(s)` buffers or
/// images; without one those sources are unsupported.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> std::io::Result<Vec<u8>>;
}

/// Conversion settings.
#[derive(Default)]
pub struct ReadOptions {
    /// Leave normals unbound instead of generating smooth normals when the
    /// source provides none.
    pub skip_normals: bool,

    /// Texture cache shared across reads. Omitting it disables
    /// deduplication; every read then decodes its own textures.
    pub cache: Option<Arc<TextureCache>>,

    /// Fetch service for network-located resources.
    pub fetcher: Option<Arc<dyn Fetcher>>,
}

/// Per-read state threaded through the conversion pipeline.
pub(crate) struct Env<'a> {
    pub(crate) doc: &'a json::Document,
    pub(crate) referrer: Option<&'a str>,
    pub(crate) options: &'a ReadOptions,
}

/// Read a document from a file path.
pub fn read_path(path: impl AsRef<Path>, options: &ReadOptions) -> Result<scene::Node, ReadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    read_slice(&bytes, path.to_str(), options)
}

/// Read a document from a file path or an `http(s)` location.
pub fn read_location(location: &str, options: &ReadOptions) -> Result<scene::Node, ReadError> {
    if uri::is_server_location(location) {
        let fetcher = options.fetcher.as_deref().ok_or_else(|| {
            ReadError::UnsupportedFeature(format!("network location {location} without a fetcher"))
        })?;
        let bytes = fetcher
            .fetch(location)
            .map_err(|err| ReadError::ResourceUnavailable(format!("{location}: {err}")))?;
        read_slice(&bytes, Some(location), options)
    } else {
        read_path(location, options)
    }
}

/// Read a document already in memory.
///
/// `referrer` is the location the bytes came from; relative buffer and
/// image URIs resolve against it.
pub fn read_slice(
    bytes: &[u8],
    referrer: Option<&str>,
    options: &ReadOptions,
) -> Result<scene::Node, ReadError> {
    let mut doc = json::Document::from_slice(bytes)?;
    resolve_buffers(&mut doc, referrer, options)?;

    let env = Env {
        doc: &doc,
        referrer,
        options,
    };
    Ok(builder::build_scene(&env))
}

/// Fill in every buffer's payload. An unresolvable buffer fails the whole
/// read; unlike textures there is nothing to degrade to.
fn resolve_buffers(
    doc: &mut json::Document,
    referrer: Option<&str>,
    options: &ReadOptions,
) -> Result<(), ReadError> {
    for index in 0..doc.buffers.len() {
        if !doc.buffers[index].data().is_empty() {
            // Already bound from the binary container blob.
            continue;
        }

        let Some(uri_str) = doc.buffers[index].uri.clone() else {
            if doc.buffers[index].byte_length == 0 {
                continue;
            }
            return Err(ReadError::MalformedFile(format!(
                "buffer {index} has neither uri nor binary blob"
            )));
        };

        let data = if uri::is_data_uri(&uri_str) {
            uri::data_uri_bytes(&uri_str).ok_or_else(|| {
                ReadError::MalformedFile(format!("buffer {index} has an undecodable data uri"))
            })?
        } else {
            match uri::resolve(referrer, &uri_str) {
                Location::File(path) => std::fs::read(&path).map_err(|err| {
                    ReadError::ResourceUnavailable(format!(
                        "buffer {}: {err}",
                        path.display()
                    ))
                })?,
                Location::Url(url) => match options.fetcher.as_deref() {
                    Some(fetcher) => fetcher.fetch(&url).map_err(|err| {
                        ReadError::ResourceUnavailable(format!("buffer {url}: {err}"))
                    })?,
                    None => {
                        return Err(ReadError::UnsupportedFeature(format!(
                            "network buffer {url} without a fetcher"
                        )))
                    }
                },
            }
        };

        if data.len() < doc.buffers[index].byte_length {
            // Views over the missing tail fail accessor validation later.
            log::debug!(
                "buffer {index}: resolved {} bytes, declared {}",
                data.len(),
                doc.buffers[index].byte_length
            );
        }

        doc.buffers[index].bind_data(data);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use base64::Engine;

    use super::*;
    use scene::{ArrayData, DrawMode, Indices, Node};

    /// 36 bytes of vec3 positions followed by three u16 indices.
    fn triangle_buffer() -> Vec<u8> {
        let positions: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let mut bytes: Vec<u8> = positions
            .iter()
            .flatten()
            .flat_map(|value| value.to_le_bytes())
            .collect();
        for index in [0u16, 1, 2] {
            bytes.extend_from_slice(&index.to_le_bytes());
        }
        bytes
    }

    fn triangle_json(buffer_field: &str) -> String {
        format!(
            r#"{{
                "asset": {{ "version": "2.0" }},
                "scenes": [{{ "nodes": [0] }}],
                "nodes": [{{ "name": "tri", "mesh": 0 }}],
                "meshes": [{{
                    "primitives": [{{ "attributes": {{ "POSITION": 0 }}, "indices": 1 }}]
                }}],
                "accessors": [
                    {{ "bufferView": 0, "componentType": 5126, "type": "VEC3", "count": 3 }},
                    {{ "bufferView": 1, "componentType": 5123, "type": "SCALAR", "count": 3 }}
                ],
                "bufferViews": [
                    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
                    {{ "buffer": 0, "byteOffset": 36, "byteLength": 6 }}
                ],
                "buffers": [{{ "byteLength": 42, {buffer_field} }}]
            }}"#
        )
    }

    fn data_uri_field() -> String {
        format!(
            r#""uri": "data:application/octet-stream;base64,{}""#,
            base64::engine::general_purpose::STANDARD.encode(triangle_buffer())
        )
    }

    /// Root transform -> node transform -> mesh group -> geometry.
    fn only_geometry(root: &Node) -> &scene::Geometry {
        let Node::Transform(root) = root else {
            panic!("expected a transform root");
        };
        let Node::Transform(node) = &root.children[0] else {
            panic!("expected a node transform");
        };
        let Node::Group(group) = &node.children[0] else {
            panic!("expected a mesh group");
        };
        let Node::Geometry(geometry) = &group.children[0] else {
            panic!("expected a geometry leaf");
        };
        geometry
    }

    #[test]
    fn minimal_triangle_document() {
        let json = triangle_json(&data_uri_field());
        let root = read_slice(json.as_bytes(), None, &ReadOptions::default()).unwrap();

        assert_eq!(root.geometry_count(), 1);

        let geometry = only_geometry(&root);
        assert_eq!(geometry.vertex_count(), 3);

        let set = &geometry.primitive_sets[0];
        assert_eq!(set.mode, Some(DrawMode::Triangles));
        assert_eq!(set.indices, Indices::U16(vec![0, 1, 2]));

        let colors = geometry.colors.as_ref().unwrap();
        assert_eq!(colors.len(), 3);
        assert_eq!(colors.data, ArrayData::Vec4(vec![glam::Vec4::ONE; 3]));
    }

    #[test]
    fn external_buffer_resolves_against_referrer() {
        let dir = std::env::temp_dir().join(format!("orrery-read-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("tri.bin"), triangle_buffer()).unwrap();

        let gltf_path = dir.join("tri.gltf");
        std::fs::write(&gltf_path, triangle_json(r#""uri": "tri.bin""#)).unwrap();

        let root = read_path(&gltf_path, &ReadOptions::default()).unwrap();
        assert_eq!(root.geometry_count(), 1);
        assert_eq!(only_geometry(&root).vertex_count(), 3);

        std::fs::remove_file(dir.join("tri.bin")).ok();
        std::fs::remove_file(&gltf_path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn missing_external_buffer_is_fatal() {
        let json = triangle_json(r#""uri": "never-written.bin""#);
        let result = read_slice(json.as_bytes(), None, &ReadOptions::default());

        assert!(matches!(result, Err(ReadError::ResourceUnavailable(_))));
    }

    #[test]
    fn binary_container_end_to_end() {
        let json = triangle_json(r#""unused": 0"#).replace(r#", "unused": 0"#, "");
        let mut bytes = Vec::new();

        let json_bytes = json.as_bytes();
        let json_padding = (4 - json_bytes.len() % 4) % 4;
        let blob = triangle_buffer();
        let blob_padding = (4 - blob.len() % 4) % 4;

        bytes.extend_from_slice(b"glTF");
        bytes.extend_from_slice(&2u32.to_le_bytes());
        let total = 12 + 8 + json_bytes.len() + json_padding + 8 + blob.len() + blob_padding;
        bytes.extend_from_slice(&(total as u32).to_le_bytes());

        bytes.extend_from_slice(&((json_bytes.len() + json_padding) as u32).to_le_bytes());
        bytes.extend_from_slice(b"JSON");
        bytes.extend_from_slice(json_bytes);
        bytes.extend(std::iter::repeat(b' ').take(json_padding));

        bytes.extend_from_slice(&((blob.len() + blob_padding) as u32).to_le_bytes());
        bytes.extend_from_slice(b"BIN\0");
        bytes.extend_from_slice(&blob);
        bytes.extend(std::iter::repeat(0u8).take(blob_padding));

        let root = read_slice(&bytes, None, &ReadOptions::default()).unwrap();
        assert_eq!(root.geometry_count(), 1);
    }

    #[test]
    fn unparseable_document_is_fatal() {
        let result = read_slice(b"{ not json", None, &ReadOptions::default());
        assert!(matches!(result, Err(ReadError::Parse(_))));
    }
}
