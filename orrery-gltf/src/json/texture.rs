use serde::Deserialize;

use super::{Document, Image, Sampler};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Texture {
    pub source: Option<usize>,
    pub sampler: Option<usize>,
}

impl Texture {
    pub fn source<'a: 'b, 'b>(&'a self, doc: &'b Document) -> Option<&'b Image> {
        self.source.and_then(|id| doc.images.get(id))
    }

    pub fn sampler<'a: 'b, 'b>(&'a self, doc: &'b Document) -> Option<&'b Sampler> {
        self.sampler.and_then(|id| doc.samplers.get(id))
    }
}
