//! Serde model of the glTF 2.0 document.
//!
//! Index cross-references resolve through `Option`-returning helpers; an
//! out-of-range index surfaces as `None` and is reported by the conversion
//! layer, never unwrapped here.

mod accessor;
mod asset;
mod buffer;
mod buffer_view;
mod document;
mod image;
mod material;
mod mesh;
mod node;
mod sampler;
mod scene;
mod texture;

pub use self::accessor::*;
pub use self::asset::*;
pub use self::buffer::*;
pub use self::buffer_view::*;
pub use self::document::*;
pub use self::image::*;
pub use self::material::*;
pub use self::mesh::*;
pub use self::node::*;
pub use self::sampler::*;
pub use self::scene::*;
pub use self::texture::*;
