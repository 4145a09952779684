pub use gltf;
pub use scene;
