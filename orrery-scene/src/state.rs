use std::sync::Arc;

use crate::Texture;

/// Render state attached to a drawable.
///
/// `blend` and `transparent_bin` are set together by readers when a material
/// requests alpha blending; hosts that sort by render bin draw such
/// geometry after the opaque pass.
#[derive(Debug, Clone, Default)]
pub struct StateSet {
    pub base_color_texture: Option<Arc<Texture>>,
    pub emissive_texture: Option<Arc<Texture>>,
    pub blend: bool,
    pub transparent_bin: bool,
}

impl StateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_transparent(&mut self) {
        self.blend = true;
        self.transparent_bin = true;
    }
}
