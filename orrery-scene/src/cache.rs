use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::Texture;

/// Cache of loaded textures shared across reads, keyed by resolved image
/// location.
///
/// The lock is whole-cache and stays held across the caller's load closure,
/// so concurrent reads resolve each distinct key at most once. Entries are
/// never evicted for the lifetime of the cache.
#[derive(Default)]
pub struct TextureCache {
    entries: Mutex<HashMap<String, Arc<Texture>>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, running `load` under the cache lock on a miss.
    ///
    /// A `load` returning `None` leaves no entry behind, so a later call may
    /// retry the source.
    pub fn get_or_load<F>(&self, key: &str, load: F) -> Option<Arc<Texture>>
    where
        F: FnOnce() -> Option<Arc<Texture>>,
    {
        let mut entries = self.entries.lock();

        if let Some(texture) = entries.get(key) {
            log::debug!("texture cache hit: {key}");
            return Some(Arc::clone(texture));
        }

        let texture = load()?;
        log::debug!("texture cache insert: {key}");
        entries.insert(key.to_owned(), Arc::clone(&texture));
        Some(texture)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
