//! Texture loading and cross-document caching.

use std::sync::Arc;

use crate::json;
use crate::uri::{self, Location};
use crate::Env;

/// Resolve a texture reference into a shared texture resource.
///
/// Every failure here degrades to an absent handle: the primitive renders
/// untextured instead of failing the mesh. Non-embedded images go through
/// the caller's cache when one was supplied, keyed by resolved location;
/// embedded pixel data is never cached.
pub fn resolve_texture(env: &Env<'_>, texture_index: usize) -> Option<Arc<scene::Texture>> {
    let Some(texture) = env.doc.textures.get(texture_index) else {
        log::warn!("texture index {texture_index} out of range");
        return None;
    };

    let Some(image) = texture.source(env.doc) else {
        log::warn!("texture {texture_index} has no resolvable image source");
        return None;
    };

    if !image.is_embedded() {
        if let (Some(cache), Some(uri_str)) = (env.options.cache.as_deref(), image.uri.as_deref())
        {
            let key = uri::resolve(env.referrer, uri_str).key();
            return cache.get_or_load(&key, || decode_texture(env, texture, image));
        }
    }

    decode_texture(env, texture, image)
}

fn decode_texture(
    env: &Env<'_>,
    texture: &json::Texture,
    image: &json::Image,
) -> Option<Arc<scene::Texture>> {
    let bytes = image_bytes(env, image)?;

    let decoded = match image::load_from_memory(&bytes) {
        Ok(decoded) => decoded,
        Err(err) => {
            log::warn!("failed to decode image {:?}: {err}", image.name);
            return None;
        }
    };

    let (format, width, height, pixels) = if decoded.color().has_alpha() {
        let buf = decoded.to_rgba8();
        let (width, height) = buf.dimensions();
        (scene::PixelFormat::Rgba8, width, height, buf.into_raw())
    } else {
        let buf = decoded.to_rgb8();
        let (width, height) = buf.dimensions();
        (scene::PixelFormat::Rgb8, width, height, buf.into_raw())
    };

    let sampler = texture
        .sampler(env.doc)
        .map(json::Sampler::state)
        .unwrap_or_default();

    Some(Arc::new(
        scene::Texture::new(scene::ImageData {
            width,
            height,
            format,
            pixels,
        })
        .with_sampler(sampler),
    ))
}

/// Undecoded image bytes from whichever source the image declares.
fn image_bytes(env: &Env<'_>, image: &json::Image) -> Option<Vec<u8>> {
    if image.buffer_view.is_some() {
        let Some(bytes) = image.buffer_view(env.doc).and_then(|view| view.data(env.doc)) else {
            log::warn!("image {:?} has an unresolvable buffer view", image.name);
            return None;
        };
        return Some(bytes.to_vec());
    }

    let Some(uri_str) = image.uri.as_deref() else {
        log::warn!("image {:?} has neither uri nor buffer view", image.name);
        return None;
    };

    if uri::is_data_uri(uri_str) {
        let bytes = uri::data_uri_bytes(uri_str);
        if bytes.is_none() {
            log::warn!("image {:?} has an undecodable data uri", image.name);
        }
        return bytes;
    }

    match uri::resolve(env.referrer, uri_str) {
        Location::File(path) => match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::warn!("failed to read image {}: {err}", path.display());
                None
            }
        },
        Location::Url(url) => match env.options.fetcher.as_deref() {
            Some(fetcher) => match fetcher.fetch(&url) {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    log::warn!("failed to fetch image {url}: {err}");
                    None
                }
            },
            None => {
                log::warn!("no fetcher for network image {url}");
                None
            }
        },
    }
}
