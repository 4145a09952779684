//! Resolution of buffer and image locations against the referring document.

use std::path::{Path, PathBuf};

use base64::Engine;

/// Where a URI points after resolution against the referrer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Url(String),
}

impl Location {
    /// Stable string identity, used as the texture cache key.
    pub fn key(&self) -> String {
        match self {
            // Collapse `./` and symlink aliases so the same file caches once.
            Location::File(path) => std::fs::canonicalize(path)
                .unwrap_or_else(|_| path.clone())
                .display()
                .to_string(),
            Location::Url(url) => url.clone(),
        }
    }
}

pub fn is_data_uri(uri: &str) -> bool {
    uri.starts_with("data:")
}

pub fn is_server_location(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

/// Decoded payload of a base64 `data:` URI, or `None` for any other URI.
pub fn data_uri_bytes(uri: &str) -> Option<Vec<u8>> {
    let rest = uri.strip_prefix("data:")?;
    let (_, encoded) = rest.split_once(";base64,")?;
    base64::engine::general_purpose::STANDARD.decode(encoded).ok()
}

/// Resolve `uri` relative to the location of the referring document.
pub fn resolve(referrer: Option<&str>, uri: &str) -> Location {
    if is_server_location(uri) {
        return Location::Url(uri.to_owned());
    }

    match referrer {
        Some(referrer) if is_server_location(referrer) => {
            let base = referrer.rsplit_once('/').map_or("", |(base, _)| base);
            Location::Url(format!("{base}/{uri}"))
        }
        Some(referrer) if !Path::new(uri).is_absolute() => {
            let dir = Path::new(referrer).parent().unwrap_or_else(|| Path::new(""));
            Location::File(dir.join(uri))
        }
        _ => Location::File(PathBuf::from(uri)),
    }
}
