use thiserror::Error;

/// Errors raised while reading a document.
///
/// `Parse` and `Io` abort a whole read. The other variants are contained:
/// the primitive, node or texture that raised one is skipped with a logged
/// diagnostic and its siblings continue, so the read still returns a
/// best-effort scene.
#[derive(Debug, Error)]
pub enum ReadError {
    /// A structural invariant of the file is violated: missing indices,
    /// out-of-range references, truncated buffers, a cyclic node graph.
    #[error("malformed file: {0}")]
    MalformedFile(String),

    /// A valid construct this reader does not handle.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// A referenced external resource could not be obtained.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// The top-level document failed to decode.
    #[error("failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The top-level document could not be read at all.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
