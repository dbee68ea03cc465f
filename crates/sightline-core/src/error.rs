use thiserror::Error;

/// Errors raised while building the layer table at startup. Runtime
/// occlusion sampling never returns errors; degenerate frames fall back
/// to "visible" and stale handles are purged silently.
#[derive(Debug, Error)]
pub enum LayerError {
    #[error("layer table is full ({0} layers max)")]
    TableFull(usize),

    #[error("layer '{0}' is already registered")]
    DuplicateName(String),
}
