use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while loading templates or manipulating the scene graph.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The template file could not be read.
    #[error("cannot read templates from {path}: {source}")]
    TemplateIo {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The template document is not valid JSON or has the wrong shape.
    #[error("malformed template catalog: {0}")]
    TemplateParse(#[from] serde_json::Error),

    /// The catalog declares no locations at all.
    #[error("template catalog has no locations")]
    EmptyCatalog,

    /// The requested scene does not exist in the graph.
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// A scene with this id is already part of the graph.
    #[error("scene already exists: {0}")]
    DuplicateScene(String),
}
