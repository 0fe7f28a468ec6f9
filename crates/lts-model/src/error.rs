use thiserror::Error;

/// Errors raised while constructing model values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// Marker id text that does not look like `<scan>-<index>`.
    #[error("Invalid placeholder id: {0}")]
    InvalidPlaceholderId(String),

    /// Template family key that is not in the known family list.
    #[error("Unknown template family: {0}")]
    UnknownFamily(String),

    /// Variable name that cannot be used inside a `{{...}}` token.
    #[error("Invalid variable name: {0:?}")]
    InvalidVariableName(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
