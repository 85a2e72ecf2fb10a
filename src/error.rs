use thiserror::Error;

/// Structural problems in a unit tree. Rendering stops on the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTreeError {
    #[error("unit has an empty qualified path")]
    EmptyPath,

    #[error("unit {path} has an empty name component")]
    EmptyComponent { path: String },

    #[error("unit {path} is not a direct child of {parent}")]
    PathMismatch { path: String, parent: String },

    #[error("module {path} is nested inside another unit")]
    NestedModule { path: String },

    #[error("top-level unit {path} is not a module")]
    RootNotModule { path: String },

    #[error("unit {path} is nested deeper than {limit} levels")]
    TooDeep { path: String, limit: usize },
}

pub type Result<T> = std::result::Result<T, MalformedTreeError>;
