use std::{error::Error, fmt};

/// Failure to load a static corpus at start-up.
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {path}: {source}"),
            Self::Parse { path, source } => write!(f, "failed to parse {path}: {source}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Failure raised by a product source or the catalog aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    SourceFailed { source: String, message: String },
    NotFound(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceFailed { source, message } => {
                write!(f, "supplier {source} failed: {message}")
            }
            Self::NotFound(id) => write!(f, "product not found: {id}"),
        }
    }
}

impl Error for CatalogError {}

pub type CatalogResult<T> = Result<T, CatalogError>;
