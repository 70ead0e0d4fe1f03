//! Error types for map loading.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::property::PropertyKind;

/// Failure of a typed accessor on a decoded [`Property`](crate::Property).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    #[error("property `{name}` is a {found}, expected a {expected}")]
    KindMismatch {
        name: String,
        expected: PropertyKind,
        found: PropertyKind,
    },
    #[error("property `{name}` has no member `{key}`")]
    MissingKey { name: String, key: String },
}

/// Location of a map cell that failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    /// Index of the layer in the map's `layers` list.
    pub layer: usize,
    /// Position within the layer's flat index list.
    pub index: usize,
    pub column: usize,
    pub row: usize,
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "layer {} cell ({}, {}) [#{}]",
            self.layer, self.column, self.row, self.index
        )
    }
}

/// Why a single cell could not be classified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileFault {
    #[error("tile index {index} is outside the tileset (tileset has {len} entries)")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("tile index {0} is negative")]
    NegativeIndex(i64),
    #[error("tile index {0} is not an integer")]
    FractionalIndex(f64),
    #[error("tileset entry {0} has no properties")]
    EmptyTileRecord(usize),
    #[error("tile type {0} does not fit a tile classification")]
    TypeOutOfRange(f64),
    #[error("tile type property `{name}` is a {found}, expected a number")]
    NotNumeric { name: String, found: PropertyKind },
}

/// Errors returned by the decode, resolve and composite pipeline.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{document} is not valid JSON: {source}")]
    MalformedDocument {
        document: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{document}: `{key}` {reason}")]
    SchemaViolation {
        document: String,
        key: String,
        reason: String,
    },
    #[error("cannot resolve {cell}: {fault}")]
    TileResolution { cell: CellRef, fault: TileFault },
    #[error("canvas needs {expected} tile cells but only {actual} were resolved")]
    GridMismatch { expected: usize, actual: usize },
    #[error("invalid loader configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode map image: {0}")]
    Image(#[from] image::ImageError),
}

impl LoadError {
    pub(crate) fn schema(
        document: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LoadError::SchemaViolation {
            document: document.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Lift an accessor failure into a schema violation on `document`.
    pub(crate) fn from_property(document: &str, err: PropertyError) -> Self {
        match err {
            PropertyError::KindMismatch {
                name,
                expected,
                found,
            } => Self::schema(
                document,
                name,
                format!("must be a {}, found a {}", expected, found),
            ),
            PropertyError::MissingKey { name, key } => {
                let key = if name.is_empty() || name == document {
                    key
                } else {
                    format!("{}.{}", name, key)
                };
                Self::schema(document, key, "is missing")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
