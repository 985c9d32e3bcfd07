use crate::search::SearchError;
use thiserror::Error;

/// Error type for search-buffers operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BufferError {
    /// The input geometry is missing, empty, degenerate or non-finite.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A required attribute (e.g. land area) is missing or non-positive.
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),
    /// Coordinate projection failed (WGS84 to Web Mercator or back).
    #[error("Projection error: {0}")]
    ProjectionError(String),
    /// File I/O or serialization error.
    #[error("IO error: {0}")]
    IoError(String),
    /// CSV parsing, reading or writing error.
    #[error("CSV error: {0}")]
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParseError(String),
    /// The configuration file is unreadable or holds invalid values.
    #[error("Config error: {0}")]
    ConfigError(String),
    /// The search collaborator could not be set up or queried.
    #[error("Search error: {0}")]
    Search(#[from] SearchError),
}
