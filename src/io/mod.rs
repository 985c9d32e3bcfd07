pub mod arrow;
pub mod parquet;

pub use self::arrow::BuffersToArrow;
pub use self::parquet::{BuffersToGeoParquet, write_geoparquet};
