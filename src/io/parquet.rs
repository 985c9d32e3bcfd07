use crate::error::BufferError;
use crate::fit::BufferSpec;
use crate::io::arrow::BuffersToArrow;
use arrow_array::RecordBatch;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::path::Path;

/// Writes one RecordBatch with a geometry column to a WKB-encoded GeoParquet file.
pub fn write_geoparquet(batch: &RecordBatch, path: impl AsRef<Path>) -> Result<(), BufferError> {
    let io_err = |e: &dyn std::fmt::Display| BufferError::IoError(e.to_string());

    let options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();
    let mut encoder = GeoParquetRecordBatchEncoder::try_new(&batch.schema(), &options)
        .map_err(|e| io_err(&e))?;

    let file = File::create(path.as_ref()).map_err(|e| io_err(&e))?;
    let mut writer =
        ArrowWriter::try_new(file, encoder.target_schema(), None).map_err(|e| io_err(&e))?;

    let encoded = encoder.encode_record_batch(batch).map_err(|e| io_err(&e))?;
    writer.write(&encoded).map_err(|e| io_err(&e))?;

    let kv_metadata = encoder.into_keyvalue().map_err(|e| io_err(&e))?;
    writer.append_key_value_metadata(kv_metadata);
    writer.finish().map_err(|e| io_err(&e))?;

    Ok(())
}

/// Writes materialized buffer polygons as a GeoParquet layer.
pub trait BuffersToGeoParquet: BuffersToArrow {
    fn to_geoparquet(&self, path: impl AsRef<Path>, segments: usize) -> Result<(), BufferError>;
}

impl BuffersToGeoParquet for [BufferSpec] {
    fn to_geoparquet(&self, path: impl AsRef<Path>, segments: usize) -> Result<(), BufferError> {
        let batch = self.to_record_batch(segments)?;
        write_geoparquet(&batch, path)
    }
}

impl BuffersToGeoParquet for Vec<BufferSpec> {
    fn to_geoparquet(&self, path: impl AsRef<Path>, segments: usize) -> Result<(), BufferError> {
        self.as_slice().to_geoparquet(path, segments)
    }
}
