use crate::error::BufferError;
use crate::fit::{BufferSpec, PLANAR_CRS};
use arrow_array::{Float64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::PolygonArray;
use geoarrow_array::builder::PolygonBuilder;
use geoarrow_schema::{Crs, Dimension, Metadata, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

fn planar_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code(PLANAR_CRS.to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Converts buffer specs to Arrow, materializing each as a round polygon.
///
/// Implemented for `[BufferSpec]` and `Vec<BufferSpec>`.
pub trait BuffersToArrow {
    /// Buffer polygons in the planar CRS.
    fn to_arrow_polygons(&self, segments: usize) -> PolygonArray;
    /// RecordBatch with region_id, name, kind, radius_m, buff and geometry.
    fn to_record_batch(&self, segments: usize) -> Result<RecordBatch, BufferError>;
}

impl BuffersToArrow for [BufferSpec] {
    fn to_arrow_polygons(&self, segments: usize) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, planar_metadata());
        let polygons: Vec<_> = self
            .par_iter()
            .map(|spec: &BufferSpec| spec.to_polygon(segments))
            .collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self, segments: usize) -> Result<RecordBatch, BufferError> {
        let polygon_array = self.to_arrow_polygons(segments);
        let region_ids: StringArray = self.iter().map(|s| Some(s.region_id())).collect();
        let names: StringArray = self.iter().map(|s| Some(s.name())).collect();
        let kinds: StringArray = self.iter().map(|s| Some(s.kind().to_string())).collect();
        let radii: Float64Array = self.iter().map(|s| Some(s.radius_m())).collect();
        let buffs: StringArray = self.iter().map(|s| Some(s.radius_string())).collect();

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("region_id", DataType::Utf8, false),
            Field::new("name", DataType::Utf8, false),
            Field::new("kind", DataType::Utf8, false),
            Field::new("radius_m", DataType::Float64, false),
            Field::new("buff", DataType::Utf8, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(region_ids),
                Arc::new(names),
                Arc::new(kinds),
                Arc::new(radii),
                Arc::new(buffs),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| BufferError::IoError(e.to_string()))
    }
}

impl BuffersToArrow for Vec<BufferSpec> {
    fn to_arrow_polygons(&self, segments: usize) -> PolygonArray {
        self.as_slice().to_arrow_polygons(segments)
    }

    fn to_record_batch(&self, segments: usize) -> Result<RecordBatch, BufferError> {
        self.as_slice().to_record_batch(segments)
    }
}
