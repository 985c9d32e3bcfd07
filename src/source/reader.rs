use crate::error::BufferError;
use crate::geom::{geojson_to_geometry, parse_geometry};
use crate::source::record::AreaRecord;
use geojson::GeoJson;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::path::Path;

/// Reads boundary features, choosing the reader by file extension.
///
/// `.geojson` and `.json` files must hold a FeatureCollection. `.csv` files
/// need a WKT or GeoJSON `geometry_column`; every other column becomes a
/// text attribute.
pub fn read_features(
    path: impl AsRef<Path>,
    geometry_column: &str,
) -> Result<Vec<AreaRecord>, BufferError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let records = match ext.as_deref() {
        Some("geojson") | Some("json") => read_geojson(path)?,
        Some("csv") => read_csv(path, geometry_column)?,
        _ => {
            return Err(BufferError::IoError(format!(
                "Unsupported source format: {}",
                path.display()
            )));
        }
    };

    tracing::debug!("Read {} features from {}", records.len(), path.display());
    Ok(records)
}

/// Reads a GeoJSON FeatureCollection.
pub fn read_geojson(path: impl AsRef<Path>) -> Result<Vec<AreaRecord>, BufferError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| BufferError::IoError(format!("{}: {}", path.display(), e)))?;
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| BufferError::GeometryParseError(e.to_string()))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(BufferError::GeometryParseError(format!(
                "{} is not a FeatureCollection",
                path.display()
            )));
        }
    };

    collection
        .features
        .into_iter()
        .map(|feature| {
            let geometry = feature.geometry.map(geojson_to_geometry).transpose()?;
            let properties = feature.properties.unwrap_or_default();
            Ok(AreaRecord::new(geometry, properties))
        })
        .collect()
}

/// Reads a CSV table with one geometry column.
pub fn read_csv(
    path: impl AsRef<Path>,
    geometry_column: &str,
) -> Result<Vec<AreaRecord>, BufferError> {
    if geometry_column.is_empty() {
        return Err(BufferError::CsvError(
            "Geometry column name cannot be empty".to_string(),
        ));
    }

    let file = File::open(path.as_ref()).map_err(|e| BufferError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader
        .headers()
        .map_err(|e| BufferError::CsvError(e.to_string()))?
        .clone();

    let geom_idx = headers
        .iter()
        .position(|h| h == geometry_column)
        .ok_or_else(|| {
            BufferError::CsvError(format!("Geometry column '{}' not found", geometry_column))
        })?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| BufferError::CsvError(e.to_string()))?;

        let geometry = match row.get(geom_idx).map(str::trim) {
            Some(s) if !s.is_empty() => Some(parse_geometry(s)?),
            _ => None,
        };

        let mut properties = Map::new();
        for (i, (header, value)) in headers.iter().zip(row.iter()).enumerate() {
            if i != geom_idx {
                properties.insert(header.to_string(), Value::String(value.to_string()));
            }
        }

        records.push(AreaRecord::new(geometry, properties));
    }

    Ok(records)
}
