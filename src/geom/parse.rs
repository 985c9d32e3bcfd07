use crate::error::BufferError;
use geo_types::Geometry;
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Parses a geometry cell from a CSV source, auto-detecting WKT or GeoJSON.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
/// Blank input is reported as an invalid geometry rather than a parse error.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, BufferError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(BufferError::InvalidGeometry(
            "Geometry value is empty".to_string(),
        ));
    }
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON geometry or single feature into a `geo_types::Geometry`.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, BufferError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| BufferError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => geojson_to_geometry(geom),
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| BufferError::InvalidGeometry("Feature has no geometry".to_string()))
            .and_then(geojson_to_geometry),
        GeoJson::FeatureCollection(_) => Err(BufferError::GeometryParseError(
            "Expected a single geometry, found a FeatureCollection".to_string(),
        )),
    }
}

/// Converts a decoded GeoJSON geometry into `geo_types`.
pub fn geojson_to_geometry(geom: geojson::Geometry) -> Result<Geometry<f64>, BufferError> {
    Geometry::try_from(geom).map_err(|e| BufferError::GeometryParseError(e.to_string()))
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, BufferError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| BufferError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        BufferError::GeometryParseError("WKT value has no geo-types equivalent".to_string())
    })
}
