use crate::coord::Coordinate;
use crate::error::BufferError;
use crate::fit::{GEOGRAPHIC_CRS, PLANAR_CRS, PlanarBounds};
use geo_types::{Point, Rect};
use proj::Proj;

/// One-way coordinate transform between two known CRSs.
///
/// Axis order is normalized by PROJ, so input and output are always x
/// before y (longitude/easting first).
pub struct Projector {
    proj: Proj,
    from: String,
    to: String,
}

impl Projector {
    pub fn new(from: &str, to: &str) -> Result<Self, BufferError> {
        let proj = Proj::new_known_crs(from, to, None)
            .map_err(|e| BufferError::ProjectionError(e.to_string()))?;
        Ok(Self {
            proj,
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// WGS84 lon/lat (EPSG:4326) to Web Mercator meters (EPSG:3857).
    pub fn to_web_mercator() -> Result<Self, BufferError> {
        Self::new(GEOGRAPHIC_CRS, PLANAR_CRS)
    }

    /// Web Mercator meters (EPSG:3857) back to WGS84 lon/lat (EPSG:4326).
    pub fn to_wgs84() -> Result<Self, BufferError> {
        Self::new(PLANAR_CRS, GEOGRAPHIC_CRS)
    }

    pub fn convert<C: Coordinate>(&self, coord: &C) -> Result<Point<f64>, BufferError> {
        let (x, y) = self.proj.convert((coord.x(), coord.y())).map_err(|e| {
            BufferError::ProjectionError(format!(
                "{} -> {} failed for ({}, {}): {}",
                self.from,
                self.to,
                coord.x(),
                coord.y(),
                e
            ))
        })?;
        Ok(Point::new(x, y))
    }
}

impl std::fmt::Debug for Projector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Projector")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

/// Projects a geographic bounding rectangle into planar bounds.
///
/// Lower-left and upper-right corners are projected independently.
pub fn project_rect(projector: &Projector, rect: &Rect<f64>) -> Result<PlanarBounds, BufferError> {
    let min = projector.convert(&rect.min())?;
    let max = projector.convert(&rect.max())?;
    Ok(PlanarBounds::from_rect(&Rect::new(min, max)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn test_origin_maps_to_origin() -> Result<(), BufferError> {
        let projector = Projector::to_web_mercator()?;
        let p = projector.convert(&(0.0, 0.0))?;

        assert!(p.x().abs() < 1e-6);
        assert!(p.y().abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_known_web_mercator_value() -> Result<(), BufferError> {
        // Longitude 180 sits on the half circumference of the WGS84 sphere.
        let projector = Projector::to_web_mercator()?;
        let p = projector.convert(&(180.0, 0.0))?;

        assert!((p.x() - 20_037_508.342789244).abs() < 0.01);
        Ok(())
    }

    #[test]
    fn test_roundtrip() -> Result<(), BufferError> {
        let forward = Projector::to_web_mercator()?;
        let inverse = Projector::to_wgs84()?;

        let lon = -74.0060;
        let lat = 40.7128;
        let planar = forward.convert(&(lon, lat))?;
        let back = inverse.convert(&planar)?;

        assert!(planar.x() < -8_000_000.0 && planar.x() > -8_500_000.0);
        assert!((lon - back.x()).abs() < 1e-7);
        assert!((lat - back.y()).abs() < 1e-7);
        Ok(())
    }

    #[test]
    fn test_project_rect_keeps_corner_order() -> Result<(), BufferError> {
        let projector = Projector::to_web_mercator()?;
        let rect = Rect::new(coord! { x: -74.3, y: 40.5 }, coord! { x: -73.7, y: 40.9 });
        let bounds = project_rect(&projector, &rect)?;

        assert!(bounds.min_x < bounds.max_x);
        assert!(bounds.min_y < bounds.max_y);
        assert!(bounds.width() > 60_000.0 && bounds.width() < 70_000.0);
        Ok(())
    }
}
