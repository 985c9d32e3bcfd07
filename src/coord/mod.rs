//! Coordinate access and reprojection between WGS84 and Web Mercator.

mod projection;

pub use projection::{Projector, project_rect};

use geo_types::{Coord, Point};

/// Anything with an x/y pair: lon/lat degrees or planar meters.
///
/// x is always longitude or easting.
pub trait Coordinate {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        self.0.x
    }
    fn y(&self) -> f64 {
        self.0.y
    }
}

impl Coordinate for Coord<f64> {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    fn as_pair<C: Coordinate>(c: &C) -> (f64, f64) {
        (c.x(), c.y())
    }

    #[test]
    fn test_longitude_comes_first() {
        let nyc = (-74.006, 40.7128);
        assert_eq!(as_pair(&nyc), (-74.006, 40.7128));
        assert_eq!(as_pair(&Point::new(-74.006, 40.7128)), (-74.006, 40.7128));
        assert_eq!(as_pair(&coord! { x: -74.006, y: 40.7128 }), (-74.006, 40.7128));
    }
}
