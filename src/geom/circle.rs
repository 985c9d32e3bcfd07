use crate::coord::Coordinate;
use geo_types::{Coord, LineString, Polygon};
use std::f64::consts::TAU;

/// Approximates a round buffer with `segments` vertices on the circle.
///
/// The ring is closed, so the exterior holds `segments + 1` coordinates.
/// Fewer than three segments are raised to three.
pub fn create_circle<C: Coordinate>(center: &C, radius: f64, segments: usize) -> Polygon<f64> {
    let segments = segments.max(3);
    let mut coords = Vec::with_capacity(segments + 1);

    for i in 0..segments {
        let angle = TAU * i as f64 / segments as f64;
        coords.push(Coord {
            x: center.x() + radius * angle.cos(),
            y: center.y() + radius * angle.sin(),
        });
    }
    coords.push(coords[0]);

    Polygon::new(LineString::from(coords), vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;
    use geo_types::point;
    use std::f64::consts::PI;

    #[test]
    fn test_create_circle() {
        let circle = create_circle(&(100.0, 100.0), 10.0, 32);
        let exterior = circle.exterior();
        assert_eq!(exterior.coords().count(), 33);
        assert_eq!(exterior.0[0], exterior.0[32]);

        for c in exterior.coords() {
            let d = ((c.x - 100.0).powi(2) + (c.y - 100.0).powi(2)).sqrt();
            assert!((d - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_circle_area_approaches_pi_r_squared() {
        let center = point! { x: 0.0, y: 0.0 };
        let circle = create_circle(&center, 1000.0, 256);
        let expected = PI * 1000.0 * 1000.0;
        assert!((circle.unsigned_area() - expected).abs() / expected < 0.001);
    }

    #[test]
    fn test_minimum_segments() {
        let circle = create_circle(&(0.0, 0.0), 1.0, 1);
        assert_eq!(circle.exterior().coords().count(), 4);
    }
}
