use crate::coord::Coordinate;
use crate::error::BufferError;
use geo_types::{Point, Rect};
use rayon::prelude::*;
use std::f64::consts::PI;

/// Axis-aligned bounding rectangle in a planar CRS (meters).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl PlanarBounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn from_rect(rect: &Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The four corners, counter-clockwise from the lower left.
    pub fn corners(&self) -> [Point<f64>; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

/// A fitted circle: center and radius in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleFit {
    pub center: Point<f64>,
    pub radius_m: f64,
}

/// Fits the circle passing through all four corners of a planar rectangle.
///
/// The center is the rectangle midpoint and the radius is its half-diagonal,
/// so the rectangle is always fully covered. Neighbouring cities may end up
/// inside each other's circles; no overlap resolution happens here.
///
/// # Example
/// ```
/// use search_buffers::{PlanarBounds, city_fit};
///
/// # fn main() -> Result<(), search_buffers::BufferError> {
/// let fit = city_fit(&PlanarBounds::new(0.0, 0.0, 2000.0, 1000.0))?;
/// assert_eq!(fit.center.x(), 1000.0);
/// assert_eq!(fit.center.y(), 500.0);
/// assert!((fit.radius_m - 1118.034).abs() < 0.001);
/// # Ok(())
/// # }
/// ```
pub fn city_fit(bounds: &PlanarBounds) -> Result<CircleFit, BufferError> {
    let PlanarBounds {
        min_x,
        min_y,
        max_x,
        max_y,
    } = *bounds;

    if ![min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite()) {
        return Err(BufferError::InvalidGeometry(format!(
            "Bounds contain non-finite values: {:?}",
            bounds
        )));
    }
    if min_x > max_x || min_y > max_y {
        return Err(BufferError::InvalidGeometry(format!(
            "Bounds are inverted: {:?}",
            bounds
        )));
    }
    if min_x == max_x && min_y == max_y {
        return Err(BufferError::InvalidGeometry(
            "Bounds collapse to a single point".to_string(),
        ));
    }

    let center = Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
    let half_w = bounds.width() / 2.0;
    let half_h = bounds.height() / 2.0;
    let radius_m = (half_w * half_w + half_h * half_h).sqrt();

    checked_fit(center, radius_m)
}

/// Fits the area-equivalent circle for a state, scaled by `shrink`.
///
/// `radius = shrink * sqrt(land_area_m2 / pi)`, centered on the given centroid.
pub fn state_fit<C: Coordinate>(
    centroid: &C,
    land_area_m2: f64,
    shrink: f64,
) -> Result<CircleFit, BufferError> {
    if !land_area_m2.is_finite() || land_area_m2 <= 0.0 {
        return Err(BufferError::InvalidAttribute(format!(
            "Land area must be positive, got {}",
            land_area_m2
        )));
    }
    if !shrink.is_finite() || shrink <= 0.0 {
        return Err(BufferError::ConfigError(format!(
            "Shrink factor must be positive, got {}",
            shrink
        )));
    }
    if !centroid.x().is_finite() || !centroid.y().is_finite() {
        return Err(BufferError::InvalidGeometry(
            "Centroid contains non-finite values".to_string(),
        ));
    }

    let radius_m = shrink * (land_area_m2 / PI).sqrt();
    checked_fit(Point::new(centroid.x(), centroid.y()), radius_m)
}

fn checked_fit(center: Point<f64>, radius_m: f64) -> Result<CircleFit, BufferError> {
    // Guards underflow on vanishingly small inputs.
    if !(radius_m.is_finite() && radius_m > 0.0) {
        return Err(BufferError::InvalidGeometry(format!(
            "Derived radius is not positive: {}",
            radius_m
        )));
    }
    Ok(CircleFit { center, radius_m })
}

/// Formats a radius as `"<integer_meters> Meters"`, truncating toward zero.
///
/// ```
/// assert_eq!(search_buffers::radius_string(1118.03), "1118 Meters");
/// ```
pub fn radius_string(radius_m: f64) -> String {
    format!(
        "{} {}",
        radius_m.trunc() as i64,
        super::constants::RADIUS_UNIT_SUFFIX
    )
}

/// Fits many rectangles at once. Output order matches input order.
pub fn fit_cities(bounds: &[PlanarBounds]) -> Vec<Result<CircleFit, BufferError>> {
    bounds.par_iter().map(city_fit).collect()
}

/// Fits many `(centroid, land area)` pairs at once. Output order matches input order.
pub fn fit_states(
    inputs: &[(Point<f64>, f64)],
    shrink: f64,
) -> Vec<Result<CircleFit, BufferError>> {
    inputs
        .par_iter()
        .map(|(centroid, area)| state_fit(centroid, *area, shrink))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::constants::STATE_RADIUS_SHRINK;

    fn distance(a: &Point<f64>, b: &Point<f64>) -> f64 {
        ((a.x() - b.x()).powi(2) + (a.y() - b.y()).powi(2)).sqrt()
    }

    #[test]
    fn test_city_fit_concrete_case() -> Result<(), BufferError> {
        let fit = city_fit(&PlanarBounds::new(0.0, 0.0, 2000.0, 1000.0))?;

        assert_eq!(fit.center, Point::new(1000.0, 500.0));
        assert!((fit.radius_m - 1118.033988).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_city_circle_passes_through_all_corners() -> Result<(), BufferError> {
        let rects = [
            PlanarBounds::new(0.0, 0.0, 2000.0, 1000.0),
            PlanarBounds::new(-8_238_000.0, 4_950_000.0, -8_200_000.0, 4_990_000.0),
            PlanarBounds::new(-13.5, 2.25, 40.0, 2.5),
        ];

        for bounds in &rects {
            let fit = city_fit(bounds)?;
            for corner in bounds.corners() {
                let d = distance(&fit.center, &corner);
                assert!((d - fit.radius_m).abs() < 1e-6 * fit.radius_m.max(1.0));
            }
        }
        Ok(())
    }

    #[test]
    fn test_city_fit_accepts_line_shaped_bounds() -> Result<(), BufferError> {
        let fit = city_fit(&PlanarBounds::new(10.0, 0.0, 10.0, 400.0))?;
        assert_eq!(fit.center, Point::new(10.0, 200.0));
        assert!((fit.radius_m - 200.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_city_fit_rejects_point_bounds() {
        let result = city_fit(&PlanarBounds::new(5.0, 5.0, 5.0, 5.0));
        assert!(matches!(result, Err(BufferError::InvalidGeometry(_))));
    }

    #[test]
    fn test_city_fit_rejects_inverted_and_nan_bounds() {
        let inverted = city_fit(&PlanarBounds::new(10.0, 0.0, 0.0, 10.0));
        assert!(matches!(inverted, Err(BufferError::InvalidGeometry(_))));

        let nan = city_fit(&PlanarBounds::new(f64::NAN, 0.0, 10.0, 10.0));
        assert!(matches!(nan, Err(BufferError::InvalidGeometry(_))));
    }

    #[test]
    fn test_state_fit_concrete_case() -> Result<(), BufferError> {
        let fit = state_fit(&(-98.5, 39.8), 1_000_000.0, STATE_RADIUS_SHRINK)?;

        assert_eq!(fit.center, Point::new(-98.5, 39.8));
        assert!((fit.radius_m - 406.2165).abs() < 0.001);
        assert!((fit.radius_m - 0.72 * (1_000_000.0 / PI).sqrt()).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_state_fit_halving_area_scales_by_inverse_sqrt2() -> Result<(), BufferError> {
        for area in [1.0, 2_500.0, 1_000_000.0, 1.5e11] {
            let full = state_fit(&(0.0, 0.0), area, STATE_RADIUS_SHRINK)?;
            let half = state_fit(&(0.0, 0.0), area / 2.0, STATE_RADIUS_SHRINK)?;
            let ratio = half.radius_m / full.radius_m;
            assert!((ratio - 1.0 / 2.0_f64.sqrt()).abs() < 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_state_fit_rejects_non_positive_area() {
        for area in [0.0, -12.0, f64::NAN] {
            let result = state_fit(&(0.0, 0.0), area, STATE_RADIUS_SHRINK);
            assert!(matches!(result, Err(BufferError::InvalidAttribute(_))));
        }
    }

    #[test]
    fn test_state_fit_rejects_non_finite_centroid() {
        let result = state_fit(&(f64::INFINITY, 10.0), 1000.0, STATE_RADIUS_SHRINK);
        assert!(matches!(result, Err(BufferError::InvalidGeometry(_))));
    }

    #[test]
    fn test_radius_string_truncates() {
        assert_eq!(radius_string(1118.03), "1118 Meters");
        assert_eq!(radius_string(406.999), "406 Meters");
        assert_eq!(radius_string(1.0), "1 Meters");
    }

    #[test]
    fn test_batch_fits_preserve_order_and_are_repeatable() {
        let bounds = vec![
            PlanarBounds::new(0.0, 0.0, 2000.0, 1000.0),
            PlanarBounds::new(1.0, 1.0, 1.0, 1.0),
            PlanarBounds::new(0.0, 0.0, 30.0, 40.0),
        ];

        let first = fit_cities(&bounds);
        let second = fit_cities(&bounds);
        assert_eq!(first, second);

        assert!(first[0].is_ok());
        assert!(first[1].is_err());
        assert_eq!(first[2].as_ref().map(|f| f.radius_m), Ok(25.0));

        let inputs = [(Point::new(0.0, 0.0), 4.0 * PI), (Point::new(1.0, 1.0), 0.0)];
        let states = fit_states(&inputs, 1.0);
        assert_eq!(states[0].as_ref().map(|f| f.radius_m), Ok(2.0));
        assert!(states[1].is_err());
    }
}
