use crate::fit::radius::{CircleFit, radius_string};
use crate::geom::create_circle;
use geo_types::{Point, Polygon};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which fitting rule produced a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaKind {
    /// Half-diagonal of the city bounding rectangle.
    City,
    /// Shrunk area-equivalent circle of the state land area.
    State,
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaKind::City => write!(f, "city"),
            AreaKind::State => write!(f, "state"),
        }
    }
}

/// A circular search region derived from one area record.
///
/// Built once by the buffer pipeline and read-only afterwards. The radius is
/// always strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSpec {
    region_id: String,
    name: String,
    kind: AreaKind,
    center: Point<f64>,
    geo_center: Point<f64>,
    radius_m: f64,
}

impl BufferSpec {
    /// `planar_center` is in Web Mercator meters, `geo_center` in lon/lat degrees.
    pub(crate) fn new(
        region_id: impl Into<String>,
        name: impl Into<String>,
        kind: AreaKind,
        planar_center: Point<f64>,
        geo_center: Point<f64>,
        fit: &CircleFit,
    ) -> Self {
        Self {
            region_id: region_id.into(),
            name: name.into(),
            kind,
            center: planar_center,
            geo_center,
            radius_m: fit.radius_m,
        }
    }

    /// State code of the area (e.g. `"NY"`).
    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AreaKind {
        self.kind
    }

    /// Center in the planar CRS (EPSG:3857).
    pub fn center(&self) -> Point<f64> {
        self.center
    }

    /// Center in geographic coordinates (lon, lat).
    pub fn geo_center(&self) -> Point<f64> {
        self.geo_center
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Radius formatted for the buffering step, e.g. `"1118 Meters"`.
    pub fn radius_string(&self) -> String {
        radius_string(self.radius_m)
    }

    /// Materializes the round planar buffer polygon.
    pub fn to_polygon(&self, segments: usize) -> Polygon<f64> {
        create_circle(&self.center, self.radius_m, segments)
    }
}
