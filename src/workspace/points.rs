use crate::fit::{AreaKind, BufferSpec};
use serde::{Deserialize, Serialize};

/// Column order of a point table, matching the fields of [`PointRecord`].
pub(crate) const POINT_COLUMNS: [&str; 9] = [
    "region_id",
    "name",
    "kind",
    "cir_cen_x",
    "cir_cen_y",
    "lon",
    "lat",
    "cir_radius_m",
    "buff",
];

/// One row of a point table: a buffer center with its radius.
///
/// `cir_cen_x`/`cir_cen_y` are planar (EPSG:3857) meters, `lon`/`lat` the
/// same center in degrees. `buff` is the radius string handed to the
/// buffering step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub region_id: String,
    pub name: String,
    pub kind: AreaKind,
    pub cir_cen_x: f64,
    pub cir_cen_y: f64,
    pub lon: f64,
    pub lat: f64,
    pub cir_radius_m: f64,
    pub buff: String,
}

impl From<&BufferSpec> for PointRecord {
    fn from(spec: &BufferSpec) -> Self {
        Self {
            region_id: spec.region_id().to_string(),
            name: spec.name().to_string(),
            kind: spec.kind(),
            cir_cen_x: spec.center().x(),
            cir_cen_y: spec.center().y(),
            lon: spec.geo_center().x(),
            lat: spec.geo_center().y(),
            cir_radius_m: spec.radius_m(),
            buff: spec.radius_string(),
        }
    }
}
