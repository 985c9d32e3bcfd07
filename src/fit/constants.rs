/// Fraction of the equal-area circle radius used for state buffers.
///
/// Shrinks state circles to curb overlap with neighbouring states.
pub const STATE_RADIUS_SHRINK: f64 = 0.72;

/// Literal unit suffix expected by the buffering step.
pub const RADIUS_UNIT_SUFFIX: &str = "Meters";

/// Number of segments used to approximate a round buffer.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 64;

/// Geographic CRS of all geometry sources.
pub const GEOGRAPHIC_CRS: &str = "EPSG:4326";

/// Planar CRS used for radius derivation and buffer materialization.
pub const PLANAR_CRS: &str = "EPSG:3857";
