pub mod buffer;
pub mod constants;
pub mod radius;

pub use buffer::{AreaKind, BufferSpec};
pub use constants::{
    DEFAULT_CIRCLE_SEGMENTS, GEOGRAPHIC_CRS, PLANAR_CRS, RADIUS_UNIT_SUFFIX, STATE_RADIUS_SHRINK,
};
pub use radius::{
    CircleFit, PlanarBounds, city_fit, fit_cities, fit_states, radius_string, state_fit,
};
