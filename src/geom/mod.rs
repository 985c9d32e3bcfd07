mod circle;
mod parse;

pub use circle::create_circle;
pub use parse::{geojson_to_geometry, parse_geojson, parse_geometry, parse_wkt};
