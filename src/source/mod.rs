mod reader;
mod record;
mod select;

pub use reader::{read_csv, read_features, read_geojson};
pub use record::AreaRecord;
pub use select::most_populous_per_state;
