//! # search-buffers
//!
//! Circular search regions for US states and their most populous cities,
//! used as geocode filters for keyword searches of social media posts.
//!
//! ### 1. Circle fits
//!
//! A city is covered by the circle through the four corners of its planar
//! bounding box:
//!
//! ```
//! use search_buffers::{BufferError, PlanarBounds, city_fit, radius_string};
//!
//! # fn main() -> Result<(), BufferError> {
//! let fit = city_fit(&PlanarBounds::new(0.0, 0.0, 6000.0, 8000.0))?;
//! assert_eq!(fit.radius_m, 5000.0);
//! assert_eq!(radius_string(fit.radius_m), "5000 Meters");
//! # Ok(())
//! # }
//! ```
//!
//! A state gets a circle of its land area, shrunk to curb overlap with
//! neighbouring states:
//!
//! ```
//! use search_buffers::{BufferError, STATE_RADIUS_SHRINK, state_fit};
//!
//! # fn main() -> Result<(), BufferError> {
//! let fit = state_fit(&(-105.5, 39.0), 2.684e11, STATE_RADIUS_SHRINK)?;
//! assert!(fit.radius_m > 200_000.0 && fit.radius_m < 220_000.0);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. Workspace pipeline
//!
//! ```no_run
//! use search_buffers::{Config, create_city_buffers, create_state_buffers};
//!
//! # fn main() -> Result<(), search_buffers::BufferError> {
//! let config = Config::from_file("search-buffers.toml")?;
//! let workspace = config.open_workspace()?;
//! create_city_buffers(&config, &workspace)?;
//! create_state_buffers(&config, &workspace)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Post collection
//!
//! ```no_run
//! use search_buffers::{Config, HttpSearchClient, collect};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_file("search-buffers.toml")?;
//! let search = config.search()?;
//! let client = HttpSearchClient::new(&search.endpoint, search.timeout())?;
//! let (report, path) = collect(&config, &config.open_workspace()?, &client)?;
//! println!("{} posts in {}", report.total_posts(), path.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod coord;
pub mod error;
pub mod fit;
pub mod geom;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod search;
pub mod source;
pub mod workspace;

pub use config::{Config, FitConfig, SearchConfig, SourcesConfig, WorkspaceConfig};
pub use coord::{Coordinate, Projector, project_rect};
pub use error::BufferError;
pub use fit::{
    AreaKind, BufferSpec, CircleFit, DEFAULT_CIRCLE_SEGMENTS, GEOGRAPHIC_CRS, PLANAR_CRS,
    PlanarBounds, RADIUS_UNIT_SUFFIX, STATE_RADIUS_SHRINK, city_fit, fit_cities, fit_states,
    radius_string, state_fit,
};
pub use geom::{create_circle, parse_geometry};
pub use io::{BuffersToArrow, BuffersToGeoParquet, write_geoparquet};
pub use pipeline::{
    BufferReport, RejectedRecord, city_buffers, collect, create_city_buffers,
    create_state_buffers, search_client, state_buffers,
};
pub use search::{
    CollectedPost, CollectionReport, HttpSearchClient, Post, PostUser, RegionOutcome,
    SearchCenter, SearchClient, SearchError, SearchQuery, collect_posts, create_search_centers,
    write_posts_csv,
};
pub use source::{AreaRecord, most_populous_per_state, read_features};
pub use workspace::{
    CITY_BUFFER_LAYER, CITY_POINTS_LAYER, PointRecord, STATE_BUFFER_LAYER, STATE_POINTS_LAYER,
    Workspace,
};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;
