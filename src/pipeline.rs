//! Buffer generation and collection workflows.
//!
//! Each step takes its [`Workspace`] explicitly. Records that fail validation
//! are skipped with a warning and listed in the returned [`BufferReport`];
//! the rest of the batch carries on.

use crate::config::{Config, SearchConfig, SourcesConfig};
use crate::coord::{Projector, project_rect};
use crate::error::BufferError;
use crate::fit::{AreaKind, BufferSpec, PlanarBounds, fit_cities, fit_states};
use crate::search::{
    CollectionReport, HttpSearchClient, SearchClient, collect_posts, create_search_centers,
    write_posts_csv,
};
use crate::source::{AreaRecord, most_populous_per_state, read_features};
use crate::workspace::{
    CITY_BUFFER_LAYER, CITY_POINTS_LAYER, STATE_BUFFER_LAYER, STATE_POINTS_LAYER, Workspace,
};
use geo::{Area, BoundingRect, Centroid};
use geo_types::Point;
use std::path::PathBuf;

/// A record that could not be turned into a buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub id: String,
    pub error: BufferError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferReport {
    pub specs: Vec<BufferSpec>,
    pub rejected: Vec<RejectedRecord>,
}

impl BufferReport {
    fn reject(&mut self, id: impl Into<String>, error: BufferError) {
        let id = id.into();
        tracing::warn!("Skipping {}: {}", id, error);
        self.rejected.push(RejectedRecord { id, error });
    }
}

struct PreparedCity {
    state: String,
    name: String,
    bounds: PlanarBounds,
}

struct PreparedState {
    code: String,
    name: String,
    centroid: Point<f64>,
    land_area: f64,
}

/// Fits a buffer around the most populous city of every state.
///
/// Each city's geographic bounding box is projected to Web Mercator and
/// covered by the circle through its corners.
pub fn city_buffers(
    records: Vec<AreaRecord>,
    sources: &SourcesConfig,
) -> Result<BufferReport, BufferError> {
    let forward = Projector::to_web_mercator()?;
    let inverse = Projector::to_wgs84()?;
    let mut report = BufferReport::default();

    let selected = most_populous_per_state(
        records,
        &sources.place_state_field,
        &sources.population_field,
    );

    let mut prepared = Vec::with_capacity(selected.len());
    for record in &selected {
        let name = record
            .text(&sources.place_name_field)
            .unwrap_or_else(|| "<unnamed>".to_string());
        match prepare_city(record, sources, &forward) {
            Ok((state, bounds)) => prepared.push(PreparedCity {
                state,
                name,
                bounds,
            }),
            Err(e) => report.reject(name, e),
        }
    }

    let bounds: Vec<PlanarBounds> = prepared.iter().map(|p| p.bounds).collect();
    for (city, fit) in prepared.into_iter().zip(fit_cities(&bounds)) {
        let spec = fit.and_then(|fit| {
            let geo_center = inverse.convert(&fit.center)?;
            Ok(BufferSpec::new(
                &city.state,
                &city.name,
                AreaKind::City,
                fit.center,
                geo_center,
                &fit,
            ))
        });
        match spec {
            Ok(spec) => report.specs.push(spec),
            Err(e) => report.reject(city.name, e),
        }
    }

    Ok(report)
}

fn prepare_city(
    record: &AreaRecord,
    sources: &SourcesConfig,
    forward: &Projector,
) -> Result<(String, PlanarBounds), BufferError> {
    let state = record.require_text(&sources.place_state_field)?;
    let geometry = record.require_geometry()?;
    if geometry.unsigned_area() <= 0.0 {
        return Err(BufferError::InvalidGeometry(format!(
            "{} place has a zero-area geometry",
            state
        )));
    }
    let rect = geometry
        .bounding_rect()
        .ok_or_else(|| BufferError::InvalidGeometry("Geometry is empty".to_string()))?;
    let bounds = project_rect(forward, &rect)?;
    Ok((state, bounds))
}

/// Fits the shrunk area-equivalent circle of every state, centered on its centroid.
pub fn state_buffers(
    records: Vec<AreaRecord>,
    sources: &SourcesConfig,
    shrink: f64,
) -> Result<BufferReport, BufferError> {
    let forward = Projector::to_web_mercator()?;
    let mut report = BufferReport::default();

    let mut prepared = Vec::with_capacity(records.len());
    for record in &records {
        let label = record
            .text(&sources.state_code_field)
            .unwrap_or_else(|| "<unknown state>".to_string());
        match prepare_state(record, sources) {
            Ok(state) => prepared.push(state),
            Err(e) => report.reject(label, e),
        }
    }

    let inputs: Vec<(Point<f64>, f64)> = prepared
        .iter()
        .map(|s| (s.centroid, s.land_area))
        .collect();
    for (state, fit) in prepared.into_iter().zip(fit_states(&inputs, shrink)) {
        let spec = fit.and_then(|fit| {
            let planar_center = forward.convert(&fit.center)?;
            Ok(BufferSpec::new(
                &state.code,
                &state.name,
                AreaKind::State,
                planar_center,
                fit.center,
                &fit,
            ))
        });
        match spec {
            Ok(spec) => report.specs.push(spec),
            Err(e) => report.reject(state.code, e),
        }
    }

    Ok(report)
}

fn prepare_state(
    record: &AreaRecord,
    sources: &SourcesConfig,
) -> Result<PreparedState, BufferError> {
    let code = record.require_text(&sources.state_code_field)?;
    let name = record
        .text(&sources.state_name_field)
        .unwrap_or_else(|| code.clone());

    let geometry = record.require_geometry()?;
    if geometry.unsigned_area() <= 0.0 {
        return Err(BufferError::InvalidGeometry(format!(
            "{} has a zero-area geometry",
            code
        )));
    }
    let centroid = geometry
        .centroid()
        .ok_or_else(|| BufferError::InvalidGeometry(format!("{} has no centroid", code)))?;
    let land_area = record.require_number(&sources.land_area_field)?;

    Ok(PreparedState {
        code,
        name,
        centroid,
        land_area,
    })
}

/// Reads the populated places, fits city buffers and stores them in the workspace.
pub fn create_city_buffers(
    config: &Config,
    workspace: &Workspace,
) -> Result<BufferReport, BufferError> {
    let sources = config.sources()?;
    let records = read_features(&sources.places, &sources.geometry_column)?;
    let report = city_buffers(records, sources)?;

    workspace.write_points(CITY_POINTS_LAYER, &report.specs)?;
    workspace.write_buffers(CITY_BUFFER_LAYER, &report.specs, config.fit.circle_segments)?;

    tracing::info!(
        "City buffers generated in {}: {} written, {} rejected",
        workspace.path().display(),
        report.specs.len(),
        report.rejected.len()
    );
    Ok(report)
}

/// Reads the state boundaries, fits state buffers and stores them in the workspace.
pub fn create_state_buffers(
    config: &Config,
    workspace: &Workspace,
) -> Result<BufferReport, BufferError> {
    let sources = config.sources()?;
    let records = read_features(&sources.states, &sources.geometry_column)?;
    let report = state_buffers(records, sources, config.fit.state_shrink)?;

    workspace.write_points(STATE_POINTS_LAYER, &report.specs)?;
    workspace.write_buffers(STATE_BUFFER_LAYER, &report.specs, config.fit.circle_segments)?;

    tracing::info!(
        "State buffers generated in {}: {} written, {} rejected",
        workspace.path().display(),
        report.specs.len(),
        report.rejected.len()
    );
    Ok(report)
}

/// Builds the HTTP search client described by the `[search]` section.
pub fn search_client(search: &SearchConfig) -> Result<HttpSearchClient, BufferError> {
    let mut client = HttpSearchClient::new(&search.endpoint, search.timeout())?;
    if let Some(token) = &search.bearer_token {
        client = client.with_bearer_token(token);
    }
    if let Some(max) = search.max_results {
        client = client.with_max_results(max);
    }
    Ok(client)
}

/// Searches every stored buffer and writes all collected posts once.
///
/// Returns the per-region report and the path of the posts table.
pub fn collect<C: SearchClient + ?Sized>(
    config: &Config,
    workspace: &Workspace,
    client: &C,
) -> Result<(CollectionReport, PathBuf), BufferError> {
    let search = config.search()?;
    let centers = create_search_centers(workspace)?;
    let report = collect_posts(client, &centers, &search.query());

    let path = workspace.path_for(&search.output_file);
    let written = write_posts_csv(&path, &report)?;

    tracing::info!(
        "Collected {} posts from {} of {} regions into {}",
        written,
        report.succeeded().count(),
        report.outcomes.len(),
        path.display()
    );
    Ok((report, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchError;
    use geo_types::{line_string, polygon};
    use serde_json::{Map, Value, json};

    fn sources() -> SourcesConfig {
        SourcesConfig {
            places: PathBuf::from("places.geojson"),
            states: PathBuf::from("states.geojson"),
            geometry_column: "geometry".to_string(),
            place_state_field: "ST".to_string(),
            place_name_field: "NAME".to_string(),
            population_field: "POP2012".to_string(),
            state_code_field: "STUSPS".to_string(),
            state_name_field: "NAME".to_string(),
            land_area_field: "ALAND".to_string(),
        }
    }

    fn props(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn rect_polygon(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> geo_types::Geometry<f64> {
        geo_types::Geometry::Polygon(geo_types::polygon![
            (x: min_x, y: min_y),
            (x: max_x, y: min_y),
            (x: max_x, y: max_y),
            (x: min_x, y: max_y),
            (x: min_x, y: min_y),
        ])
    }

    fn planar_distance(a: Point<f64>, b: Point<f64>) -> f64 {
        ((a.x() - b.x()).powi(2) + (a.y() - b.y()).powi(2)).sqrt()
    }

    #[test]
    fn test_city_buffers_keep_overlapping_neighbours() -> Result<(), BufferError> {
        let records = vec![
            AreaRecord::new(
                Some(rect_polygon(-74.259, 40.477, -73.700, 40.917)),
                props(json!({"NAME": "New York", "ST": "NY", "POP2012": 8336697})),
            ),
            AreaRecord::new(
                Some(rect_polygon(-74.251, 40.674, -74.112, 40.789)),
                props(json!({"NAME": "Newark", "ST": "NJ", "POP2012": 277727})),
            ),
            AreaRecord::new(
                Some(rect_polygon(-74.120, 40.660, -74.020, 40.770)),
                props(json!({"NAME": "Jersey City", "ST": "NJ", "POP2012": 254441})),
            ),
        ];

        let report = city_buffers(records, &sources())?;
        assert!(report.rejected.is_empty());
        assert_eq!(report.specs.len(), 2);

        let newark = &report.specs[0];
        let nyc = &report.specs[1];
        assert_eq!(newark.name(), "Newark");
        assert_eq!(nyc.name(), "New York");
        assert_eq!(nyc.region_id(), "NY");

        // Newark sits inside the NYC circle; both buffers are kept.
        assert!(planar_distance(nyc.center(), newark.center()) < nyc.radius_m());

        assert!((nyc.geo_center().x() - (-73.9795)).abs() < 1e-6);
        assert!(nyc.geo_center().y() > 40.477 && nyc.geo_center().y() < 40.917);
        Ok(())
    }

    #[test]
    fn test_city_without_geometry_is_rejected() -> Result<(), BufferError> {
        let records = vec![AreaRecord::new(
            None,
            props(json!({"NAME": "Nowhere", "ST": "ZZ", "POP2012": 10})),
        )];

        let report = city_buffers(records, &sources())?;
        assert!(report.specs.is_empty());
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].id, "Nowhere");
        assert!(matches!(
            report.rejected[0].error,
            BufferError::InvalidGeometry(_)
        ));
        Ok(())
    }

    #[test]
    fn test_point_city_is_rejected_as_degenerate() -> Result<(), BufferError> {
        let records = vec![AreaRecord::new(
            Some(geo_types::Geometry::Point(Point::new(-100.0, 40.0))),
            props(json!({"NAME": "Dot", "ST": "KS", "POP2012": 10})),
        )];

        let report = city_buffers(records, &sources())?;
        assert!(report.specs.is_empty());
        assert!(matches!(
            report.rejected[0].error,
            BufferError::InvalidGeometry(_)
        ));
        Ok(())
    }

    #[test]
    fn test_line_city_is_rejected_as_zero_area() -> Result<(), BufferError> {
        let line = geo_types::Geometry::LineString(geo_types::line_string![
            (x: -100.0, y: 40.0),
            (x: -99.0, y: 41.0),
        ]);
        let records = vec![AreaRecord::new(
            Some(line),
            props(json!({"NAME": "Strip", "ST": "KS", "POP2012": 10})),
        )];

        let report = city_buffers(records, &sources())?;
        assert!(report.specs.is_empty());
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].id, "Strip");
        assert!(matches!(
            report.rejected[0].error,
            BufferError::InvalidGeometry(_)
        ));
        Ok(())
    }

    #[test]
    fn test_search_client_from_config() -> Result<(), BufferError> {
        let config = Config::from_toml(
            r#"
            [search]
            endpoint = "https://search.example.com/posts"
            keywords = "covid"
            start_date = "2020-09-01"
            end_date = "2020-12-31"
            bearer_token = "secret"
            max_results = 100
            "#,
        )?;
        assert!(search_client(config.search()?).is_ok());

        let err: BufferError = SearchError::Setup("no TLS backend".to_string()).into();
        assert!(matches!(err, BufferError::Search(_)));
        Ok(())
    }

    #[test]
    fn test_state_buffers() -> Result<(), BufferError> {
        let records = vec![
            AreaRecord::new(
                Some(rect_polygon(-109.05, 36.99, -102.04, 41.0)),
                props(json!({"STUSPS": "CO", "NAME": "Colorado", "ALAND": 268422891711_u64})),
            ),
            AreaRecord::new(
                Some(rect_polygon(-80.0, 40.0, -79.0, 41.0)),
                props(json!({"STUSPS": "XX", "NAME": "Nowhere", "ALAND": 0})),
            ),
            AreaRecord::new(
                Some(rect_polygon(-90.0, 30.0, -89.0, 31.0)),
                props(json!({"STUSPS": "YY", "NAME": "No Area"})),
            ),
        ];

        let report = state_buffers(records, &sources(), 0.72)?;
        assert_eq!(report.specs.len(), 1);
        assert_eq!(report.rejected.len(), 2);
        assert!(
            report
                .rejected
                .iter()
                .all(|r| matches!(r.error, BufferError::InvalidAttribute(_)))
        );

        let co = &report.specs[0];
        assert_eq!(co.kind(), AreaKind::State);
        assert_eq!(co.name(), "Colorado");
        assert!((co.geo_center().x() - (-105.545)).abs() < 1e-9);
        assert!((co.geo_center().y() - 38.995).abs() < 1e-9);
        assert_eq!(co.radius_string(), "210458 Meters");
        assert!(co.center().x() < -11_000_000.0);
        Ok(())
    }

    #[test]
    fn test_zero_area_state_geometry_is_rejected() -> Result<(), BufferError> {
        let records = vec![AreaRecord::new(
            Some(geo_types::Geometry::Point(Point::new(-100.0, 40.0))),
            props(json!({"STUSPS": "PT", "ALAND": 1000})),
        )];

        let report = state_buffers(records, &sources(), 0.72)?;
        assert!(matches!(
            report.rejected[0].error,
            BufferError::InvalidGeometry(_)
        ));
        Ok(())
    }
}
