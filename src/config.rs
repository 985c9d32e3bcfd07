//! TOML configuration for the buffer and collection workflows.
//!
//! ```toml
//! [workspace]
//! root = "output"
//! name = "GeospatialTweetAnalysis.gdb"
//!
//! [sources]
//! places = "data/populated_places.geojson"
//! states = "data/states.geojson"
//!
//! [search]
//! endpoint = "https://search.example.com/posts"
//! keywords = "covid OR corona OR coronavirus OR pandemic"
//! start_date = "2020-09-01"
//! end_date = "2020-12-31"
//! ```

use crate::error::BufferError;
use crate::fit::{DEFAULT_CIRCLE_SEGMENTS, STATE_RADIUS_SHRINK};
use crate::search::SearchQuery;
use crate::workspace::Workspace;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MIN_CIRCLE_SEGMENTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    pub sources: Option<SourcesConfig>,
    #[serde(default)]
    pub fit: FitConfig,
    pub search: Option<SearchConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_workspace_name")]
    pub name: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            name: default_workspace_name(),
        }
    }
}

/// Boundary datasets and the attribute names read from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Census populated place areas.
    pub places: PathBuf,
    /// Census state boundaries.
    pub states: PathBuf,
    #[serde(default = "default_geometry_column")]
    pub geometry_column: String,
    #[serde(default = "default_place_state_field")]
    pub place_state_field: String,
    #[serde(default = "default_name_field")]
    pub place_name_field: String,
    #[serde(default = "default_population_field")]
    pub population_field: String,
    #[serde(default = "default_state_code_field")]
    pub state_code_field: String,
    #[serde(default = "default_name_field")]
    pub state_name_field: String,
    #[serde(default = "default_land_area_field")]
    pub land_area_field: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    #[serde(default = "default_state_shrink")]
    pub state_shrink: f64,
    #[serde(default = "default_circle_segments")]
    pub circle_segments: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            state_shrink: default_state_shrink(),
            circle_segments: default_circle_segments(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub keywords: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_lang")]
    pub lang: String,
    pub bearer_token: Option<String>,
    pub max_results: Option<u32>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

impl SearchConfig {
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(
            self.keywords.clone(),
            self.start_date,
            self.end_date,
            self.lang.clone(),
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_workspace_name() -> String {
    "GeospatialTweetAnalysis.gdb".to_string()
}

fn default_geometry_column() -> String {
    "geometry".to_string()
}

fn default_place_state_field() -> String {
    "ST".to_string()
}

fn default_name_field() -> String {
    "NAME".to_string()
}

fn default_population_field() -> String {
    "POP2012".to_string()
}

fn default_state_code_field() -> String {
    "STUSPS".to_string()
}

fn default_land_area_field() -> String {
    "ALAND".to_string()
}

fn default_state_shrink() -> f64 {
    STATE_RADIUS_SHRINK
}

fn default_circle_segments() -> usize {
    DEFAULT_CIRCLE_SEGMENTS
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_file() -> String {
    "AllPosts.csv".to_string()
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BufferError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| BufferError::ConfigError(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&text)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, BufferError> {
        let config: Config =
            toml::from_str(text).map_err(|e| BufferError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BufferError> {
        if !(self.fit.state_shrink > 0.0 && self.fit.state_shrink <= 1.0) {
            return Err(BufferError::ConfigError(format!(
                "fit.state_shrink must be in (0, 1], got {}",
                self.fit.state_shrink
            )));
        }
        if self.fit.circle_segments < MIN_CIRCLE_SEGMENTS {
            return Err(BufferError::ConfigError(format!(
                "fit.circle_segments must be at least {}, got {}",
                MIN_CIRCLE_SEGMENTS, self.fit.circle_segments
            )));
        }

        if let Some(search) = &self.search {
            if search.keywords.trim().is_empty() {
                return Err(BufferError::ConfigError(
                    "search.keywords cannot be empty".to_string(),
                ));
            }
            if search.start_date >= search.end_date {
                return Err(BufferError::ConfigError(format!(
                    "search.start_date ({}) must be before search.end_date ({})",
                    search.start_date, search.end_date
                )));
            }
            match reqwest::Url::parse(&search.endpoint) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => {
                    return Err(BufferError::ConfigError(format!(
                        "search.endpoint has unsupported scheme '{}'",
                        url.scheme()
                    )));
                }
                Err(e) => {
                    return Err(BufferError::ConfigError(format!(
                        "search.endpoint is not a valid URL: {}",
                        e
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn sources(&self) -> Result<&SourcesConfig, BufferError> {
        self.sources
            .as_ref()
            .ok_or_else(|| BufferError::ConfigError("Missing [sources] section".to_string()))
    }

    pub fn search(&self) -> Result<&SearchConfig, BufferError> {
        self.search
            .as_ref()
            .ok_or_else(|| BufferError::ConfigError("Missing [search] section".to_string()))
    }

    pub fn open_workspace(&self) -> Result<Workspace, BufferError> {
        Workspace::open_or_create(&self.workspace.root, &self.workspace.name)
    }
}
