//! Geocoded keyword search over the buffers stored in a workspace.

mod client;
mod collect;
mod query;

pub use client::{HttpSearchClient, SearchClient};
pub use collect::{CollectedPost, CollectionReport, RegionOutcome, collect_posts, write_posts_csv};
pub use query::{SearchCenter, SearchQuery};

use crate::error::BufferError;
use crate::workspace::{CITY_POINTS_LAYER, STATE_POINTS_LAYER, Workspace};
use serde::Deserialize;
use thiserror::Error;

/// Why a single region search failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The client could not be built.
    #[error("Client setup failed: {0}")]
    Setup(String),
    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Http(String),
    /// The endpoint answered with a non-success status.
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body was not a JSON array of posts.
    #[error("Decode error: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PostUser {
    pub username: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// A post returned by the search collaborator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub user: PostUser,
    pub date: String,
    pub content: String,
}

/// Suffix appended to city names so they read apart from state names.
const CITY_NAME_SUFFIX: &str = " City";

/// Reads the state and city point tables back as search centers.
///
/// States come first, then cities; city names get a `" City"` suffix.
pub fn create_search_centers(workspace: &Workspace) -> Result<Vec<SearchCenter>, BufferError> {
    let states = workspace.read_points(STATE_POINTS_LAYER)?;
    let cities = workspace.read_points(CITY_POINTS_LAYER)?;

    let centers: Vec<SearchCenter> = states
        .into_iter()
        .map(SearchCenter::from)
        .chain(cities.into_iter().map(|mut row| {
            row.name.push_str(CITY_NAME_SUFFIX);
            SearchCenter::from(row)
        }))
        .collect();

    tracing::info!(
        "Built {} search centers from {}",
        centers.len(),
        workspace.path().display()
    );
    Ok(centers)
}
