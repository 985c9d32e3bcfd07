use crate::error::BufferError;
use crate::search::client::SearchClient;
use crate::search::query::{SearchCenter, SearchQuery};
use crate::search::{Post, SearchError};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// Column order of the collected-posts table.
const POST_COLUMNS: [&str; 5] = [
    "user",
    "date",
    "content",
    "user_location",
    "searched_location",
];

/// A post tagged with the region whose search returned it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectedPost {
    pub user: String,
    pub date: String,
    pub content: String,
    pub user_location: Option<String>,
    pub searched_location: String,
}

impl CollectedPost {
    pub fn new(post: Post, searched_location: &str) -> Self {
        Self {
            user: post.user.username,
            date: post.date,
            content: post.content,
            user_location: post.user.location,
            searched_location: searched_location.to_string(),
        }
    }
}

/// Result of searching a single region: the number of posts, or why it failed.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionOutcome {
    pub region_id: String,
    pub name: String,
    pub result: Result<usize, SearchError>,
}

/// Everything one collection run produced, successes and failures alike.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionReport {
    pub outcomes: Vec<RegionOutcome>,
    pub posts: Vec<CollectedPost>,
}

impl CollectionReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &RegionOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &RegionOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn total_posts(&self) -> usize {
        self.posts.len()
    }
}

/// Searches every center in order. A failing region is recorded and skipped;
/// the remaining regions are still searched.
pub fn collect_posts<C: SearchClient + ?Sized>(
    client: &C,
    centers: &[SearchCenter],
    query: &SearchQuery,
) -> CollectionReport {
    let mut report = CollectionReport::default();

    for center in centers {
        let q = query.query_for(center);
        tracing::debug!("Searching {}: {}", center.name, q);

        let result = match client.search(&q) {
            Ok(posts) => {
                let count = posts.len();
                tracing::info!("Posts for {} collected: {}", center.name, count);
                report.posts.extend(
                    posts
                        .into_iter()
                        .map(|p| CollectedPost::new(p, &center.region_id)),
                );
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("Post collection for {} failed: {}", center.name, e);
                Err(e)
            }
        };

        report.outcomes.push(RegionOutcome {
            region_id: center.region_id.clone(),
            name: center.name.clone(),
            result,
        });
    }

    report
}

/// Writes every collected post to one CSV file. The header is written even
/// when nothing was collected.
pub fn write_posts_csv(
    path: impl AsRef<Path>,
    report: &CollectionReport,
) -> Result<usize, BufferError> {
    let file = File::create(path.as_ref()).map_err(|e| BufferError::IoError(e.to_string()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer
        .write_record(POST_COLUMNS)
        .map_err(|e| BufferError::CsvError(e.to_string()))?;
    for post in &report.posts {
        writer
            .serialize(post)
            .map_err(|e| BufferError::CsvError(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| BufferError::IoError(e.to_string()))?;

    Ok(report.posts.len())
}
