use crate::workspace::PointRecord;
use chrono::NaiveDate;

/// A circular search region read back from a workspace point table.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCenter {
    /// State code, written to every collected post as `searched_location`.
    pub region_id: String,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    pub radius_m: f64,
}

impl From<PointRecord> for SearchCenter {
    fn from(row: PointRecord) -> Self {
        Self {
            region_id: row.region_id,
            name: row.name,
            lon: row.lon,
            lat: row.lat,
            radius_m: row.cir_radius_m,
        }
    }
}

/// Keyword expression and date range shared by every region search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub keywords: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub lang: String,
}

impl SearchQuery {
    pub fn new(
        keywords: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        lang: impl Into<String>,
    ) -> Self {
        Self {
            keywords: keywords.into(),
            start_date,
            end_date,
            lang: lang.into(),
        }
    }

    /// `"<lat>, <lon>, <radius_km>km"`, latitude first.
    pub fn geocode(&self, center: &SearchCenter) -> String {
        format!(
            "{}, {}, {}km",
            center.lat,
            center.lon,
            center.radius_m / 1000.0
        )
    }

    /// Full query string for one region.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use search_buffers::{SearchCenter, SearchQuery};
    ///
    /// let query = SearchQuery::new(
    ///     "covid OR pandemic",
    ///     NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
    ///     "en",
    /// );
    /// let center = SearchCenter {
    ///     region_id: "CO".into(),
    ///     name: "Denver City".into(),
    ///     lon: -104.99,
    ///     lat: 39.74,
    ///     radius_m: 25_500.0,
    /// };
    /// assert_eq!(
    ///     query.query_for(&center),
    ///     r#"covid OR pandemic geocode:"39.74, -104.99, 25.5km" since:2020-09-01 until:2020-12-31 lang:en"#
    /// );
    /// ```
    pub fn query_for(&self, center: &SearchCenter) -> String {
        format!(
            "{} geocode:\"{}\" since:{} until:{} lang:{}",
            self.keywords,
            self.geocode(center),
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d"),
            self.lang
        )
    }
}
