use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Search hit with aggregates computed at query time.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSummary {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub average_rating: f64,
    pub review_count: i64,
}

#[derive(Debug, Clone)]
pub struct PlaceDetails {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub average_rating: f64,
    pub review_count: i64,
}
