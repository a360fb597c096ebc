use async_trait::async_trait;

use crate::application::ports::store_error::StoreResult;
use crate::domain::places::place::{Place, PlaceDetails, PlaceSummary};

#[derive(Debug, Clone)]
pub struct ResolvedPlace {
    pub place: Place,
    /// True when this call inserted the row.
    pub created: bool,
}

#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Places whose name contains `name_filter` (case-sensitive), with their
    /// unrounded average rating and review count, optionally restricted to
    /// averages of at least `min_rating`. Order is unspecified.
    async fn search(
        &self,
        name_filter: Option<&str>,
        min_rating: Option<f64>,
    ) -> StoreResult<Vec<PlaceSummary>>;

    async fn find_with_stats(&self, id: i64) -> StoreResult<Option<PlaceDetails>>;

    /// Returns the place keyed by the exact (name, address) pair, inserting it
    /// first when absent. Concurrent callers converge on the same row.
    async fn find_or_create(&self, name: &str, address: &str) -> StoreResult<ResolvedPlace>;

    async fn delete_place(&self, id: i64) -> StoreResult<bool>;
}
