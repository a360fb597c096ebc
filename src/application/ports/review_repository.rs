use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::ports::store_error::StoreResult;
use crate::domain::reviews::review::{PlaceReview, Rating, Review, UserReview};

/// Validated review content ready to be written.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub rating: Rating,
    pub text: String,
    pub written_at: DateTime<Utc>,
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_place_and_user(
        &self,
        place_id: i64,
        user_id: i64,
    ) -> StoreResult<Option<Review>>;

    /// Fails with `StoreError::ConstraintViolation` when the (place, user)
    /// pair already has a review.
    async fn insert(&self, place_id: i64, user_id: i64, draft: &ReviewDraft)
    -> StoreResult<Review>;

    /// Replaces rating, text and timestamp. `None` when the row is gone.
    async fn overwrite(&self, review_id: i64, draft: &ReviewDraft) -> StoreResult<Option<Review>>;

    /// Reviews of a place, the viewer's own first, then newest first.
    async fn list_for_place(&self, place_id: i64, viewer_id: i64)
    -> StoreResult<Vec<PlaceReview>>;

    /// Reviews written by a user, newest first.
    async fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<UserReview>>;
}
