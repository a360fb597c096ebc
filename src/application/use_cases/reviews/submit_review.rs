use chrono::Utc;

use crate::application::error::AppError;
use crate::application::ports::place_repository::PlaceRepository;
use crate::application::ports::review_repository::{ReviewDraft, ReviewRepository};
use crate::application::ports::store_error::StoreError;
use crate::domain::reviews::review::{MIN_TEXT_CHARS, Rating, Review};

pub struct SubmitReview<'a, P, R>
where
    P: PlaceRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    pub places: &'a P,
    pub reviews: &'a R,
}

#[derive(Debug, Clone)]
pub struct ReviewSubmission {
    pub place_name: String,
    pub place_address: String,
    pub rating: i64,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct SubmittedReview {
    pub review: Review,
    pub place_name: String,
    pub place_address: String,
    /// False when an earlier review by the same user was replaced.
    pub created: bool,
}

impl<'a, P, R> SubmitReview<'a, P, R>
where
    P: PlaceRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    /// Creates or replaces the caller's review of the place identified by
    /// (name, address), creating the place when it does not exist yet.
    pub async fn execute(
        &self,
        user_id: i64,
        submission: &ReviewSubmission,
    ) -> Result<SubmittedReview, AppError> {
        let draft = validate(submission)?;

        let resolved = self
            .places
            .find_or_create(&submission.place_name, &submission.place_address)
            .await?;
        let place = resolved.place;
        if resolved.created {
            tracing::info!(place_id = place.id, "place_created");
        }

        let existing = self
            .reviews
            .find_by_place_and_user(place.id, user_id)
            .await?;
        let (review, created) = match existing {
            Some(existing) => (self.overwrite(existing.id, &draft).await?, false),
            None => match self.reviews.insert(place.id, user_id, &draft).await {
                Ok(review) => (review, true),
                Err(StoreError::ConstraintViolation(reason)) => {
                    tracing::warn!(place_id = place.id, user_id, %reason, "review_insert_conflict_retrying");
                    let winner = self
                        .reviews
                        .find_by_place_and_user(place.id, user_id)
                        .await?
                        .ok_or_else(conflict)?;
                    (self.overwrite(winner.id, &draft).await?, false)
                }
                Err(err) => return Err(err.into()),
            },
        };

        if created {
            tracing::info!(review_id = review.id, place_id = place.id, user_id, "review_created");
        } else {
            tracing::info!(review_id = review.id, place_id = place.id, user_id, "review_updated");
        }
        Ok(SubmittedReview {
            review,
            place_name: place.name,
            place_address: place.address,
            created,
        })
    }

    async fn overwrite(&self, review_id: i64, draft: &ReviewDraft) -> Result<Review, AppError> {
        self.reviews
            .overwrite(review_id, draft)
            .await?
            .ok_or_else(conflict)
    }
}

fn conflict() -> AppError {
    AppError::conflict("Review changed while saving, please retry.")
}

fn validate(submission: &ReviewSubmission) -> Result<ReviewDraft, AppError> {
    if submission.place_name.trim().is_empty()
        || submission.place_address.trim().is_empty()
        || submission.text.trim().is_empty()
    {
        return Err(AppError::validation(
            "Place name, address, rating, and review text are required.",
        ));
    }
    let rating = Rating::new(submission.rating).ok_or_else(|| {
        AppError::validation("Rating must be an integer between 1 and 5.")
    })?;
    let text = submission.text.trim();
    if text.chars().count() < MIN_TEXT_CHARS {
        return Err(AppError::validation(format!(
            "Review text must be at least {MIN_TEXT_CHARS} characters."
        )));
    }
    Ok(ReviewDraft {
        rating,
        text: text.to_string(),
        written_at: Utc::now(),
    })
}
