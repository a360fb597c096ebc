use crate::application::error::AppError;
use crate::application::ports::place_repository::PlaceRepository;
use crate::application::ports::review_repository::ReviewRepository;
use crate::domain::places::place::PlaceDetails;
use crate::domain::places::ranking::round_rating;
use crate::domain::reviews::review::PlaceReview;

pub struct GetPlaceDetails<'a, P, R>
where
    P: PlaceRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    pub places: &'a P,
    pub reviews: &'a R,
}

#[derive(Debug, Clone)]
pub struct PlaceWithReviews {
    pub place: PlaceDetails,
    pub reviews: Vec<PlaceReview>,
}

impl<'a, P, R> GetPlaceDetails<'a, P, R>
where
    P: PlaceRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    pub async fn execute(&self, place_id: i64, viewer_id: i64) -> Result<PlaceWithReviews, AppError> {
        let mut place = self
            .places
            .find_with_stats(place_id)
            .await?
            .ok_or_else(|| AppError::not_found("Place not found."))?;
        place.average_rating = round_rating(place.average_rating);
        let reviews = self.reviews.list_for_place(place_id, viewer_id).await?;
        Ok(PlaceWithReviews { place, reviews })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestEnv;

    #[tokio::test]
    async fn viewer_review_comes_first_then_newest() {
        let env = TestEnv::new().await;
        let me = env.register("Me", "9400000001", "secret1").await;
        let old = env.register("Old", "9400000002", "secret1").await;
        let new = env.register("New", "9400000003", "secret1").await;
        let place_id = env.review(me.id, "Dosa Point", "5 Temple St", 2).await;
        env.review(old.id, "Dosa Point", "5 Temple St", 4).await;
        env.review(new.id, "Dosa Point", "5 Temple St", 5).await;

        let uc = GetPlaceDetails {
            places: &env.places,
            reviews: &env.reviews,
        };
        let details = uc.execute(place_id, me.id).await.unwrap();
        assert_eq!(details.place.name, "Dosa Point");
        assert_eq!(details.place.review_count, 3);
        assert_eq!(details.place.average_rating, 3.7);

        let authors: Vec<_> = details.reviews.iter().map(|r| r.user_name.as_str()).collect();
        assert_eq!(authors, vec!["Me", "New", "Old"]);
        let flags: Vec<_> = details.reviews.iter().map(|r| r.is_current_user).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[tokio::test]
    async fn place_without_reviews_has_zero_average() {
        let env = TestEnv::new().await;
        let viewer = env.register("V", "9400000004", "secret1").await;
        let resolved = env.places.find_or_create("Bare", "1 Nowhere").await.unwrap();
        let uc = GetPlaceDetails {
            places: &env.places,
            reviews: &env.reviews,
        };
        let details = uc.execute(resolved.place.id, viewer.id).await.unwrap();
        assert_eq!(details.place.average_rating, 0.0);
        assert_eq!(details.place.review_count, 0);
        assert!(details.reviews.is_empty());
    }

    #[tokio::test]
    async fn unknown_place_is_not_found() {
        let env = TestEnv::new().await;
        let uc = GetPlaceDetails {
            places: &env.places,
            reviews: &env.reviews,
        };
        assert!(matches!(
            uc.execute(4242, 1).await,
            Err(AppError::NotFound(_))
        ));
    }
}
