use crate::application::error::AppError;
use crate::application::ports::review_repository::ReviewRepository;
use crate::domain::reviews::review::UserReview;

pub struct ListMyReviews<'a, R: ReviewRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ReviewRepository + ?Sized> ListMyReviews<'a, R> {
    pub async fn execute(&self, user_id: i64) -> Result<Vec<UserReview>, AppError> {
        Ok(self.repo.list_for_user(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestEnv;

    #[tokio::test]
    async fn lists_only_callers_reviews_newest_first() {
        let env = TestEnv::new().await;
        let me = env.register("Me", "9500000001", "secret1").await;
        let other = env.register("Other", "9500000002", "secret1").await;
        env.review(me.id, "First", "1 Road", 3).await;
        env.review(other.id, "First", "1 Road", 5).await;
        env.review(me.id, "Second", "2 Road", 4).await;

        let uc = ListMyReviews { repo: &env.reviews };
        let mine = uc.execute(me.id).await.unwrap();
        let places: Vec<_> = mine.iter().map(|r| r.place_name.as_str()).collect();
        assert_eq!(places, vec!["Second", "First"]);
        assert_eq!(mine[0].place_address, "2 Road");
        assert_eq!(mine[1].rating, 3);

        let nobody = env.register("Nobody", "9500000003", "secret1").await;
        assert!(uc.execute(nobody.id).await.unwrap().is_empty());
    }
}
