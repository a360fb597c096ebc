//! Per-test database on a throwaway directory, plus shortcuts for seeding it.

use sqlx::Row;
use tempfile::TempDir;

use crate::application::services::identity::{DEFAULT_TOKEN_TTL_SECS, Identity};
use crate::application::use_cases::auth::register::{Register, RegisterRequest};
use crate::application::use_cases::reviews::submit_review::{ReviewSubmission, SubmitReview};
use crate::domain::users::user::User;
use crate::infrastructure::db::Store;
use crate::infrastructure::db::repositories::place_repository_sqlx::SqlxPlaceRepository;
use crate::infrastructure::db::repositories::review_repository_sqlx::SqlxReviewRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

pub const TEST_SECRET: &str = "test-secret";

pub struct TestEnv {
    _temp: TempDir,
    pub store: Store,
    pub users: SqlxUserRepository,
    pub places: SqlxPlaceRepository,
    pub reviews: SqlxReviewRepository,
    pub identity: Identity,
}

impl TestEnv {
    pub async fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let store = Store::initialize(temp.path().join("reviews.db"))
            .await
            .unwrap();
        Self {
            users: SqlxUserRepository::new(store.clone()),
            places: SqlxPlaceRepository::new(store.clone()),
            reviews: SqlxReviewRepository::new(store.clone()),
            identity: Identity::new(TEST_SECRET, DEFAULT_TOKEN_TTL_SECS),
            store,
            _temp: temp,
        }
    }

    pub async fn register(&self, name: &str, phone_number: &str, password: &str) -> User {
        Register {
            repo: &self.users,
            identity: &self.identity,
        }
        .execute(&RegisterRequest {
            name: name.into(),
            phone_number: phone_number.into(),
            password: password.into(),
        })
        .await
        .unwrap()
        .user
    }

    /// Submits a review and returns the id of the reviewed place.
    pub async fn review(&self, user_id: i64, name: &str, address: &str, rating: i64) -> i64 {
        SubmitReview {
            places: &self.places,
            reviews: &self.reviews,
        }
        .execute(
            user_id,
            &ReviewSubmission {
                place_name: name.into(),
                place_address: address.into(),
                rating,
                text: "Lovely place, will return".into(),
            },
        )
        .await
        .unwrap()
        .review
        .place_id
    }

    pub async fn count_rows(&self, table: &str) -> i64 {
        let sql = format!("SELECT COUNT(*) AS n FROM {table}");
        let row = self
            .store
            .fetch_optional(sqlx::query(&sql))
            .await
            .unwrap()
            .unwrap();
        row.get("n")
    }
}
