pub mod place_repository_sqlx;
pub mod review_repository_sqlx;
pub mod user_repository_sqlx;
