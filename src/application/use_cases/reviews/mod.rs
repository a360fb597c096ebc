pub mod list_my_reviews;
pub mod submit_review;
