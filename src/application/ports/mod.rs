pub mod place_repository;
pub mod review_repository;
pub mod store_error;
pub mod user_repository;
