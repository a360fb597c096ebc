pub mod place;
pub mod ranking;
