pub mod get_place;
pub mod search_places;
