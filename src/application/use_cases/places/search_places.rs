use crate::application::error::AppError;
use crate::application::ports::place_repository::PlaceRepository;
use crate::domain::places::place::PlaceSummary;
use crate::domain::places::ranking::{rank_places, round_rating};

pub struct SearchPlaces<'a, R: PlaceRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub min_rating: Option<f64>,
}

impl<'a, R: PlaceRepository + ?Sized> SearchPlaces<'a, R> {
    /// Blank names and ratings outside `1..=5` are treated as absent.
    pub async fn execute(&self, criteria: &SearchCriteria) -> Result<Vec<PlaceSummary>, AppError> {
        let name = criteria
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let min_rating = criteria
            .min_rating
            .filter(|r| (1.0..=5.0).contains(r));

        let mut places = self.repo.search(name, min_rating).await?;
        rank_places(&mut places, name);
        for place in &mut places {
            place.average_rating = round_rating(place.average_rating);
        }
        Ok(places)
    }
}
