use std::cmp::Ordering;

use super::place::PlaceSummary;

/// Rounds an average rating to one decimal place for display.
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Orders search hits in place.
///
/// With a name filter, places whose whole name equals the filter
/// case-insensitively come first. Inside each tier (or across the whole list
/// when there is no filter) the order is average rating descending, then name
/// ascending. The filter is expected to be trimmed already.
pub fn rank_places(places: &mut [PlaceSummary], name_filter: Option<&str>) {
    let exact = name_filter.map(str::to_lowercase);
    let tier = |place: &PlaceSummary| -> u8 {
        match &exact {
            Some(filter) if place.name.to_lowercase() == *filter => 0,
            Some(_) => 1,
            None => 0,
        }
    };
    places.sort_by(|a, b| {
        tier(a)
            .cmp(&tier(b))
            .then_with(|| compare_rating_desc(a.average_rating, b.average_rating))
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn compare_rating_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
