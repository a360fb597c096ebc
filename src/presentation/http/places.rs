use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::error::AppError;
use crate::application::use_cases::places::get_place::GetPlaceDetails;
use crate::application::use_cases::places::search_places::{SearchCriteria, SearchPlaces};
use crate::bootstrap::app_context::AppContext;
use crate::domain::places::place::PlaceSummary;
use crate::presentation::http::auth::CurrentUser;
use crate::presentation::http::error::ApiQuery;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-sensitive substring of the place name.
    pub name: Option<String>,
    /// Minimum average rating, 1 to 5. Other values are ignored.
    pub min_rating: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceSummaryItem {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub average_rating: f64,
    pub review_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub places: Vec<PlaceSummaryItem>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceItem {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub average_rating: f64,
    pub review_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceReviewItem {
    pub id: i64,
    pub rating: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub is_current_user: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceDetailsResponse {
    pub place: PlaceItem,
    pub reviews: Vec<PlaceReviewItem>,
}

impl From<PlaceSummary> for PlaceSummaryItem {
    fn from(p: PlaceSummary) -> Self {
        Self {
            id: p.id,
            name: p.name,
            address: p.address,
            average_rating: p.average_rating,
            review_count: p.review_count,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/search", get(search_places))
        .route("/:id", get(get_place))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/places/search", tag = "Places", params(SearchQuery), responses(
    (status = 200, body = SearchResponse),
    (status = 401, body = super::error::ErrorBody),
    (status = 403, body = super::error::ErrorBody)
))]
pub async fn search_places(
    State(ctx): State<AppContext>,
    CurrentUser(_caller): CurrentUser,
    ApiQuery(q): ApiQuery<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let repo = ctx.place_repo();
    let uc = SearchPlaces {
        repo: repo.as_ref(),
    };
    let criteria = SearchCriteria {
        name: q.name,
        min_rating: q
            .min_rating
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|r| r.is_finite()),
    };
    let places: Vec<PlaceSummaryItem> = uc
        .execute(&criteria)
        .await?
        .into_iter()
        .map(PlaceSummaryItem::from)
        .collect();
    Ok(Json(SearchResponse {
        total: places.len(),
        places,
    }))
}

#[utoipa::path(get, path = "/api/places/{id}", tag = "Places",
    params(("id" = i64, Path, description = "Place id")),
    responses(
        (status = 200, body = PlaceDetailsResponse),
        (status = 401, body = super::error::ErrorBody),
        (status = 403, body = super::error::ErrorBody),
        (status = 404, body = super::error::ErrorBody)
    )
)]
pub async fn get_place(
    State(ctx): State<AppContext>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<PlaceDetailsResponse>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::not_found("Place not found."))?;
    let places = ctx.place_repo();
    let reviews = ctx.review_repo();
    let uc = GetPlaceDetails {
        places: places.as_ref(),
        reviews: reviews.as_ref(),
    };
    let found = uc.execute(id, caller.id).await?;
    let place = found.place;
    Ok(Json(PlaceDetailsResponse {
        place: PlaceItem {
            id: place.id,
            name: place.name,
            address: place.address,
            created_at: place.created_at,
            average_rating: place.average_rating,
            review_count: place.review_count,
        },
        reviews: found
            .reviews
            .into_iter()
            .map(|r| PlaceReviewItem {
                id: r.id,
                rating: r.rating,
                text: r.text,
                created_at: r.created_at,
                user_name: r.user_name,
                is_current_user: r.is_current_user,
            })
            .collect(),
    }))
}
