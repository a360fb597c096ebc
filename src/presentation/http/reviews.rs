use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::error::AppError;
use crate::application::use_cases::reviews::list_my_reviews::ListMyReviews;
use crate::application::use_cases::reviews::submit_review::{ReviewSubmission, SubmitReview};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::CurrentUser;
use crate::presentation::http::error::ApiJson;

/// Clients send the rating either as a JSON number or as a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RatingField {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl RatingField {
    /// Whole numbers only; `4.0` counts, `4.5` does not.
    fn as_integer(&self) -> Option<i64> {
        match self {
            RatingField::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
                    .map(|f| f as i64)
            }),
            RatingField::Text(s) => s.trim().parse().ok(),
            RatingField::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub place_address: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub rating: Option<RatingField>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewItem {
    pub id: i64,
    pub place_id: i64,
    pub place_name: String,
    pub place_address: String,
    pub rating: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitReviewResponse {
    pub message: String,
    pub review: ReviewItem,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyReviewItem {
    pub id: i64,
    pub rating: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub place_id: i64,
    pub place_name: String,
    pub place_address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyReviewsResponse {
    pub reviews: Vec<MyReviewItem>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", post(submit_review))
        .route("/my-reviews", get(my_reviews))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/reviews", tag = "Reviews", request_body = ReviewRequest, responses(
    (status = 201, body = SubmitReviewResponse, description = "Review created"),
    (status = 200, body = SubmitReviewResponse, description = "Existing review replaced"),
    (status = 400, body = super::error::ErrorBody),
    (status = 401, body = super::error::ErrorBody),
    (status = 403, body = super::error::ErrorBody)
))]
pub async fn submit_review(
    State(ctx): State<AppContext>,
    CurrentUser(caller): CurrentUser,
    ApiJson(req): ApiJson<ReviewRequest>,
) -> Result<(StatusCode, Json<SubmitReviewResponse>), AppError> {
    let (Some(place_name), Some(place_address), Some(rating), Some(text)) =
        (req.place_name, req.place_address, req.rating, req.text)
    else {
        return Err(AppError::validation(
            "Place name, address, rating, and review text are required.",
        ));
    };
    let rating = rating
        .as_integer()
        .ok_or_else(|| AppError::validation("Rating must be an integer between 1 and 5."))?;

    let places = ctx.place_repo();
    let reviews = ctx.review_repo();
    let uc = SubmitReview {
        places: places.as_ref(),
        reviews: reviews.as_ref(),
    };
    let submission = ReviewSubmission {
        place_name,
        place_address,
        rating,
        text,
    };
    let saved = uc.execute(caller.id, &submission).await?;

    let (status, message) = if saved.created {
        (StatusCode::CREATED, "Review added successfully")
    } else {
        (StatusCode::OK, "Review updated successfully")
    };
    let review = saved.review;
    Ok((
        status,
        Json(SubmitReviewResponse {
            message: message.to_string(),
            review: ReviewItem {
                id: review.id,
                place_id: review.place_id,
                place_name: saved.place_name,
                place_address: saved.place_address,
                rating: review.rating,
                text: review.text,
                created_at: review.created_at,
            },
        }),
    ))
}

#[utoipa::path(get, path = "/api/reviews/my-reviews", tag = "Reviews", responses(
    (status = 200, body = MyReviewsResponse),
    (status = 401, body = super::error::ErrorBody),
    (status = 403, body = super::error::ErrorBody)
))]
pub async fn my_reviews(
    State(ctx): State<AppContext>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<MyReviewsResponse>, AppError> {
    let repo = ctx.review_repo();
    let uc = ListMyReviews {
        repo: repo.as_ref(),
    };
    let reviews = uc
        .execute(caller.id)
        .await?
        .into_iter()
        .map(|r| MyReviewItem {
            id: r.id,
            rating: r.rating,
            text: r.text,
            created_at: r.created_at,
            place_id: r.place_id,
            place_name: r.place_name,
            place_address: r.place_address,
        })
        .collect();
    Ok(Json(MyReviewsResponse { reviews }))
}
