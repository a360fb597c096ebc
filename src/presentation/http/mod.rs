use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::bootstrap::app_context::AppContext;
use crate::infrastructure::db::SqlitePool;

pub mod auth;
pub mod error;
pub mod health;
pub mod places;
pub mod reviews;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        auth::profile,
        places::search_places,
        places::get_place,
        reviews::submit_review,
        reviews::my_reviews,
        health::health,
    ),
    components(schemas(
        auth::RegisterRequest,
        auth::LoginRequest,
        auth::UserResponse,
        auth::SessionResponse,
        auth::ProfileUser,
        auth::ProfileResponse,
        places::PlaceSummaryItem,
        places::SearchResponse,
        places::PlaceItem,
        places::PlaceReviewItem,
        places::PlaceDetailsResponse,
        reviews::ReviewRequest,
        reviews::ReviewItem,
        reviews::SubmitReviewResponse,
        reviews::MyReviewItem,
        reviews::MyReviewsResponse,
        health::HealthResp,
        error::ErrorBody,
    )),
    tags(
        (name = "Auth", description = "Registration, login and profile"),
        (name = "Places", description = "Place search and details"),
        (name = "Reviews", description = "Writing and listing reviews"),
        (name = "Health", description = "System health checks")
    )
)]
pub struct ApiDoc;

/// Every `/api` route plus the JSON 404 fallback. Layers such as CORS and
/// tracing are left to the caller.
pub fn api_router(ctx: AppContext, pool: SqlitePool) -> Router {
    Router::new()
        .nest("/api", health::routes(pool))
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api/places", places::routes(ctx.clone()))
        .nest("/api/reviews", reviews::routes(ctx))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .fallback(error::not_found)
}
