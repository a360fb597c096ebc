use axum::extract::FromRequestParts;
use axum::http::request::Parts;
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
use crate::application::services::identity::Caller;
use crate::application::use_cases::auth::AuthSession;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::User;
use crate::presentation::http::error::ApiJson;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileUser {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: ProfileUser,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            phone_number: user.phone_number.clone(),
        }
    }
}

fn session_response(message: &str, session: AuthSession) -> SessionResponse {
    SessionResponse {
        message: message.to_string(),
        user: UserResponse::from(&session.user),
        token: session.token,
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(profile))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/register", tag = "Auth", request_body = RegisterRequest, security(()), responses(
    (status = 201, body = SessionResponse),
    (status = 400, body = super::error::ErrorBody),
    (status = 409, body = super::error::ErrorBody)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let repo = ctx.user_repo();
    let identity = ctx.identity();
    let uc = RegisterUc {
        repo: repo.as_ref(),
        identity: identity.as_ref(),
    };
    let dto = RegisterDto {
        name: req.name,
        phone_number: req.phone_number,
        password: req.password,
    };
    let session = uc.execute(&dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(session_response("Registration successful", session)),
    ))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = SessionResponse),
    (status = 400, body = super::error::ErrorBody),
    (status = 401, body = super::error::ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let repo = ctx.user_repo();
    let identity = ctx.identity();
    let uc = LoginUc {
        repo: repo.as_ref(),
        identity: identity.as_ref(),
    };
    let dto = LoginDto {
        phone_number: req.phone_number,
        password: req.password,
    };
    let session = uc.execute(&dto).await?;
    Ok(Json(session_response("Login successful", session)))
}

#[utoipa::path(get, path = "/api/auth/profile", tag = "Auth", responses(
    (status = 200, body = ProfileResponse),
    (status = 401, body = super::error::ErrorBody),
    (status = 403, body = super::error::ErrorBody),
    (status = 404, body = super::error::ErrorBody)
))]
pub async fn profile(
    State(ctx): State<AppContext>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let user = uc.execute(caller.id).await?;
    Ok(Json(ProfileResponse {
        user: ProfileUser {
            id: user.id,
            name: user.name,
            phone_number: user.phone_number,
            created_at: user.created_at,
        },
    }))
}

// --- Bearer extractor ---

/// Credentials of an `Authorization` value using the `Bearer` scheme.
/// The scheme name is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// The caller named by a valid `Authorization: Bearer` token.
///
/// A missing header rejects with 401, a bad or expired token with 403.
pub struct CurrentUser(pub Caller);

#[axum::async_trait]
impl FromRequestParts<AppContext> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token);
        let caller = ctx.identity().verify_token(token)?;
        Ok(CurrentUser(caller))
    }
}
