//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Unique username
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    #[schema(example = "jdoe", min_length = 3)]
    pub username: String,
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "John Doe")]
    pub name: String,
    /// National identity document number
    #[validate(length(min = 1, message = "National id is required"))]
    #[schema(example = "40012345678")]
    pub national_id: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:id", get(get_user))
}

/// Create a new user with an empty wallet
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created with an empty wallet", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or national id already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .create_user(payload.username, payload.name, payload.national_id)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;

    Ok(Json(UserResponse::from(user)))
}
