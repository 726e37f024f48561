use axum::{
    Router,
    extract::State,
    routing::{get, put},
};

use crate::{
    dto::{
        documents::DocumentBody,
        users::{IsAdminResponse, IsSellerResponse, UpsertUserResponse},
    },
    error::{AppError, AppResult},
    extract::{Json, Path},
    middleware::auth::AuthUser,
    models::Document,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{email}", put(upsert_user))
        .route("/user/seller/{email}", get(is_seller))
        .route("/user/admin/{email}", get(is_admin))
}

#[utoipa::path(
    put,
    path = "/users/{email}",
    params(("email" = String, Path, description = "User email")),
    request_body = DocumentBody,
    responses(
        (status = 200, description = "User stored, token issued", body = UpsertUserResponse),
        (status = 400, description = "Body is not a JSON object")
    ),
    tag = "Users"
)]
pub async fn upsert_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(user): Json<Document>,
) -> AppResult<Json<UpsertUserResponse>> {
    if email.trim().is_empty() {
        return Err(AppError::BadRequest("email is required".into()));
    }
    let resp = user_service::upsert_user(&state, &email, user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/user/seller/{email}",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Whether the user is a seller", body = IsSellerResponse),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn is_seller(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(email): Path<String>,
) -> AppResult<Json<IsSellerResponse>> {
    Ok(Json(user_service::is_seller(&state, &email).await?))
}

#[utoipa::path(
    get,
    path = "/user/admin/{email}",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Whether the user is an admin", body = IsAdminResponse),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn is_admin(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(email): Path<String>,
) -> AppResult<Json<IsAdminResponse>> {
    Ok(Json(user_service::is_admin(&state, &email).await?))
}
