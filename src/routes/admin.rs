use axum::{
    Router,
    extract::State,
    routing::{delete, get, put},
};
use uuid::Uuid;

use crate::{
    dto::documents::DocumentList,
    error::AppResult,
    extract::{Json, Path},
    middleware::auth::AuthUser,
    models::Role,
    services::admin_service,
    state::AppState,
    store::{DeleteResult, UpdateResult},
};

// Gated by token only; the caller's role is not consulted.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/verify-user/{id}", put(verify_user))
        .route("/all-sellers", get(list_sellers))
        .route("/all-sellers/{id}", delete(delete_seller))
        .route("/all-buyers", get(list_buyers))
        .route("/all-buyers/{id}", delete(delete_buyer))
}

#[utoipa::path(
    put,
    path = "/verify-user/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User marked verified", body = UpdateResult),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn verify_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UpdateResult>> {
    Ok(Json(admin_service::verify_user(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/all-sellers",
    responses(
        (status = 200, description = "Every seller", body = DocumentList),
        (status = 401, description = "Missing token")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_sellers(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DocumentList>> {
    let users = admin_service::list_by_role(&state, Role::Seller).await?;
    Ok(Json(users.into()))
}

#[utoipa::path(
    delete,
    path = "/all-sellers/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Delete result", body = DeleteResult),
        (status = 401, description = "Missing token")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_seller(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteResult>> {
    Ok(Json(admin_service::delete_user(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/all-buyers",
    responses(
        (status = 200, description = "Every buyer", body = DocumentList),
        (status = 401, description = "Missing token")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_buyers(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DocumentList>> {
    let users = admin_service::list_by_role(&state, Role::Buyer).await?;
    Ok(Json(users.into()))
}

#[utoipa::path(
    delete,
    path = "/all-buyers/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Delete result", body = DeleteResult),
        (status = 401, description = "Missing token")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_buyer(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteResult>> {
    Ok(Json(admin_service::delete_user(&state, id).await?))
}
