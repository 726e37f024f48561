use axum::{Router, extract::State, routing::get};

use crate::{
    dto::documents::DocumentList, error::AppResult, extract::Json, middleware::auth::AuthUser,
    services::category_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Every category", body = DocumentList),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DocumentList>> {
    let categories = category_service::list_categories(&state).await?;
    Ok(Json(categories.into()))
}
