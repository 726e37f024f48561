use axum::{Router, extract::State, routing::get};
use uuid::Uuid;

use crate::{
    dto::documents::{DocumentBody, DocumentList},
    error::AppResult,
    extract::{Json, Path, Query},
    middleware::auth::AuthUser,
    models::Document,
    routes::params::EmailQuery,
    services::booking_service,
    state::AppState,
    store::InsertResult,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/book-product", get(list_bookings).post(create_booking))
        .route("/book-product/{id}", get(get_booking))
}

#[utoipa::path(
    get,
    path = "/book-product",
    params(EmailQuery),
    responses(
        (status = 200, description = "Bookings made by the buyer", body = DocumentList),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<EmailQuery>,
) -> AppResult<Json<DocumentList>> {
    let bookings = booking_service::list_for_buyer(&state, &query.email).await?;
    Ok(Json(bookings.into()))
}

// Public: the payment page loads the booking before the buyer pays.
#[utoipa::path(
    get,
    path = "/book-product/{id}",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "The booking, or null", body = DocumentBody)
    ),
    tag = "Bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DocumentBody>> {
    let booking = booking_service::get_booking(&state, id).await?;
    Ok(Json(booking.into()))
}

#[utoipa::path(
    post,
    path = "/book-product",
    request_body = DocumentBody,
    responses(
        (status = 200, description = "Booking stored", body = InsertResult),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(booking): Json<Document>,
) -> AppResult<Json<InsertResult>> {
    Ok(Json(booking_service::create_booking(&state, booking).await?))
}
