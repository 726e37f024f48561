use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};

use crate::{error::ErrorBody, state::AppState};

pub mod admin;
pub mod bookings;
pub mod categories;
pub mod doc;
pub mod health;
pub mod params;
pub mod payments;
pub mod products;
pub mod users;

/// Every endpoint, docs included, bound to `state`. Transport layers
/// (tracing, request ids, limits, CORS) are added by the binary.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::liveness))
        .route("/health", get(health::health_check))
        .merge(users::router())
        .merge(admin::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(bookings::router())
        .merge(payments::router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    let body = ErrorBody {
        message: format!("No route for {}", uri.path()),
    };
    (StatusCode::NOT_FOUND, Json(body))
}
