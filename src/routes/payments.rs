use axum::{Router, extract::State, routing::post};

use crate::{
    dto::{
        documents::DocumentBody,
        payments::{PaymentIntentRequest, PaymentIntentResponse, PaymentRecorded},
    },
    error::AppResult,
    extract::Json,
    models::Document,
    services::payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payments", post(record_payment))
}

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret for the new intent", body = PaymentIntentResponse),
        (status = 502, description = "Payment gateway error")
    ),
    tag = "Payments"
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(payload): Json<PaymentIntentRequest>,
) -> AppResult<Json<PaymentIntentResponse>> {
    let resp = payment_service::create_payment_intent(&state, payload.price).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/payments",
    request_body = DocumentBody,
    responses(
        (status = 200, description = "Payment stored; product and booking flagged paid", body = PaymentRecorded),
        (status = 400, description = "Missing or malformed productId"),
        (status = 500, description = "Nothing was written")
    ),
    tag = "Payments"
)]
pub async fn record_payment(
    State(state): State<AppState>,
    Json(payment): Json<Document>,
) -> AppResult<Json<PaymentRecorded>> {
    Ok(Json(payment_service::record_payment(&state, payment).await?))
}
