use serde_json::Value;
use uuid::Uuid;

use crate::{
    dto::payments::{PaymentIntentResponse, PaymentRecorded},
    error::{AppError, AppResult},
    gateway::CURRENCY,
    models::{Document, fields, str_field},
    state::AppState,
    store::{Collection, Filter, Update, WriteBatch, WriteOptions, WriteOutcome},
};

/// `price` is forwarded as the amount in minor units; the gateway decides
/// whether it is acceptable.
pub async fn create_payment_intent(
    state: &AppState,
    price: f64,
) -> AppResult<PaymentIntentResponse> {
    let amount = price.round() as i64;
    let intent = state
        .gateway
        .create_payment_intent(amount, CURRENCY)
        .await?;
    tracing::debug!(
        provider = state.gateway.provider_name(),
        intent_id = %intent.id,
        amount,
        "payment intent created"
    );
    Ok(PaymentIntentResponse {
        client_secret: intent.client_secret,
    })
}

/// Stores the payment and marks the product and its booking paid, atomically.
///
/// The booking is located by its `productId` field rather than by its own id,
/// and only the first such booking is flagged.
pub async fn record_payment(state: &AppState, payment: Document) -> AppResult<PaymentRecorded> {
    let product_id = str_field(&payment, fields::PRODUCT_ID)
        .ok_or_else(|| AppError::BadRequest("productId is required".into()))?
        .to_string();
    let product = Uuid::parse_str(&product_id)
        .map_err(|_| AppError::BadRequest("productId is not a valid id".into()))?;

    let batch = WriteBatch::new()
        .insert(Collection::Payments, payment)
        .update(
            Collection::Products,
            Filter::by_id(product),
            Update::set(fields::PAID, true),
            WriteOptions::default(),
        )
        .update(
            Collection::Bookings,
            Filter::eq(fields::PRODUCT_ID, Value::String(product_id)),
            Update::set(fields::PAID, true),
            WriteOptions::default(),
        );

    let outcomes = state.store.apply(batch).await?;
    let [
        WriteOutcome::Inserted(payment),
        WriteOutcome::Updated(product_update),
        WriteOutcome::Updated(booking_update),
    ] = <[WriteOutcome; 3]>::try_from(outcomes).map_err(|outcomes| {
        AppError::Internal(anyhow::anyhow!(
            "payment batch returned {} unexpected outcomes",
            outcomes.len()
        ))
    })?
    else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "payment batch outcomes out of order"
        )));
    };

    tracing::info!(
        payment_id = %payment.inserted_id,
        %product,
        product_matched = product_update.matched_count,
        booking_matched = booking_update.matched_count,
        "payment recorded"
    );
    Ok(PaymentRecorded {
        payment,
        product_update,
        booking_update,
    })
}
