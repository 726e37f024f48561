use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{InsertResult, UpdateResult};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentIntentRequest {
    /// Amount in minor currency units.
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Outcome of recording a payment. All three writes commit together.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecorded {
    #[serde(flatten)]
    pub payment: InsertResult,
    pub product_update: UpdateResult,
    pub booking_update: UpdateResult,
}
