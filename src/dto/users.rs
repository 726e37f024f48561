use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::UpdateResult;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpsertUserResponse {
    pub result: UpdateResult,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IsSellerResponse {
    pub is_seller: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IsAdminResponse {
    pub is_admin: bool,
}
