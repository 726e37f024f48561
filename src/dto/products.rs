use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Document;

/// A product together with the user who listed it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductWithOwner {
    #[schema(value_type = Object)]
    pub product: Document,
    /// `null` when the product's `userEmail` matches no user.
    #[schema(value_type = Option<Object>)]
    pub user: Option<Document>,
}
