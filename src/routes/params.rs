use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmailQuery {
    /// Email of the user the listing belongs to
    pub email: String,
}
