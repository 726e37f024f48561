use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schemaless store document. Every collection in this service holds these.
pub type Document = Map<String, Value>;

/// Key under which a read document carries its store id.
pub const ID_FIELD: &str = "_id";

pub mod fields {
    pub const EMAIL: &str = "email";
    pub const ROLE: &str = "role";
    pub const VERIFIED: &str = "verified";
    pub const CATEGORY_ID: &str = "categoryId";
    pub const USER_EMAIL: &str = "userEmail";
    pub const PAID: &str = "paid";
    pub const PRODUCT_STATUS: &str = "productStatus";
    pub const REPORTED: &str = "reported";
    pub const PRODUCT_ID: &str = "productId";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Seller")]
    Seller,
    #[serde(rename = "buyer")]
    Buyer,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seller => "Seller",
            Role::Buyer => "buyer",
            Role::Admin => "admin",
        }
    }

    /// Role stored on a user document. Unknown or missing values read as no role.
    pub fn of(user: &Document) -> Option<Role> {
        match user.get(fields::ROLE).and_then(Value::as_str)? {
            "Seller" => Some(Role::Seller),
            "buyer" => Some(Role::Buyer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// String field lookup on a document.
pub fn str_field<'a>(doc: &'a Document, key: &str) -> Option<&'a str> {
    doc.get(key).and_then(Value::as_str)
}
