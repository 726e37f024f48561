use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Document;

/// A list of raw store documents.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct DocumentList {
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Document>,
}

impl From<Vec<Document>> for DocumentList {
    fn from(items: Vec<Document>) -> Self {
        Self { items }
    }
}

/// A single raw store document; `null` when nothing matched.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct DocumentBody {
    #[schema(value_type = Option<Object>)]
    pub doc: Option<Document>,
}

impl From<Option<Document>> for DocumentBody {
    fn from(doc: Option<Document>) -> Self {
        Self { doc }
    }
}
