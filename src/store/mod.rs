//! Document store abstraction.
//!
//! Handlers only ever talk to `dyn DocumentStore`: named collections of
//! schemaless JSON documents, addressed with equality filters and
//! set/replace updates. `PgDocumentStore` backs production,
//! `MemoryStore` backs tests and local runs.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Document, ID_FIELD};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Categories,
    Products,
    Bookings,
    Payments,
}

impl Collection {
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Categories => "categories",
            Collection::Products => "products",
            Collection::Bookings => "bookings",
            Collection::Payments => "payments",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Conjunction of an optional id match and top-level field equalities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub id: Option<Uuid>,
    pub fields: Document,
}

impl Filter {
    /// Matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            fields: Document::new(),
        }
    }

    pub fn eq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and_eq(key, value)
    }

    pub fn and_eq(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn matches(&self, id: Uuid, doc: &Document) -> bool {
        if self.id.is_some_and(|wanted| wanted != id) {
            return false;
        }
        self.fields
            .iter()
            .all(|(key, value)| doc.get(key) == Some(value))
    }

    /// Stable key used to serialize concurrent upserts of the same filter.
    pub(crate) fn lock_key(&self, collection: Collection) -> String {
        let id = self.id.map(|id| id.to_string()).unwrap_or_default();
        format!(
            "{collection}:{id}:{}",
            Value::Object(self.fields.clone())
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Merge the given fields into the matched document.
    Set(Document),
    /// Replace the matched document's body entirely.
    Replace(Document),
}

impl Update {
    pub fn set(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut doc = Document::new();
        doc.insert(key.into(), value.into());
        Update::Set(doc)
    }

    pub(crate) fn apply(&self, current: &Document) -> Document {
        match self {
            Update::Set(fields) => {
                let mut next = current.clone();
                for (key, value) in strip_id(fields.clone()) {
                    next.insert(key, value);
                }
                next
            }
            Update::Replace(doc) => strip_id(doc.clone()),
        }
    }

    /// Body of the document an upsert inserts when nothing matched: the
    /// filter's equalities overlaid with the update.
    pub(crate) fn seed(&self, filter: &Filter) -> Document {
        let base = strip_id(filter.fields.clone());
        self.apply(&base)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub upsert: bool,
}

impl WriteOptions {
    pub fn upsert() -> Self {
        Self { upsert: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

impl InsertResult {
    pub fn new(inserted_id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Uuid>,
}

impl UpdateResult {
    pub fn unmatched() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 0,
            upserted_id: None,
        }
    }

    pub fn matched(modified: bool) -> Self {
        Self {
            matched_count: 1,
            modified_count: u64::from(modified),
            ..Self::unmatched()
        }
    }

    pub fn upserted(id: Uuid) -> Self {
        Self {
            upserted_count: 1,
            upserted_id: Some(id),
            ..Self::unmatched()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Insert {
        collection: Collection,
        doc: Document,
    },
    Update {
        collection: Collection,
        filter: Filter,
        update: Update,
        options: WriteOptions,
    },
}

/// Writes applied all-or-nothing, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    pub ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, collection: Collection, doc: Document) -> Self {
        self.ops.push(WriteOp::Insert { collection, doc });
        self
    }

    pub fn update(
        mut self,
        collection: Collection,
        filter: Filter,
        update: Update,
        options: WriteOptions,
    ) -> Self {
        self.ops.push(WriteOp::Update {
            collection,
            filter,
            update,
            options,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Inserted(InsertResult),
    Updated(UpdateResult),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{collection} already holds a document with id {id}")]
    DuplicateId { collection: Collection, id: Uuid },

    #[error("stored document in {collection} is not an object")]
    Corrupt { collection: Collection },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Cheap round trip proving the store is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// All matching documents in insertion order, each carrying `_id`.
    async fn find(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<Option<Document>>;

    async fn insert_one(&self, collection: Collection, doc: Document) -> StoreResult<InsertResult>;

    /// Updates the first matching document. With `upsert`, inserts
    /// `update.seed(filter)` when nothing matches, reusing the filter id if any.
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: Update,
        options: WriteOptions,
    ) -> StoreResult<UpdateResult>;

    async fn delete_one(&self, collection: Collection, filter: &Filter)
    -> StoreResult<DeleteResult>;

    /// Applies every op or none of them. Outcomes are returned in op order.
    async fn apply(&self, batch: WriteBatch) -> StoreResult<Vec<WriteOutcome>>;
}

pub type StoreState = Arc<dyn DocumentStore>;

pub(crate) fn strip_id(mut doc: Document) -> Document {
    doc.remove(ID_FIELD);
    doc
}

pub(crate) fn with_id(id: Uuid, mut doc: Document) -> Document {
    doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn filter_matches_on_id_and_every_field() {
        let id = Uuid::new_v4();
        let product = doc(json!({"categoryId": "c1", "paid": false}));

        assert!(Filter::all().matches(id, &product));
        assert!(Filter::by_id(id).matches(id, &product));
        assert!(!Filter::by_id(Uuid::new_v4()).matches(id, &product));
        assert!(Filter::eq("categoryId", "c1").matches(id, &product));
        assert!(!Filter::eq("categoryId", "c1").and_eq("paid", true).matches(id, &product));
        assert!(!Filter::eq("missing", "x").matches(id, &product));
    }

    #[test]
    fn set_merges_and_replace_overwrites() {
        let current = doc(json!({"name": "ThinkPad", "paid": false}));

        let merged = Update::set("paid", true).apply(&current);
        assert_eq!(Value::Object(merged), json!({"name": "ThinkPad", "paid": true}));

        let replaced = Update::Replace(doc(json!({"_id": "ignored", "role": "buyer"}))).apply(&current);
        assert_eq!(Value::Object(replaced), json!({"role": "buyer"}));
    }

    #[test]
    fn upsert_seed_keeps_filter_fields_unless_overridden() {
        let filter = Filter::eq("email", "a@b.com");
        let seeded = Update::Replace(doc(json!({"role": "Seller"}))).seed(&filter);
        assert_eq!(
            Value::Object(seeded),
            json!({"email": "a@b.com", "role": "Seller"})
        );
    }

    #[test]
    fn results_serialize_in_driver_shape() {
        let id = Uuid::nil();
        assert_eq!(
            serde_json::to_value(UpdateResult::upserted(id)).unwrap(),
            json!({
                "acknowledged": true,
                "matchedCount": 0,
                "modifiedCount": 0,
                "upsertedCount": 1,
                "upsertedId": id.to_string(),
            })
        );
        assert_eq!(
            serde_json::to_value(DeleteResult::new(0)).unwrap(),
            json!({"acknowledged": true, "deletedCount": 0})
        );
    }
}
