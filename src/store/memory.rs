use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    Collection, DeleteResult, DocumentStore, Filter, InsertResult, StoreError, StoreResult,
    Update, UpdateResult, WriteBatch, WriteOp, WriteOptions, WriteOutcome, strip_id, with_id,
};
use crate::models::Document;

type Collections = HashMap<Collection, Vec<(Uuid, Document)>>;

/// In-process document store. Documents keep insertion order per collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document under a caller-chosen id, replacing any previous one.
    pub async fn insert_with_id(&self, collection: Collection, id: Uuid, doc: Document) {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        docs.retain(|(existing, _)| *existing != id);
        docs.push((id, strip_id(doc)));
    }

    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

fn insert(collections: &mut Collections, collection: Collection, doc: Document) -> InsertResult {
    let id = Uuid::new_v4();
    collections
        .entry(collection)
        .or_default()
        .push((id, strip_id(doc)));
    InsertResult::new(id)
}

fn update(
    collections: &mut Collections,
    collection: Collection,
    filter: &Filter,
    update: &Update,
    options: WriteOptions,
) -> StoreResult<UpdateResult> {
    let docs = collections.entry(collection).or_default();
    if let Some((_, current)) = docs.iter_mut().find(|(id, doc)| filter.matches(*id, doc)) {
        let next = update.apply(current);
        let modified = next != *current;
        *current = next;
        return Ok(UpdateResult::matched(modified));
    }
    if !options.upsert {
        return Ok(UpdateResult::unmatched());
    }
    let id = filter.id.unwrap_or_else(Uuid::new_v4);
    // The id exists but the rest of the filter did not match.
    if docs.iter().any(|(existing, _)| *existing == id) {
        return Err(StoreError::DuplicateId { collection, id });
    }
    docs.push((id, update.seed(filter)));
    Ok(UpdateResult::upserted(id))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let found = collections
            .get(&collection)
            .into_iter()
            .flatten()
            .filter(|(id, doc)| filter.matches(*id, doc))
            .map(|(id, doc)| with_id(*id, doc.clone()))
            .collect();
        Ok(found)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        let found = collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|(id, doc)| filter.matches(*id, doc)))
            .map(|(id, doc)| with_id(*id, doc.clone()));
        Ok(found)
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> StoreResult<InsertResult> {
        let mut collections = self.collections.write().await;
        Ok(insert(&mut collections, collection, doc))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        change: Update,
        options: WriteOptions,
    ) -> StoreResult<UpdateResult> {
        let mut collections = self.collections.write().await;
        update(&mut collections, collection, filter, &change, options)
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<DeleteResult> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(DeleteResult::new(0));
        };
        match docs.iter().position(|(id, doc)| filter.matches(*id, doc)) {
            Some(index) => {
                docs.remove(index);
                Ok(DeleteResult::new(1))
            }
            None => Ok(DeleteResult::new(0)),
        }
    }

    async fn apply(&self, batch: WriteBatch) -> StoreResult<Vec<WriteOutcome>> {
        let mut collections = self.collections.write().await;
        // Ops run against a copy that replaces the live map only if all succeed.
        let mut staged = collections.clone();
        let mut outcomes = Vec::with_capacity(batch.ops.len());
        for op in batch.ops {
            let outcome = match op {
                WriteOp::Insert { collection, doc } => {
                    WriteOutcome::Inserted(insert(&mut staged, collection, doc))
                }
                WriteOp::Update {
                    collection,
                    filter,
                    update: change,
                    options,
                } => WriteOutcome::Updated(update(
                    &mut staged,
                    collection,
                    &filter,
                    &change,
                    options,
                )?),
            };
            outcomes.push(outcome);
        }
        *collections = staged;
        Ok(outcomes)
    }
}
