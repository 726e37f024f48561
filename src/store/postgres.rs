use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::{
    Collection, DeleteResult, DocumentStore, Filter, InsertResult, StoreError, StoreResult,
    Update, UpdateResult, WriteBatch, WriteOp, WriteOptions, WriteOutcome, strip_id, with_id,
};
use crate::models::Document;

// $1: optional id, $2: containment document.
const MATCH: &str = "($1::uuid IS NULL OR id = $1) AND doc @> $2::jsonb";

/// Collections stored as `(id uuid, doc jsonb, created_at, seq)` tables;
/// `seq` orders reads by insertion.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_document(collection: Collection, id: Uuid, doc: Value) -> StoreResult<Document> {
    match doc {
        Value::Object(map) => Ok(with_id(id, map)),
        _ => Err(StoreError::Corrupt { collection }),
    }
}

async fn insert_in(
    conn: &mut PgConnection,
    collection: Collection,
    doc: Document,
) -> StoreResult<InsertResult> {
    let id = Uuid::new_v4();
    let sql = format!(
        "INSERT INTO {} (id, doc) VALUES ($1, $2)",
        collection.table_name()
    );
    sqlx::query(&sql)
        .bind(id)
        .bind(Value::Object(strip_id(doc)))
        .execute(conn)
        .await?;
    Ok(InsertResult::new(id))
}

async fn update_in(
    conn: &mut PgConnection,
    collection: Collection,
    filter: &Filter,
    update: &Update,
    options: WriteOptions,
) -> StoreResult<UpdateResult> {
    let table = collection.table_name();

    if options.upsert {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(filter.lock_key(collection))
            .execute(&mut *conn)
            .await?;
    }

    let sql = format!("SELECT id, doc FROM {table} WHERE {MATCH} ORDER BY seq LIMIT 1 FOR UPDATE");
    let current: Option<(Uuid, Value)> = sqlx::query_as(&sql)
        .bind(filter.id)
        .bind(Value::Object(filter.fields.clone()))
        .fetch_optional(&mut *conn)
        .await?;

    match current {
        Some((id, Value::Object(doc))) => {
            let next = update.apply(&doc);
            if next == doc {
                return Ok(UpdateResult::matched(false));
            }
            let sql = format!("UPDATE {table} SET doc = $2 WHERE id = $1");
            sqlx::query(&sql)
                .bind(id)
                .bind(Value::Object(next))
                .execute(&mut *conn)
                .await?;
            Ok(UpdateResult::matched(true))
        }
        Some(_) => Err(StoreError::Corrupt { collection }),
        None if options.upsert => {
            let id = filter.id.unwrap_or_else(Uuid::new_v4);
            let sql = format!("INSERT INTO {table} (id, doc) VALUES ($1, $2)");
            sqlx::query(&sql)
                .bind(id)
                .bind(Value::Object(update.seed(filter)))
                .execute(&mut *conn)
                .await?;
            Ok(UpdateResult::upserted(id))
        }
        None => Ok(UpdateResult::unmatched()),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>> {
        let sql = format!(
            "SELECT id, doc FROM {} WHERE {MATCH} ORDER BY seq",
            collection.table_name()
        );
        let rows: Vec<(Uuid, Value)> = sqlx::query_as(&sql)
            .bind(filter.id)
            .bind(Value::Object(filter.fields.clone()))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|(id, doc)| into_document(collection, id, doc))
            .collect()
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<Option<Document>> {
        let sql = format!(
            "SELECT id, doc FROM {} WHERE {MATCH} ORDER BY seq LIMIT 1",
            collection.table_name()
        );
        let row: Option<(Uuid, Value)> = sqlx::query_as(&sql)
            .bind(filter.id)
            .bind(Value::Object(filter.fields.clone()))
            .fetch_optional(&self.pool)
            .await?;
        row.map(|(id, doc)| into_document(collection, id, doc))
            .transpose()
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> StoreResult<InsertResult> {
        let mut conn = self.pool.acquire().await?;
        insert_in(&mut conn, collection, doc).await
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: Update,
        options: WriteOptions,
    ) -> StoreResult<UpdateResult> {
        let mut tx = self.pool.begin().await?;
        let result = update_in(&mut tx, collection, filter, &update, options).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<DeleteResult> {
        let table = collection.table_name();
        let sql = format!(
            "DELETE FROM {table} WHERE id = (SELECT id FROM {table} WHERE {MATCH} ORDER BY seq LIMIT 1)"
        );
        let result = sqlx::query(&sql)
            .bind(filter.id)
            .bind(Value::Object(filter.fields.clone()))
            .execute(&self.pool)
            .await?;
        Ok(DeleteResult::new(result.rows_affected()))
    }

    async fn apply(&self, batch: WriteBatch) -> StoreResult<Vec<WriteOutcome>> {
        let mut tx = self.pool.begin().await?;
        let mut outcomes = Vec::with_capacity(batch.ops.len());
        for op in batch.ops {
            let outcome = match op {
                WriteOp::Insert { collection, doc } => {
                    WriteOutcome::Inserted(insert_in(&mut tx, collection, doc).await?)
                }
                WriteOp::Update {
                    collection,
                    filter,
                    update,
                    options,
                } => WriteOutcome::Updated(
                    update_in(&mut tx, collection, &filter, &update, options).await?,
                ),
            };
            outcomes.push(outcome);
        }
        // Dropping `tx` on an early return rolls the whole batch back.
        tx.commit().await?;
        Ok(outcomes)
    }
}
