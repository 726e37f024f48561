use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Document, Role, fields},
    state::AppState,
    store::{Collection, DeleteResult, Filter, Update, UpdateResult, WriteOptions},
};

pub async fn verify_user(state: &AppState, id: Uuid) -> AppResult<UpdateResult> {
    let result = state
        .store
        .update_one(
            Collection::Users,
            &Filter::by_id(id),
            Update::set(fields::VERIFIED, true),
            WriteOptions::default(),
        )
        .await?;
    Ok(result)
}

pub async fn list_by_role(state: &AppState, role: Role) -> AppResult<Vec<Document>> {
    let users = state
        .store
        .find(Collection::Users, &Filter::eq(fields::ROLE, role.as_str()))
        .await?;
    Ok(users)
}

/// Deletes by id alone; the stored role is not checked.
pub async fn delete_user(state: &AppState, id: Uuid) -> AppResult<DeleteResult> {
    let result = state
        .store
        .delete_one(Collection::Users, &Filter::by_id(id))
        .await?;
    tracing::debug!(%id, deleted = result.deleted_count, "user deleted");
    Ok(result)
}
