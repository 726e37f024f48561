use uuid::Uuid;

use crate::{
    dto::products::ProductWithOwner,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Document, Role, fields, str_field},
    state::AppState,
    store::{Collection, DeleteResult, Filter, InsertResult, Update, UpdateResult, WriteOptions},
};

pub async fn list_by_category(state: &AppState, category_id: &str) -> AppResult<Vec<Document>> {
    let products = state
        .store
        .find(
            Collection::Products,
            &Filter::eq(fields::CATEGORY_ID, category_id),
        )
        .await?;
    Ok(products)
}

pub async fn get_with_owner(state: &AppState, id: Uuid) -> AppResult<ProductWithOwner> {
    let product = state
        .store
        .find_one(Collection::Products, &Filter::by_id(id))
        .await?
        .ok_or(AppError::NotFound)?;

    let user = match str_field(&product, fields::USER_EMAIL) {
        Some(email) => {
            state
                .store
                .find_one(Collection::Users, &Filter::eq(fields::EMAIL, email))
                .await?
        }
        None => None,
    };

    Ok(ProductWithOwner { product, user })
}

/// Stores the listing exactly as submitted.
pub async fn create_product(state: &AppState, product: Document) -> AppResult<InsertResult> {
    let result = state.store.insert_one(Collection::Products, product).await?;
    tracing::debug!(product_id = %result.inserted_id, "product created");
    Ok(result)
}

/// Products listed by `email`. The caller's token must carry that same email
/// and the stored user behind it must be a seller.
pub async fn seller_products(
    state: &AppState,
    caller: &AuthUser,
    email: &str,
) -> AppResult<Vec<Document>> {
    if caller.email() != Some(email) {
        tracing::debug!(email, "seller listing requested for another identity");
        return Err(AppError::Forbidden);
    }

    let seller = state
        .store
        .find_one(Collection::Users, &Filter::eq(fields::EMAIL, email))
        .await?;
    if seller.as_ref().and_then(Role::of) != Some(Role::Seller) {
        return Err(AppError::Forbidden);
    }

    let products = state
        .store
        .find(Collection::Products, &Filter::eq(fields::USER_EMAIL, email))
        .await?;
    Ok(products)
}

/// Deletes by id alone; ownership is not re-checked.
pub async fn delete_product(state: &AppState, id: Uuid) -> AppResult<DeleteResult> {
    let result = state
        .store
        .delete_one(Collection::Products, &Filter::by_id(id))
        .await?;
    tracing::debug!(%id, deleted = result.deleted_count, "product deleted");
    Ok(result)
}

pub async fn feature_product(state: &AppState, id: Uuid) -> AppResult<UpdateResult> {
    let result = state
        .store
        .update_one(
            Collection::Products,
            &Filter::by_id(id),
            Update::set(fields::PRODUCT_STATUS, true),
            WriteOptions::upsert(),
        )
        .await?;
    Ok(result)
}

pub async fn list_featured(state: &AppState) -> AppResult<Vec<Document>> {
    let products = state
        .store
        .find(
            Collection::Products,
            &Filter::eq(fields::PRODUCT_STATUS, true),
        )
        .await?;
    Ok(products)
}

/// Flags a product as reported. Never creates a product.
pub async fn report_product(state: &AppState, id: Uuid) -> AppResult<UpdateResult> {
    let result = state
        .store
        .update_one(
            Collection::Products,
            &Filter::by_id(id),
            Update::set(fields::REPORTED, true),
            WriteOptions::default(),
        )
        .await?;
    tracing::debug!(%id, matched = result.matched_count, "product reported");
    Ok(result)
}

pub async fn list_reported(state: &AppState) -> AppResult<Vec<Document>> {
    let products = state
        .store
        .find(Collection::Products, &Filter::eq(fields::REPORTED, true))
        .await?;
    Ok(products)
}
