use serde_json::Value;
use crate::{
    dto::users::{IsAdminResponse, IsSellerResponse, UpsertUserResponse},
    error::AppResult,
    models::{Document, Role, fields},
    state::AppState,
    store::{Collection, Filter, Update, WriteOptions},
};

/// Replace (or create) the user keyed by `email` and hand back a fresh token
/// whose payload is the stored user document.
pub async fn upsert_user(
    state: &AppState,
    email: &str,
    mut user: Document,
) -> AppResult<UpsertUserResponse> {
    // The path email is the key; keep the stored document findable by it.
    user.insert(fields::EMAIL.to_string(), Value::String(email.to_string()));

    let result = state
        .store
        .update_one(
            Collection::Users,
            &Filter::eq(fields::EMAIL, email),
            Update::Replace(user.clone()),
            WriteOptions::upsert(),
        )
        .await?;
    let token = state.tokens.issue(&user)?;

    tracing::debug!(
        email,
        matched = result.matched_count,
        upserted = result.upserted_count,
        "user upserted"
    );
    Ok(UpsertUserResponse { result, token })
}

async fn role_of(state: &AppState, email: &str) -> AppResult<Option<Role>> {
    let user = state
        .store
        .find_one(Collection::Users, &Filter::eq(fields::EMAIL, email))
        .await?;
    Ok(user.as_ref().and_then(Role::of))
}

pub async fn is_seller(state: &AppState, email: &str) -> AppResult<IsSellerResponse> {
    let is_seller = role_of(state, email).await? == Some(Role::Seller);
    Ok(IsSellerResponse { is_seller })
}

pub async fn is_admin(state: &AppState, email: &str) -> AppResult<IsAdminResponse> {
    let is_admin = role_of(state, email).await? == Some(Role::Admin);
    Ok(IsAdminResponse { is_admin })
}
