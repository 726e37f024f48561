use crate::{
    error::AppResult,
    models::Document,
    state::AppState,
    store::{Collection, Filter},
};

pub async fn list_categories(state: &AppState) -> AppResult<Vec<Document>> {
    let categories = state
        .store
        .find(Collection::Categories, &Filter::all())
        .await?;
    Ok(categories)
}
