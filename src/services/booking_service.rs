use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Document, fields},
    state::AppState,
    store::{Collection, Filter, InsertResult},
};

pub async fn create_booking(state: &AppState, booking: Document) -> AppResult<InsertResult> {
    let result = state.store.insert_one(Collection::Bookings, booking).await?;
    tracing::debug!(booking_id = %result.inserted_id, "booking created");
    Ok(result)
}

pub async fn list_for_buyer(state: &AppState, email: &str) -> AppResult<Vec<Document>> {
    let bookings = state
        .store
        .find(Collection::Bookings, &Filter::eq(fields::EMAIL, email))
        .await?;
    Ok(bookings)
}

pub async fn get_booking(state: &AppState, id: Uuid) -> AppResult<Option<Document>> {
    let booking = state
        .store
        .find_one(Collection::Bookings, &Filter::by_id(id))
        .await?;
    Ok(booking)
}
