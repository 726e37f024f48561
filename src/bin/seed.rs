use laptop_city_api::{
    config::database_url_from_env,
    db::{create_pool, run_migrations},
    models::Document,
    store::{Collection, DocumentStore, Filter, PgDocumentStore},
};
use serde_json::json;

// Categories have no write endpoint; this is how they get into the store.
const CATEGORIES: &[(&str, &str)] = &[
    ("Apple", "MacBook Air and MacBook Pro"),
    ("Dell", "XPS, Latitude and Inspiron"),
    ("Lenovo", "ThinkPad, IdeaPad and Legion"),
    ("HP", "Spectre, EliteBook and Pavilion"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = database_url_from_env()?;

    let pool = create_pool(&database_url).await?;
    run_migrations(&pool).await?;
    let store = PgDocumentStore::new(pool);

    let existing = store.find(Collection::Categories, &Filter::all()).await?;
    if !existing.is_empty() {
        println!("Categories already seeded ({} present)", existing.len());
        return Ok(());
    }

    for (name, description) in CATEGORIES {
        let category: Document = json!({ "name": name, "description": description })
            .as_object()
            .cloned()
            .unwrap_or_default();
        let result = store.insert_one(Collection::Categories, category).await?;
        println!("Seeded category {name} ({})", result.inserted_id);
    }

    Ok(())
}
