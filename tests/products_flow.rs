mod common;

use axum::http::StatusCode;
use laptop_city_api::store::{Collection, DocumentStore, Filter};
use serde_json::{Value, json};
use uuid::Uuid;

use common::{TestApp, doc};

async fn seed_product(app: &TestApp, body: Value) -> Uuid {
    let id = Uuid::new_v4();
    app.store.insert_with_id(Collection::Products, id, doc(body)).await;
    id
}

#[tokio::test]
async fn create_product_stores_the_body_verbatim() {
    let app = common::spawn_app();
    let token = app.token_for("seller@laptop.city", "Seller");
    let listing = json!({
        "name": "ThinkPad X1",
        "categoryId": "lenovo",
        "userEmail": "seller@laptop.city",
        "resalePrice": 650,
    });

    let (status, body) = app.post("/products", Some(&token), listing.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], json!(true));
    let id = Uuid::parse_str(body["insertedId"].as_str().unwrap()).unwrap();

    let mut stored = app
        .store
        .find_one(Collection::Products, &Filter::by_id(id))
        .await
        .unwrap()
        .unwrap();
    stored.remove("_id");
    assert_eq!(Value::Object(stored), listing);
}

#[tokio::test]
async fn category_listing_is_exactly_the_matching_set() {
    let app = common::spawn_app();
    seed_product(&app, json!({"name": "XPS 13", "categoryId": "dell"})).await;
    seed_product(&app, json!({"name": "MacBook Air", "categoryId": "apple"})).await;
    seed_product(&app, json!({"name": "Latitude", "categoryId": "dell"})).await;

    let (status, body) = app.get("/products/category/dell", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["XPS 13", "Latitude"]);

    let (status, body) = app.get("/products/category/asus", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn product_with_owner_joins_on_user_email() {
    let app = common::spawn_app();
    app.put(
        "/users/seller@laptop.city",
        None,
        Some(json!({"name": "Sam", "role": "Seller"})),
    )
    .await;
    let id = seed_product(
        &app,
        json!({"name": "Spectre", "userEmail": "seller@laptop.city"}),
    )
    .await;

    let (status, body) = app.get(&format!("/user/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["name"], json!("Spectre"));
    assert_eq!(body["product"]["_id"], json!(id.to_string()));
    assert_eq!(body["user"]["name"], json!("Sam"));
}

#[tokio::test]
async fn product_without_known_owner_has_null_user() {
    let app = common::spawn_app();
    let id = seed_product(&app, json!({"name": "Orphan", "userEmail": "gone@laptop.city"})).await;

    let (status, body) = app.get(&format!("/user/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"], json!(null));
}

#[tokio::test]
async fn missing_product_is_a_handled_404() {
    let app = common::spawn_app();
    let (status, body) = app
        .get(&format!("/user/products/{}", Uuid::new_v4()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Not Found"}));

    let (status, body) = app.get("/user/products/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string(), "{body}");
}

#[tokio::test]
async fn seller_products_require_matching_identity_and_seller_role() {
    let app = common::spawn_app();
    app.put(
        "/users/seller@laptop.city",
        None,
        Some(json!({"role": "Seller"})),
    )
    .await;
    app.put("/users/buyer@laptop.city", None, Some(json!({"role": "buyer"})))
        .await;
    seed_product(&app, json!({"name": "A", "userEmail": "seller@laptop.city"})).await;
    seed_product(&app, json!({"name": "B", "userEmail": "other@laptop.city"})).await;

    let seller = app.token_for("seller@laptop.city", "Seller");
    let (status, body) = app
        .get("/seller-products?email=seller@laptop.city", Some(&seller))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], json!("A"));

    // A buyer asking about their own listings.
    let buyer = app.token_for("buyer@laptop.city", "buyer");
    let (status, body) = app
        .get("/seller-products?email=buyer@laptop.city", Some(&buyer))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"message": "forbidden access"}));

    // A buyer naming a real seller in the query string.
    let (status, _) = app
        .get("/seller-products?email=seller@laptop.city", Some(&buyer))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get("/seller-products", Some(&seller)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("email"), "{body}");
}

#[tokio::test]
async fn deleting_a_nonexistent_product_reports_zero() {
    let app = common::spawn_app();
    let token = app.token_for("seller@laptop.city", "Seller");
    let (status, body) = app
        .delete(&format!("/seller-products/{}", Uuid::new_v4()), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"acknowledged": true, "deletedCount": 0}));

    let id = seed_product(&app, json!({"name": "Sold"})).await;
    let (_, body) = app
        .delete(&format!("/seller-products/{id}"), Some(&token))
        .await;
    assert_eq!(body["deletedCount"], json!(1));
    assert_eq!(app.store.count(Collection::Products).await, 0);
}

#[tokio::test]
async fn featuring_twice_is_idempotent() {
    let app = common::spawn_app();
    let token = app.token_for("root@laptop.city", "admin");
    let id = seed_product(&app, json!({"name": "Pavilion"})).await;
    seed_product(&app, json!({"name": "Not featured"})).await;

    let (status, first) = app
        .put(&format!("/display-home-product/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["modifiedCount"], json!(1));

    let (status, second) = app
        .put(&format!("/display-home-product/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["matchedCount"], json!(1));
    assert_eq!(second["modifiedCount"], json!(0));

    let (_, featured) = app.get("/display-home-product", Some(&token)).await;
    assert_eq!(featured.as_array().unwrap().len(), 1);
    assert_eq!(featured[0]["productStatus"], json!(true));
    assert_eq!(featured[0]["name"], json!("Pavilion"));
}

#[tokio::test]
async fn featuring_an_unknown_id_upserts_it() {
    let app = common::spawn_app();
    let token = app.token_for("root@laptop.city", "admin");
    let id = Uuid::new_v4();

    let (_, body) = app
        .put(&format!("/display-home-product/{id}"), Some(&token), None)
        .await;
    assert_eq!(body["upsertedId"], json!(id.to_string()));
    assert_eq!(app.store.count(Collection::Products).await, 1);
}

#[tokio::test]
async fn report_then_moderate() {
    let app = common::spawn_app();
    let id = seed_product(&app, json!({"name": "Suspicious"})).await;
    seed_product(&app, json!({"name": "Fine"})).await;

    let (status, body) = app.put(&format!("/reported-items/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modifiedCount"], json!(1));

    let token = app.token_for("root@laptop.city", "admin");
    let (_, reported) = app.get("/reported-items", Some(&token)).await;
    assert_eq!(reported.as_array().unwrap().len(), 1);
    assert_eq!(reported[0]["name"], json!("Suspicious"));

    let (_, body) = app.delete(&format!("/reported-items/{id}"), Some(&token)).await;
    assert_eq!(body["deletedCount"], json!(1));

    let (_, reported) = app.get("/reported-items", Some(&token)).await;
    assert_eq!(reported, json!([]));
}

#[tokio::test]
async fn reporting_an_unknown_id_creates_nothing() {
    let app = common::spawn_app();
    let (status, body) = app
        .put(&format!("/reported-items/{}", Uuid::new_v4()), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], json!(0));
    assert_eq!(app.store.count(Collection::Products).await, 0);
}
