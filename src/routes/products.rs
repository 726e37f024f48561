use axum::{
    Router,
    extract::State,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        documents::{DocumentBody, DocumentList},
        products::ProductWithOwner,
    },
    error::AppResult,
    extract::{Json, Path, Query},
    middleware::auth::AuthUser,
    models::Document,
    routes::params::EmailQuery,
    services::product_service,
    state::AppState,
    store::{DeleteResult, InsertResult, UpdateResult},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/category/{id}", get(list_by_category))
        .route("/user/products/{id}", get(get_product_with_owner))
        .route("/seller-products", get(seller_products))
        .route("/seller-products/{id}", delete(delete_seller_product))
        .route("/display-home-product", get(list_featured))
        .route("/display-home-product/{id}", put(feature_product))
        .route("/reported-items", get(list_reported))
        .route(
            "/reported-items/{id}",
            put(report_product).delete(delete_reported_product),
        )
}

#[utoipa::path(
    get,
    path = "/products/category/{id}",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Products in the category", body = DocumentList)
    ),
    tag = "Products"
)]
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DocumentList>> {
    let products = product_service::list_by_category(&state, &id).await?;
    Ok(Json(products.into()))
}

#[utoipa::path(
    get,
    path = "/user/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with its seller", body = ProductWithOwner),
        (status = 404, description = "Not Found")
    ),
    tag = "Products"
)]
pub async fn get_product_with_owner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProductWithOwner>> {
    Ok(Json(product_service::get_with_owner(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = DocumentBody,
    responses(
        (status = 200, description = "Product stored", body = InsertResult),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(product): Json<Document>,
) -> AppResult<Json<InsertResult>> {
    Ok(Json(product_service::create_product(&state, product).await?))
}

#[utoipa::path(
    get,
    path = "/seller-products",
    params(EmailQuery),
    responses(
        (status = 200, description = "Products listed by the seller", body = DocumentList),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Not this seller, or not a seller")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn seller_products(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<EmailQuery>,
) -> AppResult<Json<DocumentList>> {
    let products = product_service::seller_products(&state, &user, &query.email).await?;
    Ok(Json(products.into()))
}

#[utoipa::path(
    delete,
    path = "/seller-products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Delete result", body = DeleteResult),
        (status = 401, description = "Missing token")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_seller_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteResult>> {
    Ok(Json(product_service::delete_product(&state, id).await?))
}

#[utoipa::path(
    put,
    path = "/display-home-product/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product featured", body = UpdateResult),
        (status = 401, description = "Missing token")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn feature_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UpdateResult>> {
    Ok(Json(product_service::feature_product(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/display-home-product",
    responses(
        (status = 200, description = "Featured products", body = DocumentList),
        (status = 401, description = "Missing token")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_featured(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DocumentList>> {
    let products = product_service::list_featured(&state).await?;
    Ok(Json(products.into()))
}

// Public on purpose: clients report from listing pages without signing in.
#[utoipa::path(
    put,
    path = "/reported-items/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product flagged", body = UpdateResult)
    ),
    tag = "Moderation"
)]
pub async fn report_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UpdateResult>> {
    Ok(Json(product_service::report_product(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/reported-items",
    responses(
        (status = 200, description = "Reported products", body = DocumentList),
        (status = 401, description = "Missing token")
    ),
    security(("bearer_auth" = [])),
    tag = "Moderation"
)]
pub async fn list_reported(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DocumentList>> {
    let products = product_service::list_reported(&state).await?;
    Ok(Json(products.into()))
}

#[utoipa::path(
    delete,
    path = "/reported-items/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Delete result", body = DeleteResult),
        (status = 401, description = "Missing token")
    ),
    security(("bearer_auth" = [])),
    tag = "Moderation"
)]
pub async fn delete_reported_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteResult>> {
    Ok(Json(product_service::delete_product(&state, id).await?))
}
