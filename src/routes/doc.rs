use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        documents::{DocumentBody, DocumentList},
        payments::{PaymentIntentRequest, PaymentIntentResponse, PaymentRecorded},
        products::ProductWithOwner,
        users::{IsAdminResponse, IsSellerResponse, UpsertUserResponse},
    },
    routes::{admin, bookings, categories, health, payments, products, users},
    store::{DeleteResult, InsertResult, UpdateResult},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::upsert_user,
        users::is_seller,
        users::is_admin,
        admin::verify_user,
        admin::list_sellers,
        admin::delete_seller,
        admin::list_buyers,
        admin::delete_buyer,
        categories::list_categories,
        products::list_by_category,
        products::get_product_with_owner,
        products::create_product,
        products::seller_products,
        products::delete_seller_product,
        products::feature_product,
        products::list_featured,
        products::report_product,
        products::list_reported,
        products::delete_reported_product,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::create_booking,
        payments::create_payment_intent,
        payments::record_payment
    ),
    components(
        schemas(
            DocumentList,
            DocumentBody,
            ProductWithOwner,
            UpsertUserResponse,
            IsSellerResponse,
            IsAdminResponse,
            PaymentIntentRequest,
            PaymentIntentResponse,
            PaymentRecorded,
            InsertResult,
            UpdateResult,
            DeleteResult,
            health::HealthData
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "Registration and role lookup"),
        (name = "Admin", description = "Seller and buyer administration"),
        (name = "Categories", description = "Product categories"),
        (name = "Products", description = "Listings"),
        (name = "Moderation", description = "Reported listings"),
        (name = "Bookings", description = "Buyer bookings"),
        (name = "Payments", description = "Payment intents and payment records"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
