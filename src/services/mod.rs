pub mod admin_service;
pub mod booking_service;
pub mod category_service;
pub mod payment_service;
pub mod product_service;
pub mod user_service;
