pub mod documents;
pub mod payments;
pub mod products;
pub mod users;
