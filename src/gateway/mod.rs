//! # Payment Gateway
//!
//! The external payment processor, reduced to the single call this service
//! needs: turning an amount into a client-usable payment intent secret.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub mod stripe;

pub use stripe::{StripeConfig, StripeGateway};

/// Currency every intent is created in.
pub const CURRENCY: &str = "usd";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or malformed gateway settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The provider answered with an error body
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Transport failure talking to the provider
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered with something we could not parse
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an intent for `amount` minor units of `currency`.
    async fn create_payment_intent(&self, amount: i64, currency: &str)
    -> GatewayResult<PaymentIntent>;

    /// Provider name, for logging.
    fn provider_name(&self) -> &'static str;
}

pub type GatewayState = Arc<dyn PaymentGateway>;
