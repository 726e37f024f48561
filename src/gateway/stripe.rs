use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use super::{GatewayError, GatewayResult, PaymentGateway, PaymentIntent};

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,
    /// API base URL, overridable for tests
    pub api_base_url: String,
}

impl StripeConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    fn payment_intents_url(&self) -> String {
        format!(
            "{}/v1/payment_intents",
            self.api_base_url.trim_end_matches('/')
        )
    }
}

pub struct StripeGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeGateway {
    pub fn new(config: StripeConfig) -> GatewayResult<Self> {
        if config.secret_key.trim().is_empty() {
            return Err(GatewayError::Configuration(
                "Stripe secret key is empty".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GatewayError::Configuration(format!("HTTP client: {e}")))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self))]
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> GatewayResult<PaymentIntent> {
        let amount = amount.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .client
            .post(self.config.payment_intents_url())
            .header("Authorization", self.config.auth_header())
            .form(&form)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<StripeErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            error!(%status, %message, "Stripe rejected payment intent");
            return Err(GatewayError::Provider {
                provider: self.provider_name().to_string(),
                message,
            });
        }

        let intent: StripePaymentIntent = serde_json::from_str(&body)
            .map_err(|e| GatewayError::UnexpectedResponse(e.to_string()))?;
        debug!(intent_id = %intent.id, "created payment intent");

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
