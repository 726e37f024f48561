use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::{Document, fields, str_field},
};

/// Lifetime of an issued access token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Token payload: the user document submitted at registration, plus expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub user: Document,
    pub exp: usize,
}

#[derive(Clone)]
pub struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn issue(&self, user: &Document) -> Result<String, AppError> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;
        self.issue_with_exp(user, expiration.timestamp() as usize)
    }

    pub fn issue_with_exp(&self, user: &Document, exp: usize) -> Result<String, AppError> {
        let mut user = user.clone();
        user.remove("exp");
        let claims = Claims { user, exp };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        // The payload is a user-submitted profile; a stray `aud` field in it
        // names no audience this service expects.
        let mut validation = Validation::default();
        validation.validate_aud = false;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(error = %err, "rejected bearer token");
                AppError::InvalidToken
            })
    }
}

/// Authorization gate. A missing header is `Unauthorized` (401); a header
/// whose token fails signature or expiry checks is `InvalidToken` (403).
pub fn authorize(headers: &HeaderMap, keys: &TokenKeys) -> Result<Claims, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AppError::Unauthorized)?;
    let value = value.to_str().map_err(|_| AppError::InvalidToken)?;
    let (_scheme, token) = value.split_once(' ').ok_or(AppError::InvalidToken)?;
    keys.verify(token.trim())
}

/// The authenticated caller. Taking this extractor in a handler gates the
/// route: on rejection axum answers with the error and never runs the handler.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: Claims,
}

impl AuthUser {
    pub fn email(&self) -> Option<&str> {
        str_field(&self.claims.user, fields::EMAIL)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = TokenKeys::from_ref(state);
        let claims = authorize(&parts.headers, &keys).inspect_err(|err| {
            tracing::debug!(uri = %parts.uri, reason = %err, "request rejected by auth gate");
        })?;
        Ok(AuthUser { claims })
    }
}
