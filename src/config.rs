use std::env;

use anyhow::{Context, bail};

use crate::gateway::stripe::DEFAULT_API_BASE;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub token_secret: String,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = resolve_database_url(&lookup)?;
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);
        let token_secret = lookup("ACCESS_TOKEN_SECRET").context("ACCESS_TOKEN_SECRET is not set")?;
        let stripe_secret_key = lookup("STRIPE_SECRET_KEY").context("STRIPE_SECRET_KEY is not set")?;
        let stripe_api_base =
            lookup("STRIPE_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            database_url,
            host,
            port,
            token_secret,
            stripe_secret_key,
            stripe_api_base,
        })
    }
}

/// Store location alone, for tools that never serve requests.
pub fn database_url_from_env() -> anyhow::Result<String> {
    resolve_database_url(&|key: &str| env::var(key).ok())
}

fn resolve_database_url<F>(lookup: &F) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL") {
        return Ok(url);
    }
    let (Some(user), Some(password)) = (lookup("DB_USER"), lookup("DB_PASSWORD")) else {
        bail!("set DATABASE_URL, or DB_USER and DB_PASSWORD");
    };
    let host = lookup("DB_HOST").unwrap_or_else(|| "localhost:5432".to_string());
    let name = lookup("DB_NAME").unwrap_or_else(|| "laptop_city".to_string());
    Ok(format!("postgres://{user}:{password}@{host}/{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_vars_missing() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/test"),
            ("ACCESS_TOKEN_SECRET", "secret"),
            ("STRIPE_SECRET_KEY", "sk_test_1"),
        ]))
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.stripe_api_base, "https://api.stripe.com");
    }

    #[test]
    fn database_url_is_composed_from_credentials() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DB_USER", "laptop"),
            ("DB_PASSWORD", "pw"),
            ("PORT", "8080"),
            ("ACCESS_TOKEN_SECRET", "secret"),
            ("STRIPE_SECRET_KEY", "sk_test_1"),
        ]))
        .unwrap();
        assert_eq!(
            config.database_url,
            "postgres://laptop:pw@localhost:5432/laptop_city"
        );
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn missing_secrets_fail_loudly() {
        let err = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://x/y")]))
            .unwrap_err();
        assert!(err.to_string().contains("ACCESS_TOKEN_SECRET"));

        let err = AppConfig::from_lookup(lookup(&[
            ("ACCESS_TOKEN_SECRET", "secret"),
            ("STRIPE_SECRET_KEY", "sk_test_1"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }
}
