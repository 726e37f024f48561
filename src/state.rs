use axum::extract::FromRef;

use crate::{gateway::GatewayState, middleware::auth::TokenKeys, store::StoreState};

/// Explicit per-request context. Built once at startup; cloning shares the
/// same store connection and gateway client.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreState,
    pub gateway: GatewayState,
    pub tokens: TokenKeys,
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> TokenKeys {
        state.tokens.clone()
    }
}
