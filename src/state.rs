use std::sync::Arc;

use crate::auth::TokenAuthority;
use crate::config::AppConfig;
use crate::database::CatalogStore;
use crate::middleware::GatePaths;

/// Shared, read-only state handed to every handler and to the gate
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenAuthority>,
    pub store: Arc<dyn CatalogStore>,
    pub gate: Arc<GatePaths>,
}

impl AppState {
    pub fn new(config: AppConfig, tokens: TokenAuthority, store: Arc<dyn CatalogStore>) -> Self {
        Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            store,
            gate: Arc::new(GatePaths::default()),
        }
    }
}
