use std::sync::Arc;

use cinerate_core::ports::{MovieResolver, MovieStore, UserStore};
use cinerate_core::resolver::CatalogResolver;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Store adapters are injected here once at startup; handlers never reach
/// for a global. Cloning is cheap (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Credential store.
    pub users: Arc<dyn UserStore>,
    /// Movie catalog store.
    pub movies: Arc<dyn MovieStore>,
    /// Free-text movie name resolver.
    pub resolver: Arc<dyn MovieResolver>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state with a [`CatalogResolver`] over the given movie store.
    pub fn new(
        users: Arc<dyn UserStore>,
        movies: Arc<dyn MovieStore>,
        config: ServerConfig,
    ) -> Self {
        let resolver = Arc::new(CatalogResolver::new(Arc::clone(&movies)));
        Self {
            users,
            movies,
            resolver,
            config: Arc::new(config),
        }
    }
}
