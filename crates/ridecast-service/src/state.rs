//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use ridecast_core::WeatherProvider;
use ridecast_store::Store;

use crate::config::Config;
use crate::crud::CrudService;
use crate::upsert::SearchUpsertService;

/// Shared application state.
pub struct AppState {
    /// The data store (wrapped in Mutex for thread-safe access).
    pub store: Arc<Mutex<Store>>,
    /// Configuration the server was started with.
    pub config: Config,
    /// Weather searches.
    pub searches: SearchUpsertService,
    /// Manual record management.
    pub crud: CrudService,
}

impl AppState {
    /// Create new application state.
    ///
    /// Provider calls made by searches are bounded by
    /// `config.weather.timeout_secs`.
    pub fn new(store: Store, config: Config, provider: Arc<dyn WeatherProvider>) -> Arc<Self> {
        let store = Arc::new(Mutex::new(store));
        let searches = SearchUpsertService::new(
            provider,
            Arc::clone(&store),
            config.weather.lookup_timeout(),
        );
        let crud = CrudService::new(Arc::clone(&store));

        Arc::new(Self {
            store,
            config,
            searches,
            crud,
        })
    }
}
