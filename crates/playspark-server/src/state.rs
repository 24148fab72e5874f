use std::sync::Arc;

use tokio::sync::RwLock;

use playspark_host::GameRegistry;

use crate::config::ServerConfig;
use crate::storage::{GameStore, MemoryStore};

pub type SharedGameStore = Arc<RwLock<dyn GameStore>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedGameStore,
    pub game_registry: Arc<GameRegistry>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by the bounded in-memory store.
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(RwLock::new(MemoryStore::new(config.limits.max_stored_games)));
        Self::with_store(config, store)
    }

    /// State backed by any store implementation.
    pub fn with_store(config: ServerConfig, store: SharedGameStore) -> Self {
        Self {
            store,
            game_registry: Arc::new(GameRegistry::new()),
            config: Arc::new(config),
        }
    }
}
