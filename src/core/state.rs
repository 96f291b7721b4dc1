// Application state (PortalState)

use crate::core::config::Config;
use crate::portal::PortalStore;
use crate::stores::{blob::BlobStore, file::FileStore, memory::MemoryStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Shared application state
///
/// Holds the portal facade over the configured backend and the
/// configuration it was built from. Cheap to clone.
#[derive(Clone)]
pub struct PortalState {
    pub portal: Arc<PortalStore>,

    pub config: Arc<Config>,
}

impl PortalState {
    pub fn new(config: Config) -> Result<Self> {
        let blobs = open_backend(&config)?;
        let portal = PortalStore::with_policy(blobs, &config.portal);

        Ok(Self {
            portal: Arc::new(portal),
            config: Arc::new(config),
        })
    }
}

fn open_backend(config: &Config) -> Result<Arc<dyn BlobStore>> {
    match config.storage.backend.as_str() {
        "file" => {
            let store = FileStore::new(config.storage.data_dir.clone())
                .context("Failed to open file storage backend")?;
            info!(data_dir = %store.dir().display(), "File storage backend opened");
            Ok(Arc::new(store))
        }
        _ => {
            info!("In-memory storage backend opened, data will not persist");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
