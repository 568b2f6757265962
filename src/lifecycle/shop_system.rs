use crate::api::Storefront;
use crate::config::ShopConfig;
use crate::store::{StoreActor, StoreError};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{error, info};

/// The running storefront: the store actor plus the facade wired to it.
///
/// `ShopSystem` is responsible for:
/// - **Lifecycle Management**: spawning the store actor and stopping it
/// - **Dependency Wiring**: handing every component a client of the store
/// - **Seeding**: installing the sample catalog and users on first start
pub struct ShopSystem {
    /// Operation surface for callers.
    pub storefront: Storefront,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    /// Spawns the store actor, wires the components and seeds the store.
    pub async fn start(config: ShopConfig) -> Result<Self, StoreError> {
        let (store_actor, store_client) = StoreActor::new(config.store_buffer);
        let store_handle = tokio::spawn(store_actor.run());

        let storefront = Storefront::new(Arc::new(store_client), &config);
        storefront.initialize().await?;

        info!(
            ttl_minutes = config.session_ttl.num_minutes(),
            latency = config.simulated_latency,
            "Shop system started"
        );
        Ok(Self {
            storefront,
            handles: vec![store_handle],
        })
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the storefront drops the last store client, which closes the
    /// actor's channel. Clones of the storefront handed out earlier must be
    /// dropped first or this waits for them.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down system...");
        drop(self.storefront);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e);
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
