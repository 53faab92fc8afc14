use crate::clients::{LocationClient, PropertyClient, ReviewClient};
use crate::config::CoreConfig;
use crate::gatekeeper::Gatekeeper;
use crate::geo::GeoIndex;
use crate::policy::{ClientLookup, IdentityContext};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Starts and wires the location, property and review actors.
///
/// The review actor runs with a clone of the property client as its context,
/// so the dependency graph is review → property, and location stands alone.
///
/// # Example
///
/// ```ignore
/// let system = ListingSystem::new();
/// let gate = system.gatekeeper(RequestIdentity::authenticated(Principal::user(7)));
/// let id = gate.create_property(params).await?;
///
/// // drop every gatekeeper before shutting down
/// drop(gate);
/// system.shutdown().await?;
/// ```
pub struct ListingSystem {
    pub location_client: LocationClient,
    pub property_client: PropertyClient,
    pub review_client: ReviewClient,
    config: CoreConfig,
    handles: Vec<JoinHandle<()>>,
}

impl Default for ListingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingSystem {
    /// Starts the system with default settings. Must run inside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(CoreConfig::default())
    }

    /// Starts the system with `config`, after [`CoreConfig::validated`].
    pub fn with_config(config: CoreConfig) -> Self {
        let config = config.validated();
        let capacity = config.channel_capacity;

        // 1. Create actors (no dependencies)
        let (location_actor, location_client) =
            crate::location_actor::new(capacity, GeoIndex::new(config.earth_radius_km));
        let (property_actor, property_client) = crate::property_actor::new(capacity);
        let (review_actor, review_client) = crate::review_actor::new(capacity);

        // 2. Start actors with injected context
        let location_handle = tokio::spawn(location_actor.run());
        let property_handle = tokio::spawn(property_actor.run(()));
        let review_handle = tokio::spawn(review_actor.run(property_client.clone()));

        info!(?config, "Listing system started");
        Self {
            location_client,
            property_client,
            review_client,
            config,
            handles: vec![review_handle, property_handle, location_handle],
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Owner lookup over the running property and review actors.
    pub fn lookup(&self) -> ClientLookup {
        ClientLookup::new(self.property_client.clone(), self.review_client.clone())
    }

    /// A gatekeeper acting for `identity`.
    ///
    /// It holds client clones, so it must be dropped before [`shutdown`](Self::shutdown)
    /// can complete.
    pub fn gatekeeper<I: IdentityContext>(&self, identity: I) -> Gatekeeper<I, ClientLookup> {
        Gatekeeper::new(
            identity,
            self.lookup(),
            self.property_client.clone(),
            self.review_client.clone(),
        )
    }

    /// Drops the clients and waits for every actor to drain and stop.
    ///
    /// The review actor stops first; it then releases its property client,
    /// which lets the property actor stop.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down listing system...");
        drop(self.location_client);
        drop(self.review_client);
        drop(self.property_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e);
            }
        }

        info!("Listing system shutdown complete.");
        Ok(())
    }
}
