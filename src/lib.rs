//! Crate entrypoint wiring together configuration, the Technitium client,
//! and the reconcilers a host runtime drives.

pub mod classify;
pub mod config;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod inventory;
pub mod model;
pub mod record;
pub mod resource;
pub mod technitium;
pub mod validation;
pub mod zone;

use config::SessionConfig;
use gateway::ApiGateway;
use inventory::InventoryReader;
use record::RecordReconciler;
use technitium::TechnitiumClient;
use zone::ZoneReconciler;

use std::sync::Arc;

pub use classify::with_deadline;
pub use error::{Diagnostic, Diagnostics};
pub use resource::{Resource, Updatable};

/// Everything one reconciliation session needs, sharing a single gateway.
pub struct Session<G: ApiGateway + ?Sized = TechnitiumClient> {
    pub zones: ZoneReconciler<G>,
    pub records: RecordReconciler<G>,
    pub inventory: InventoryReader<G>,
}

impl Session<TechnitiumClient> {
    /// Build the HTTP client once; it is never reconfigured afterwards.
    pub fn connect(config: &SessionConfig) -> Result<Self, Diagnostics> {
        let client = TechnitiumClient::new(config).map_err(|e| {
            Diagnostics::from(Diagnostic::new(
                "Unable to Create Technitium API Client",
                format!("An unexpected error occurred when creating the API client: {e}"),
            ))
        })?;
        Ok(Self::with_gateway(Arc::new(client)))
    }
}

impl<G: ApiGateway + ?Sized> Session<G> {
    pub fn with_gateway(gateway: Arc<G>) -> Self {
        Self {
            zones: ZoneReconciler::new(Arc::clone(&gateway)),
            records: RecordReconciler::new(Arc::clone(&gateway)),
            inventory: InventoryReader::new(gateway),
        }
    }
}
