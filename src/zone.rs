//! Create/delete reconciliation of DNS zones.
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::classify::classify;
use crate::error::{Action, Diagnostics};
use crate::gateway::ApiGateway;
use crate::identity;
use crate::model::{DesiredZone, ObservedZone, revision_stamp};
use crate::resource::Resource;
use crate::technitium::types::{CreateZoneParams, DeleteZoneParams};
use crate::validation::validate_zone;

/// Zones cannot be renamed or retyped on the server, so this reconciler
/// deliberately does not implement [`crate::resource::Updatable`].
pub struct ZoneReconciler<G: ApiGateway + ?Sized> {
    gateway: Arc<G>,
}

impl<G: ApiGateway + ?Sized> ZoneReconciler<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G: ApiGateway + ?Sized> Resource for ZoneReconciler<G> {
    type Desired = DesiredZone;
    type Observed = ObservedZone;

    fn identity(desired: &DesiredZone) -> String {
        identity::derive(&desired.name)
    }

    async fn create(&self, desired: &DesiredZone) -> Result<ObservedZone, Diagnostics> {
        validate_zone(desired)?;

        let params = CreateZoneParams {
            zone: desired.name.clone(),
            zone_type: desired.kind.to_string(),
        };
        info!(zone = %desired.name, kind = %desired.kind, "creating dns zone");
        classify(Action::CreateZone, self.gateway.create_zone(&params).await)?;

        let observed = ObservedZone {
            identity: Self::identity(desired),
            name: desired.name.clone(),
            kind: desired.kind.clone(),
            status: None,
            dnssec_status: None,
            serial: None,
            expiry: None,
            last_modified: revision_stamp(),
        };
        info!(zone = %observed.name, identity = %observed.identity, "dns zone created");
        Ok(observed)
    }

    async fn delete(&self, observed: &ObservedZone) -> Result<(), Diagnostics> {
        let params = DeleteZoneParams {
            zone: observed.name.clone(),
        };
        info!(zone = %observed.name, "deleting dns zone");
        classify(Action::DeleteZone, self.gateway.delete_zone(&params).await)?;
        Ok(())
    }
}
