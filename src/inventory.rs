//! Read-only listing of the zones hosted on the server.
use std::sync::Arc;

use tracing::info;

use crate::classify::classify;
use crate::error::{Action, Diagnostics};
use crate::gateway::ApiGateway;
use crate::identity;
use crate::model::{ObservedZone, ZoneKind, ZoneStatus};
use crate::technitium::types::RawZone;

pub struct InventoryReader<G: ApiGateway + ?Sized> {
    gateway: Arc<G>,
}

impl<G: ApiGateway + ?Sized> InventoryReader<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Query the server for every zone. Each call issues a fresh request.
    pub async fn list(&self) -> Result<Vec<ObservedZone>, Diagnostics> {
        let res = classify(Action::ListZones, self.gateway.list_zones().await)?;
        let zones: Vec<ObservedZone> = res
            .response
            .map(|list| list.zones)
            .unwrap_or_default()
            .into_iter()
            .map(observe)
            .collect();
        info!(count = zones.len(), "listed dns zones");
        Ok(zones)
    }
}

/// Internal zones report as `Internal` whatever their underlying type.
pub fn observe(raw: RawZone) -> ObservedZone {
    let kind = if raw.internal {
        ZoneKind::Internal
    } else {
        ZoneKind::from(raw.zone_type)
    };
    let status = if raw.disabled {
        ZoneStatus::Disabled
    } else {
        ZoneStatus::Enabled
    };

    ObservedZone {
        identity: identity::derive(&raw.name),
        name: raw.name,
        kind,
        status: Some(status),
        dnssec_status: Some(raw.dnssec_status),
        serial: Some(raw.soa_serial),
        expiry: raw.expiry.filter(|e| !e.is_empty()),
        last_modified: raw.last_modified.unwrap_or_default(),
    }
}
