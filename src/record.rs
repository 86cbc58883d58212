//! Create/update/delete reconciliation of DNS records.
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::classify::classify;
use crate::error::{Action, Diagnostics};
use crate::gateway::ApiGateway;
use crate::identity;
use crate::model::{DesiredRecord, ObservedRecord, revision_stamp};
use crate::resource::{Resource, Updatable};
use crate::technitium::types::{CreateRecordParams, DeleteRecordParams, UpdateRecordParams};
use crate::validation::validate_record;

pub struct RecordReconciler<G: ApiGateway + ?Sized> {
    gateway: Arc<G>,
}

impl<G: ApiGateway + ?Sized> RecordReconciler<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    fn observe(desired: &DesiredRecord) -> ObservedRecord {
        ObservedRecord {
            identity: Self::identity(desired),
            record: desired.clone(),
            last_updated: revision_stamp(),
        }
    }
}

#[async_trait]
impl<G: ApiGateway + ?Sized> Resource for RecordReconciler<G> {
    type Desired = DesiredRecord;
    type Observed = ObservedRecord;

    /// Digest of `domain.zone`.
    fn identity(desired: &DesiredRecord) -> String {
        identity::derive(&desired.fqdn())
    }

    async fn create(&self, desired: &DesiredRecord) -> Result<ObservedRecord, Diagnostics> {
        validate_record(desired)?;

        let params = CreateRecordParams {
            zone: desired.zone.clone(),
            domain: desired.domain.clone(),
            record_type: desired.record_type.clone(),
            ip_address: desired.ip_address.clone(),
            ttl: desired.ttl,
            ptr: desired.ptr,
            create_ptr_zone: desired.create_ptr_zone,
        };
        info!(fqdn = %desired.fqdn(), rtype = %desired.record_type, "creating dns record");
        classify(Action::CreateRecord, self.gateway.create_record(&params).await)?;

        let observed = Self::observe(desired);
        info!(fqdn = %desired.fqdn(), identity = %observed.identity, "dns record created");
        Ok(observed)
    }

    /// Deletion is keyed by domain, type and address only; the owning zone
    /// is not part of the remote call.
    async fn delete(&self, observed: &ObservedRecord) -> Result<(), Diagnostics> {
        let record = &observed.record;
        let params = DeleteRecordParams {
            domain: record.domain.clone(),
            record_type: record.record_type.clone(),
            ip_address: record.ip_address.clone(),
        };
        info!(domain = %record.domain, rtype = %record.record_type, ip = %record.ip_address, "deleting dns record");
        classify(Action::DeleteRecord, self.gateway.delete_record(&params).await)?;
        Ok(())
    }
}

#[async_trait]
impl<G: ApiGateway + ?Sized> Updatable for RecordReconciler<G> {
    /// The prior zone, type, domain and address locate the record on the
    /// server; only the domain, address and TTL come from `desired`.
    ///
    /// The returned identity is computed from the new FQDN, so renaming the
    /// domain changes it and the host has to re-key its tracking.
    async fn update(
        &self,
        desired: &DesiredRecord,
        prior: &ObservedRecord,
    ) -> Result<ObservedRecord, Diagnostics> {
        let mut diags = Diagnostics::new();
        if let Err(e) = validate_record(desired) {
            diags.extend(e);
        }
        if let Err(e) = validate_record(&prior.record) {
            diags.extend(e);
        }
        diags.into_result()?;

        let old = &prior.record;
        if old.zone != desired.zone || old.record_type != desired.record_type {
            warn!(
                fqdn = %old.fqdn(),
                "zone or type change is not sent by updateRecord; server keeps the prior values"
            );
        }

        let params = UpdateRecordParams {
            zone: old.zone.clone(),
            domain: old.domain.clone(),
            record_type: old.record_type.clone(),
            ip_address: old.ip_address.clone(),
            new_domain: desired.domain.clone(),
            new_ip_address: desired.ip_address.clone(),
            ttl: desired.ttl,
        };
        info!(from = %old.fqdn(), to = %desired.fqdn(), "updating dns record");
        classify(Action::UpdateRecord, self.gateway.update_record(&params).await)?;

        let observed = Self::observe(desired);
        info!(fqdn = %desired.fqdn(), identity = %observed.identity, "dns record updated");
        Ok(observed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{Call, FakeGateway, Reply};

    fn www() -> DesiredRecord {
        DesiredRecord {
            zone: "example.com".into(),
            domain: "www".into(),
            record_type: "A".into(),
            ip_address: "10.0.0.1".into(),
            ttl: None,
            ptr: None,
            create_ptr_zone: None,
        }
    }

    fn reconciler(replies: Vec<Reply>) -> (Arc<FakeGateway>, RecordReconciler<FakeGateway>) {
        let gateway = Arc::new(FakeGateway::with_replies(replies));
        (Arc::clone(&gateway), RecordReconciler::new(gateway))
    }

    #[tokio::test]
    async fn create_derives_identity_from_fqdn() {
        let (_, records) = reconciler(vec![]);
        let observed = records.create(&www()).await.unwrap();

        assert_eq!(observed.identity, identity::derive("www.example.com"));
        assert_eq!(observed.record, www());
        assert!(!observed.last_updated.is_empty());
    }

    #[tokio::test]
    async fn create_forwards_only_the_options_that_were_set() {
        let (gateway, records) = reconciler(vec![]);
        records.create(&www()).await.unwrap();

        let mut with_ptr = www();
        with_ptr.ttl = Some(600);
        with_ptr.ptr = Some(true);
        with_ptr.create_ptr_zone = Some(false);
        records.create(&with_ptr).await.unwrap();

        let calls = gateway.calls();
        let Call::CreateRecord(bare) = &calls[0] else {
            panic!("unexpected call {:?}", calls[0]);
        };
        assert_eq!((bare.ttl, bare.ptr, bare.create_ptr_zone), (None, None, None));

        let Call::CreateRecord(full) = &calls[1] else {
            panic!("unexpected call {:?}", calls[1]);
        };
        assert_eq!(
            (full.ttl, full.ptr, full.create_ptr_zone),
            (Some(600), Some(true), Some(false))
        );
    }

    #[tokio::test]
    async fn create_failure_returns_server_message() {
        let (_, records) = reconciler(vec![Reply::ApiError("zone not found")]);
        let diags = records.create(&www()).await.unwrap_err();

        assert_eq!(diags.len(), 1);
        assert!(diags.to_string().contains("zone not found"));
    }

    #[tokio::test]
    async fn update_keys_by_prior_and_rekeys_identity() {
        let (gateway, records) = reconciler(vec![]);
        let prior = records.create(&www()).await.unwrap();

        let mut desired = www();
        desired.domain = "app".into();
        desired.ip_address = "10.0.0.2".into();
        let updated = records.update(&desired, &prior).await.unwrap();

        assert_eq!(updated.identity, identity::derive("app.example.com"));
        assert_ne!(updated.identity, prior.identity);
        assert_eq!(
            gateway.calls()[1],
            Call::UpdateRecord(UpdateRecordParams {
                zone: "example.com".into(),
                domain: "www".into(),
                record_type: "A".into(),
                ip_address: "10.0.0.1".into(),
                new_domain: "app".into(),
                new_ip_address: "10.0.0.2".into(),
                ttl: None,
            })
        );
    }

    #[tokio::test]
    async fn update_failure_keeps_no_state() {
        let (_, records) = reconciler(vec![Reply::Ok, Reply::ApiError("record not found")]);
        let prior = records.create(&www()).await.unwrap();

        let mut desired = www();
        desired.ttl = Some(60);
        let diags = records.update(&desired, &prior).await.unwrap_err();
        assert_eq!(
            diags.iter().next().unwrap().summary,
            "Error updating dns record"
        );
    }

    #[tokio::test]
    async fn update_sends_desired_ttl_keyed_by_prior() {
        let (gateway, records) = reconciler(vec![Reply::Ok, Reply::Ok]);
        let prior = records.create(&www()).await.unwrap();

        let mut desired = www();
        desired.ip_address = "10.0.0.9".into();
        desired.ttl = Some(60);
        let updated = records.update(&desired, &prior).await.unwrap();
        assert_eq!(updated.record.ttl, Some(60));

        let calls = gateway.calls();
        let Call::UpdateRecord(params) = &calls[1] else {
            panic!("expected updateRecord, got {:?}", calls[1]);
        };
        assert_eq!(params.ttl, Some(60));
        assert_eq!(params.ip_address, "10.0.0.1");
        assert_eq!(params.new_ip_address, "10.0.0.9");
    }

    #[tokio::test]
    async fn delete_omits_zone() {
        let (gateway, records) = reconciler(vec![]);
        let observed = records.create(&www()).await.unwrap();
        records.delete(&observed).await.unwrap();

        assert_eq!(
            gateway.calls()[1],
            Call::DeleteRecord(DeleteRecordParams {
                domain: "www".into(),
                record_type: "A".into(),
                ip_address: "10.0.0.1".into(),
            })
        );
    }
}
