//! Uniform reconciliation surface for a host runtime.
//!
//! Every managed object kind implements [`Resource`]. Kinds the server can
//! modify in place additionally implement [`Updatable`]; for the others a
//! change of desired state can only be applied by deleting and recreating
//! the object, which is the host's decision to make.
use async_trait::async_trait;

use crate::error::Diagnostics;

#[async_trait]
pub trait Resource: Send + Sync {
    type Desired: Send + Sync;
    type Observed: Send + Sync;

    /// Stable identity of a declared object, derived from its natural key.
    fn identity(desired: &Self::Desired) -> String;

    async fn create(&self, desired: &Self::Desired) -> Result<Self::Observed, Diagnostics>;

    async fn delete(&self, observed: &Self::Observed) -> Result<(), Diagnostics>;
}

#[async_trait]
pub trait Updatable: Resource {
    /// Apply `desired` to the object last seen as `prior`.
    async fn update(
        &self,
        desired: &Self::Desired,
        prior: &Self::Observed,
    ) -> Result<Self::Observed, Diagnostics>;
}
