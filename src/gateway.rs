//! Boundary between the reconcilers and the remote DNS server.
use async_trait::async_trait;

use crate::error::GatewayError;
use crate::technitium::types::{
    ApiResponse, CreateRecordParams, CreateZoneParams, DeleteRecordParams, DeleteZoneParams,
    UpdateRecordParams, ZoneList,
};

/// One method per remote action.
///
/// `Ok` carries whatever well-formed envelope the server returned, including
/// `status: "error"` answers; `Err` is reserved for transport failures.
/// Authentication is applied by the implementation and is not part of any
/// call's input.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    async fn create_zone(&self, params: &CreateZoneParams) -> Result<ApiResponse, GatewayError>;

    async fn delete_zone(&self, params: &DeleteZoneParams) -> Result<ApiResponse, GatewayError>;

    async fn list_zones(&self) -> Result<ApiResponse<ZoneList>, GatewayError>;

    async fn create_record(&self, params: &CreateRecordParams)
    -> Result<ApiResponse, GatewayError>;

    async fn update_record(&self, params: &UpdateRecordParams)
    -> Result<ApiResponse, GatewayError>;

    async fn delete_record(&self, params: &DeleteRecordParams)
    -> Result<ApiResponse, GatewayError>;
}
