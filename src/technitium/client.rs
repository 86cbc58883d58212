use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::{Action, GatewayError};
use crate::gateway::ApiGateway;
use crate::technitium::types::*;

/// Appends the session token to every outgoing request.
///
/// Composed once from [`SessionConfig`]; there is no way to change the
/// token of an existing signer, so clones of a client can be used from
/// many tasks at once.
#[derive(Clone)]
struct RequestSigner {
    token: Arc<str>,
}

impl RequestSigner {
    fn sign(&self, req: RequestBuilder) -> RequestBuilder {
        req.query(&[("token", &*self.token)])
    }
}

#[derive(Clone)]
pub struct TechnitiumClient {
    http: Client,
    base_url: String, // e.g. "http://127.0.0.1:5380"
    signer: RequestSigner,
}

impl TechnitiumClient {
    pub fn new(config: &SessionConfig) -> Result<Self, GatewayError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.host().to_string(),
            signer: RequestSigner {
                token: Arc::from(config.token()),
            },
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn call<P, T>(
        &self,
        action: Action,
        path: &str,
        params: Option<&P>,
    ) -> Result<ApiResponse<T>, GatewayError>
    where
        P: Serialize + std::fmt::Debug + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(action = %action, url = %url, params = ?params, "Technitium API request");

        let mut req = self.http.get(url);
        if let Some(params) = params {
            req = req.query(params);
        }
        let res = self.signer.sign(req).send().await?;
        let status = res.status();
        let body = res.bytes().await?;

        match serde_json::from_slice::<ApiResponse<T>>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(GatewayError::Status { action, status }),
            Err(source) => Err(GatewayError::Decode { action, source }),
        }
    }
}

#[async_trait]
impl ApiGateway for TechnitiumClient {
    async fn create_zone(&self, params: &CreateZoneParams) -> Result<ApiResponse, GatewayError> {
        self.call(Action::CreateZone, "zones/create", Some(params)).await
    }

    async fn delete_zone(&self, params: &DeleteZoneParams) -> Result<ApiResponse, GatewayError> {
        self.call(Action::DeleteZone, "zones/delete", Some(params)).await
    }

    async fn list_zones(&self) -> Result<ApiResponse<ZoneList>, GatewayError> {
        self.call::<(), _>(Action::ListZones, "zones/list", None).await
    }

    async fn create_record(
        &self,
        params: &CreateRecordParams,
    ) -> Result<ApiResponse, GatewayError> {
        self.call(Action::CreateRecord, "zones/records/add", Some(params))
            .await
    }

    async fn update_record(
        &self,
        params: &UpdateRecordParams,
    ) -> Result<ApiResponse, GatewayError> {
        self.call(Action::UpdateRecord, "zones/records/update", Some(params))
            .await
    }

    async fn delete_record(
        &self,
        params: &DeleteRecordParams,
    ) -> Result<ApiResponse, GatewayError> {
        self.call(Action::DeleteRecord, "zones/records/delete", Some(params))
            .await
    }
}
