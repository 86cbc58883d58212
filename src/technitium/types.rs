use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope every Technitium endpoint answers with.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T = IgnoredAny> {
    pub status: String, // "ok", "error", "invalid-token"
    #[serde(default)]
    pub error_message: Option<String>,
    pub response: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// Message reported by the server, falling back to the raw status.
    pub fn error_message(&self) -> &str {
        self.error_message.as_deref().unwrap_or(&self.status)
    }
}

/// Missing and `null` both decode to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
pub struct ZoneList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub zones: Vec<RawZone>,
}

/// One entry of `/api/zones/list` as reported by the server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawZone {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub zone_type: String, // "Primary", "Secondary", ...
    #[serde(deserialize_with = "null_as_default")]
    pub internal: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub dnssec_status: String, // "Unsigned", "SignedWithNSEC", ...
    #[serde(deserialize_with = "null_as_default")]
    pub soa_serial: u32,
    pub expiry: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub disabled: bool,
    pub last_modified: Option<String>,
}

// Query parameters. Optional fields are skipped entirely when unset so the
// server applies its own defaults.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateZoneParams {
    pub zone: String,
    #[serde(rename = "type")]
    pub zone_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteZoneParams {
    pub zone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordParams {
    pub zone: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ptr: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_ptr_zone: Option<bool>,
}

/// `zone`/`domain`/`type`/`ipAddress` address the existing record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordParams {
    pub zone: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ip_address: String,
    pub new_domain: String,
    pub new_ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordParams {
    pub domain: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ip_address: String,
}
