//! Desired and observed state of the objects a host declares.
use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// `time.RFC850`-style layout, e.g. `Monday, 02-Jan-06 15:04:05 UTC`.
pub const REVISION_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S UTC";

/// Human-readable timestamp attached to every successful write.
pub fn revision_stamp() -> String {
    Utc::now().format(REVISION_FORMAT).to_string()
}

/// Zone type label as understood by Technitium.
///
/// `Internal` is never submitted; the inventory reports it for
/// server-managed zones regardless of their underlying type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ZoneKind {
    Primary,
    Secondary,
    Stub,
    Forwarder,
    SecondaryForwarder,
    Catalog,
    SecondaryCatalog,
    Internal,
    Other(String),
}

impl ZoneKind {
    pub fn as_str(&self) -> &str {
        match self {
            ZoneKind::Primary => "Primary",
            ZoneKind::Secondary => "Secondary",
            ZoneKind::Stub => "Stub",
            ZoneKind::Forwarder => "Forwarder",
            ZoneKind::SecondaryForwarder => "SecondaryForwarder",
            ZoneKind::Catalog => "Catalog",
            ZoneKind::SecondaryCatalog => "SecondaryCatalog",
            ZoneKind::Internal => "Internal",
            ZoneKind::Other(label) => label,
        }
    }
}

impl From<String> for ZoneKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Primary" => ZoneKind::Primary,
            "Secondary" => ZoneKind::Secondary,
            "Stub" => ZoneKind::Stub,
            "Forwarder" => ZoneKind::Forwarder,
            "SecondaryForwarder" => ZoneKind::SecondaryForwarder,
            "Catalog" => ZoneKind::Catalog,
            "SecondaryCatalog" => ZoneKind::SecondaryCatalog,
            "Internal" => ZoneKind::Internal,
            _ => ZoneKind::Other(label),
        }
    }
}

impl From<ZoneKind> for String {
    fn from(kind: ZoneKind) -> Self {
        match kind {
            ZoneKind::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ZoneKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ZoneKind::from(s.to_string()))
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneStatus {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredZone {
    pub name: String,
    pub kind: ZoneKind,
}

/// What is believed to hold on the server for a zone.
///
/// Status, DNSSEC, serial and expiry are only known for zones that came
/// from the inventory; a freshly created zone leaves them unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedZone {
    pub identity: String,
    pub name: String,
    pub kind: ZoneKind,
    pub status: Option<ZoneStatus>,
    pub dnssec_status: Option<String>,
    pub serial: Option<u32>,
    pub expiry: Option<String>,
    pub last_modified: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredRecord {
    pub zone: String,
    pub domain: String,
    pub record_type: String, // "A", "AAAA", ... passed through untouched
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ptr: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_ptr_zone: Option<bool>,
}

impl DesiredRecord {
    pub fn fqdn(&self) -> String {
        crate::identity::fqdn(&self.domain, &self.zone)
    }
}

/// A record after a successful write: the submitted fields plus the
/// identity and revision assigned locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedRecord {
    pub identity: String,
    #[serde(flatten)]
    pub record: DesiredRecord,
    pub last_updated: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_kind_round_trips_known_and_unknown_labels() {
        assert_eq!(ZoneKind::from("Forwarder".to_string()), ZoneKind::Forwarder);
        let custom = ZoneKind::from("Experimental".to_string());
        assert_eq!(custom, ZoneKind::Other("Experimental".into()));
        assert_eq!(custom.to_string(), "Experimental");
        assert_eq!(
            serde_json::to_string(&ZoneKind::Internal).unwrap(),
            "\"Internal\""
        );
    }

    #[test]
    fn revision_stamp_uses_rfc850_layout() {
        let stamp = revision_stamp();
        chrono::NaiveDateTime::parse_from_str(&stamp, REVISION_FORMAT).unwrap();
        assert!(stamp.ends_with(" UTC"));
    }

    #[test]
    fn observed_record_flattens_fields() {
        let observed = ObservedRecord {
            identity: "id".into(),
            record: DesiredRecord {
                zone: "example.com".into(),
                domain: "www".into(),
                record_type: "A".into(),
                ip_address: "10.0.0.1".into(),
                ttl: Some(300),
                ptr: None,
                create_ptr_zone: None,
            },
            last_updated: "now".into(),
        };
        let json = serde_json::to_value(&observed).unwrap();
        assert_eq!(json["domain"], "www");
        assert_eq!(json["ttl"], 300);
        assert!(json.get("ptr").is_none());
    }
}
