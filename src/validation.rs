use crate::error::Diagnostics;
use crate::model::{DesiredRecord, DesiredZone};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is empty")]
    Empty(&'static str),
}

/// Every attribute the remote protocol requires must be non-blank. Syntax
/// beyond that is the server's to judge.
pub fn validate_required(attribute: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(attribute));
    }
    Ok(())
}

fn check(diags: &mut Diagnostics, summary: &str, attribute: &'static str, value: &str) {
    if let Err(e) = validate_required(attribute, value) {
        diags.add_error(summary, format!("Attribute '{attribute}': {e}"));
    }
}

pub fn validate_zone(zone: &DesiredZone) -> Result<(), Diagnostics> {
    let mut diags = Diagnostics::new();
    check(&mut diags, "Invalid dns zone", "name", &zone.name);
    check(&mut diags, "Invalid dns zone", "type", zone.kind.as_str());
    diags.into_result()
}

/// Collects one diagnostic per bad attribute; record-type specific
/// combinations are left to the server.
pub fn validate_record(record: &DesiredRecord) -> Result<(), Diagnostics> {
    let mut diags = Diagnostics::new();
    check(&mut diags, "Invalid dns record", "zone", &record.zone);
    check(&mut diags, "Invalid dns record", "domain", &record.domain);
    check(&mut diags, "Invalid dns record", "type", &record.record_type);
    check(&mut diags, "Invalid dns record", "ip_address", &record.ip_address);
    diags.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ZoneKind;

    #[test]
    fn only_blank_values_are_rejected() {
        assert_eq!(
            validate_required("zone", "  "),
            Err(ValidationError::Empty("zone"))
        );
        assert!(validate_required("domain", "w w").is_ok());
        assert!(validate_required("domain", "_dmarc").is_ok());
        assert!(validate_required("domain", "*").is_ok());
    }

    #[test]
    fn zone_without_name_fails() {
        let err = validate_zone(&DesiredZone {
            name: String::new(),
            kind: ZoneKind::Primary,
        })
        .unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn record_errors_accumulate() {
        let record = DesiredRecord {
            zone: String::new(),
            domain: "www".into(),
            record_type: String::new(),
            ip_address: String::new(),
            ttl: None,
            ptr: None,
            create_ptr_zone: None,
        };
        let err = validate_record(&record).unwrap_err();
        let details: Vec<_> = err.iter().map(|d| d.detail.as_str()).collect();
        assert_eq!(
            details,
            [
                "Attribute 'zone': zone is empty",
                "Attribute 'type': type is empty",
                "Attribute 'ip_address': ip_address is empty",
            ]
        );
    }
}
