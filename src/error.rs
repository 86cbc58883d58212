// src/error.rs
use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Remote actions issued against the Technitium API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateZone,
    DeleteZone,
    ListZones,
    CreateRecord,
    UpdateRecord,
    DeleteRecord,
}

impl Action {
    fn verb(self) -> (&'static str, &'static str) {
        match self {
            Action::CreateZone | Action::CreateRecord => ("creating", "create"),
            Action::DeleteZone | Action::DeleteRecord => ("deleting", "delete"),
            Action::UpdateRecord => ("updating", "update"),
            Action::ListZones => ("listing", "list"),
        }
    }

    fn object(self) -> &'static str {
        match self {
            Action::CreateZone | Action::DeleteZone => "dns zone",
            Action::ListZones => "dns zones",
            Action::CreateRecord | Action::UpdateRecord | Action::DeleteRecord => "dns record",
        }
    }

    /// Short summary naming the failed action, e.g. "Error creating dns zone".
    pub fn failure_summary(self) -> String {
        format!("Error {} {}", self.verb().0, self.object())
    }

    /// Detail line wrapping the underlying reason.
    pub fn failure_detail(self, reason: impl fmt::Display) -> String {
        format!(
            "Could not {} {}, unexpected error: {}",
            self.verb().1,
            self.object(),
            reason
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::CreateZone => "createZone",
            Action::DeleteZone => "deleteZone",
            Action::ListZones => "listZones",
            Action::CreateRecord => "createRecord",
            Action::UpdateRecord => "updateRecord",
            Action::DeleteRecord => "deleteRecord",
        };
        f.write_str(name)
    }
}

/// Transport-level failures. A well-formed `status: "error"` body is never
/// represented here; see [`crate::classify`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The URL is stripped before wrapping since it carries the token.
    #[error("{}", source_chain(.0))]
    Transport(#[source] reqwest::Error),

    #[error("malformed {action} response: {source}")]
    Decode {
        action: Action,
        #[source]
        source: serde_json::Error,
    },

    #[error("{action} failed with HTTP {status}")]
    Status {
        action: Action,
        status: reqwest::StatusCode,
    },

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.without_url())
    }
}

/// `outer: inner: innermost`, so timeouts and refused connections show up
/// in diagnostics instead of a bare "error sending request".
fn source_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(inner) = cur {
        out.push_str(": ");
        out.push_str(&inner.to_string());
        cur = inner.source();
    }
    out
}

/// A single actionable failure description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.summary, self.detail)
    }
}

/// Ordered, additive collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Diagnostic::new(summary, detail));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_error(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// `Err(self)` when anything was recorded, otherwise `Ok(())`.
    pub fn into_result(self) -> Result<(), Diagnostics> {
        if self.has_error() { Err(self) } else { Ok(()) }
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}
