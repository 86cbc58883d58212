//! Session-wide connection settings for the Technitium API.
use std::fmt;
use std::time::Duration;

use crate::error::Diagnostics;

pub const HOST_ENV: &str = "TECHNITIUM_HOST";
pub const TOKEN_ENV: &str = "TECHNITIUM_TOKEN";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoint and credential shared by every operation of a session.
///
/// Built once before any remote call and never mutated afterwards.
#[derive(Clone)]
pub struct SessionConfig {
    host: String,
    token: String,
    pub timeout: Duration,
}

impl SessionConfig {
    /// Validate explicit values. Both problems are reported together.
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Result<Self, Diagnostics> {
        let host = host.into();
        let token = token.into();
        let mut diags = Diagnostics::new();

        if host.trim().is_empty() {
            diags.add_error(
                "Missing Technitium API Host",
                format!(
                    "The client cannot be created as there is a missing or empty value for the \
                     Technitium API host. Set the host value in the configuration or use the \
                     {HOST_ENV} environment variable. If either is already set, ensure the value \
                     is not empty."
                ),
            );
        }
        if token.trim().is_empty() {
            diags.add_error(
                "Missing Technitium API Token",
                format!(
                    "The client cannot be created as there is a missing or empty value for the \
                     Technitium API token. Set the token value in the configuration or use the \
                     {TOKEN_ENV} environment variable. If either is already set, ensure the value \
                     is not empty."
                ),
            );
        }
        diags.into_result()?;

        Ok(Self {
            host: normalize_host(&host),
            token,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Explicit values win; the environment fills whatever is left unset.
    pub fn resolve(host: Option<String>, token: Option<String>) -> Result<Self, Diagnostics> {
        Self::resolve_with(host, token, |key| std::env::var(key).ok())
    }

    pub(crate) fn resolve_with(
        host: Option<String>,
        token: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Diagnostics> {
        let host = host.or_else(|| env(HOST_ENV)).unwrap_or_default();
        let token = token.or_else(|| env(TOKEN_ENV)).unwrap_or_default();
        Self::new(host, token)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without trailing slash, e.g. `http://dns.lan:5380`.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn normalize_host(host: &str) -> String {
    let trimmed = host.trim().trim_end_matches('/');
    let has_scheme = ["http://", "https://"].iter().any(|scheme| {
        trimmed
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    if has_scheme {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
