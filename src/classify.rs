//! Turns gateway results into accepted responses or diagnostics.
use std::future::Future;
use std::time::Duration;

use tracing::{error, warn};

use crate::error::{Action, Diagnostic, Diagnostics, GatewayError};
use crate::technitium::types::ApiResponse;

/// Accept a response or explain why it failed.
///
/// A transport error is terminal and the response is never looked at.
/// Otherwise any status other than `"ok"` is reported with the server's
/// message verbatim. Nothing here retries.
pub fn classify<T>(
    action: Action,
    result: Result<ApiResponse<T>, GatewayError>,
) -> Result<ApiResponse<T>, Diagnostic> {
    match result {
        Err(err) => Err(transport_failure(action, &err)),
        Ok(res) if !res.is_ok() => {
            warn!(action = %action, status = %res.status, error = %res.error_message(), "API reported failure");
            Err(Diagnostic::new(
                action.failure_summary(),
                action.failure_detail(res.error_message()),
            ))
        }
        Ok(res) => Ok(res),
    }
}

pub(crate) fn transport_failure(action: Action, err: &GatewayError) -> Diagnostic {
    error!(action = %action, error = %err, "transport failure");
    Diagnostic::new(action.failure_summary(), action.failure_detail(err))
}

/// Bound a reconciler call with a caller-supplied deadline.
///
/// Expiry drops the in-flight request and is reported like any other
/// transport failure of `action`.
pub async fn with_deadline<T, F>(action: Action, limit: Duration, fut: F) -> Result<T, Diagnostics>
where
    F: Future<Output = Result<T, Diagnostics>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(transport_failure(action, &GatewayError::DeadlineExceeded(limit)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: &str, msg: Option<&str>) -> ApiResponse {
        ApiResponse {
            status: status.into(),
            error_message: msg.map(str::to_string),
            response: None,
        }
    }

    #[test]
    fn ok_status_is_accepted() {
        assert!(classify(Action::CreateZone, Ok(response("ok", None))).is_ok());
    }

    #[test]
    fn api_error_uses_server_message() {
        let diag = classify(
            Action::CreateRecord,
            Ok(response("error", Some("zone not found"))),
        )
        .unwrap_err();
        assert_eq!(diag.summary, "Error creating dns record");
        assert!(diag.detail.contains("zone not found"));
    }

    #[test]
    fn transport_error_wins_over_response() {
        let err = GatewayError::DeadlineExceeded(Duration::from_secs(5));
        let diag = classify::<serde::de::IgnoredAny>(Action::DeleteZone, Err(err)).unwrap_err();
        assert_eq!(diag.summary, "Error deleting dns zone");
        assert!(diag.detail.contains("deadline of 5s exceeded"));
    }

    #[tokio::test]
    async fn expired_deadline_becomes_transport_diagnostic() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, Diagnostics>(())
        };
        let diags = with_deadline(Action::ListZones, Duration::from_millis(10), slow)
            .await
            .unwrap_err();
        assert_eq!(diags.len(), 1);
        assert!(diags.iter().next().unwrap().detail.contains("deadline"));
    }
}
