//! Shared HTTP plumbing for provider adapters
//!
//! Status mapping:
//! - 401 / 403 → `Auth`
//! - 429 → `RateLimited` (with `retry-after` seconds when present)
//! - timeout, connect failure, 5xx → `Transport`
//! - any other non-2xx or undecodable body → `Unknown`

use audit_application::ports::model_client::ProviderError;
use audit_application::ports::model_client_factory::ClientError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build a client with a bounded per-request timeout.
pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ClientError::HttpClient(e.to_string()))
}

/// `{"error": {"message": ...}}`, shared by OpenAI-compatible APIs and Anthropic.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Send a request and decode a successful JSON body as `T`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request.send().await.map_err(request_error)?;
    let status = response.status();

    if !status.is_success() {
        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status.as_u16(), &body, retry_after_secs));
    }

    response.json::<T>().await.map_err(|e| {
        if e.is_timeout() {
            ProviderError::Transport(format!("timed out reading response: {}", e))
        } else {
            ProviderError::Unknown(format!("undecodable response body: {}", e))
        }
    })
}

fn request_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Transport(format!("request timed out: {}", e))
    } else if e.is_connect() || e.is_request() {
        ProviderError::Transport(e.to_string())
    } else {
        ProviderError::Unknown(e.to_string())
    }
}

/// Map a non-2xx status to a [`ProviderError`], preferring the provider's
/// own error message over the raw body.
pub(crate) fn status_error(
    status: u16,
    body: &str,
    retry_after_secs: Option<u64>,
) -> ProviderError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .map(|detail| detail.message)
        .unwrap_or_else(|| body.trim().to_string());
    let message = format!("HTTP {}: {}", status, message);

    match status {
        401 | 403 => ProviderError::Auth(message),
        429 => ProviderError::RateLimited {
            message,
            retry_after_secs,
        },
        500..=599 => ProviderError::Transport(message),
        _ => ProviderError::Unknown(message),
    }
}
