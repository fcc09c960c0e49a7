use std::{fmt, time::Duration};

use reqwest::{Client, Response, StatusCode};
use tokio::time::sleep;

use crate::{config, warning};

/// Upper bound for a single backoff sleep in seconds. Longer waits are
/// pointless for a periodically scheduled job; the next invocation will
/// simply pick the work up again.
pub const BACKOFF_CAP_SECS: u64 = 120;

/// Classified failure of a single Spotify Web API operation.
#[derive(Debug)]
pub enum ApiError {
    /// 429 Too Many Requests, optionally carrying the `Retry-After` hint.
    /// The only retryable variant.
    RateLimited { retry_after: Option<u64> },
    /// The service rejected the request (invalid id, permissions, ...).
    Rejected(StatusCode),
    /// Transport-level failure (connection, timeout, malformed body).
    Network(reqwest::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RateLimited { retry_after } => match retry_after {
                Some(secs) => write!(f, "rate limited (retry after {} seconds)", secs),
                None => write!(f, "rate limited"),
            },
            ApiError::Rejected(status) => write!(f, "request rejected with status {}", status),
            ApiError::Network(e) => write!(f, "network error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err)
    }
}

/// Classifies an HTTP response into a usable response or an [`ApiError`].
///
/// 429 responses become [`ApiError::RateLimited`] with the parsed
/// `Retry-After` header value; any other non-success status becomes
/// [`ApiError::Rejected`].
pub fn classify(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        return Err(ApiError::RateLimited { retry_after });
    }

    if !status.is_success() {
        return Err(ApiError::Rejected(status));
    }

    Ok(response)
}

/// Executes a remote operation with bounded retry and exponential backoff.
///
/// Runs `operation()` and, whenever it fails with [`ApiError::RateLimited`],
/// sleeps `min(retry_after_hint.unwrap_or(2^attempt), BACKOFF_CAP_SECS)`
/// seconds before trying again, up to `max_retries` attempts in total. Any
/// other error aborts immediately and is handed back to the caller, which
/// owns the fallback decision (skip this batch, this playlist, or this
/// metadata field).
///
/// # Arguments
///
/// * `op_name` - Short human-readable label used in rate-limit warnings
/// * `max_retries` - Total attempt budget from the global settings
/// * `operation` - Zero-argument async operation to execute
///
/// # Example
///
/// ```ignore
/// let snapshot = with_backoff("fetch target tracks", 3, || async {
///     fetch_page(&token, &url).await
/// })
/// .await?;
/// ```
pub async fn with_backoff<T, F, Fut>(
    op_name: &str,
    max_retries: u32,
    operation: F,
) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(ApiError::RateLimited { retry_after }) if attempt + 1 < max_retries => {
                let wait = retry_after
                    .unwrap_or_else(|| 2u64.saturating_pow(attempt))
                    .min(BACKOFF_CAP_SECS);
                warning!(
                    "Rate limit hit for {}. Retrying in {} seconds...",
                    op_name,
                    wait
                );
                sleep(Duration::from_secs(wait)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Checks connectivity to the Spotify Web API before any mutating call.
///
/// Any HTTP response counts as reachable; an authentication failure is still
/// a working connection. Only transport-level errors report the API as down.
pub async fn ping() -> bool {
    let client = Client::new();
    client
        .get(config::spotify_apiurl())
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .is_ok()
}
