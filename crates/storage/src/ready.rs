//! Waits for the graph store to accept traffic.

use std::pin::pin;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::time::Instant;
use travel_sync_core::constants::HEALTH_PROBE_TIMEOUT;

use crate::error::ReadinessError;

#[derive(Deserialize)]
struct HealthEntry {
    #[serde(default, alias = "Status")]
    status: String,
}

#[derive(Debug, Error)]
enum ProbeFailure {
    #[error("health check timed out after {0:?}")]
    Timeout(Duration),
    #[error("health request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("health status {0}")]
    Status(u16),
    #[error("health body undecodable: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("health body reported no instances")]
    Empty,
    #[error("store reported status {0:?}")]
    Unhealthy(String),
}

/// Poll `{store_url}/health` until the store reports healthy or `timeout` elapses.
///
/// Each probe is bounded by a short sub-timeout clamped to the time left.
/// Between probes the loop waits `retry_interval` unless the deadline comes first.
///
/// # Errors
/// [`ReadinessError`] carrying the attempt count and the last probe failure.
pub async fn validate(
    client: &reqwest::Client,
    store_url: &str,
    retry_interval: Duration,
    timeout: Duration,
) -> Result<(), ReadinessError> {
    let deadline = Instant::now() + timeout;
    let health_url = format!("{}/health", store_url.trim_end_matches('/'));
    let mut retry = pin!(tokio::time::sleep(retry_interval));
    let mut attempts = 0_u32;

    loop {
        attempts += 1;
        let probe_timeout = HEALTH_PROBE_TIMEOUT.min(deadline.saturating_duration_since(Instant::now()));
        let failure = match check_health(client, &health_url, probe_timeout).await {
            Ok(()) => {
                tracing::debug!(attempts, "store ready");
                return Ok(());
            },
            Err(e) => e,
        };
        tracing::debug!(attempt = attempts, error = %failure, "store not ready");

        let timed_out =
            || ReadinessError { deadline: timeout, attempts, last_error: failure.to_string() };
        if Instant::now() >= deadline {
            return Err(timed_out());
        }

        retry.as_mut().reset(Instant::now() + retry_interval);
        tokio::select! {
            biased;
            () = tokio::time::sleep_until(deadline) => return Err(timed_out()),
            () = &mut retry => {},
        }
    }
}

async fn check_health(
    client: &reqwest::Client,
    health_url: &str,
    probe_timeout: Duration,
) -> Result<(), ProbeFailure> {
    let probe = async {
        let response = client.get(health_url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ProbeFailure::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        let entries: Vec<HealthEntry> = serde_json::from_slice(&body)?;
        match entries.first() {
            None => Err(ProbeFailure::Empty),
            Some(entry) if entry.status == "healthy" => Ok(()),
            Some(entry) => Err(ProbeFailure::Unhealthy(entry.status.clone())),
        }
    };
    tokio::time::timeout(probe_timeout, probe)
        .await
        .map_err(|_| ProbeFailure::Timeout(probe_timeout))?
}
