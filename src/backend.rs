//! HTTP client for the monitoring backend's deployment-events and
//! metrics-query APIs. All upstream I/O lives here; the evaluation
//! engine only ever sees already-fetched data.

use thiserror::Error;

use crate::models::deploy::DeploymentEvents;
use crate::models::metrics::MetricsResponse;
use crate::models::signature::ResolvedSignature;
use crate::windows::EvaluationWindow;

/// Upstream failures. Handlers map these to HTTP 503; they are faults,
/// not evaluation results.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to monitoring backend failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid status code from monitoring backend: {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode monitoring backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin client over the monitoring backend. Timeouts belong to the
/// `reqwest::Client` this wraps, configured at startup.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Deployment events for the signature's service, most recent
    /// first. Zero events is a valid response, not an error.
    pub async fn fetch_deployment_events(
        &self,
        sig: &ResolvedSignature,
    ) -> Result<DeploymentEvents, BackendError> {
        let url = events_url(sig);
        tracing::debug!(%url, "fetching deployment events");
        let body = self.get(&url, &sig.api_token).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Metric observations for every declared metric within one window.
    pub async fn fetch_metrics(
        &self,
        sig: &ResolvedSignature,
        window: &EvaluationWindow,
    ) -> Result<MetricsResponse, BackendError> {
        let url = metrics_url(sig, window);
        tracing::debug!(%url, "fetching metrics");
        let body = self.get(&url, &sig.api_token).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get(&self, url: &str, api_token: &str) -> Result<String, BackendError> {
        let response = self
            .http
            .get(url)
            .header("Authorization", format!("Api-Token {api_token}"))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "monitoring backend rejected request");
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

fn base_url(sig: &ResolvedSignature, api_path: &str) -> String {
    match sig.env.as_str() {
        "" => format!("https://{}/{api_path}", sig.server),
        env => format!("https://{}/e/{env}/{api_path}", sig.server),
    }
}

/// Events query for the deployments of one service, optionally limited
/// by the event-age cutoff.
fn events_url(sig: &ResolvedSignature) -> String {
    let mut url = format!(
        "{}?eventType=CUSTOM_DEPLOYMENT&entityId={}",
        base_url(sig, "api/v1/events"),
        sig.service_id,
    );
    if let Some(cutoff) = sig.event_cutoff_ms {
        url.push_str(&format!("&from={cutoff}"));
    }
    url
}

/// The metric selector is the comma-joined raw rule ids. The backend,
/// not the engine, owns the id grammar.
fn metric_selector(sig: &ResolvedSignature) -> String {
    sig.metrics
        .iter()
        .map(|rule| rule.id.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Metrics query for one evaluation window, `resolution=Inf` so each
/// series collapses to a single aggregated point.
fn metrics_url(sig: &ResolvedSignature, window: &EvaluationWindow) -> String {
    format!(
        "{}?metricSelector={}&resolution=Inf&from={}&to={}&entitySelector={}",
        base_url(sig, "api/v2/metrics/query"),
        urlencoding::encode(&metric_selector(sig)),
        window.start_time,
        window.end_time,
        urlencoding::encode(&format!("entityId(\"{}\")", sig.service_id)),
    )
}
