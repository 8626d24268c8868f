use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::AppState;
use crate::backend::BackendClient;
use crate::engine;
use crate::models::metrics::ObservationSet;
use crate::models::outcome::SignatureResponse;
use crate::models::signature::SignatureRequest;
use crate::params;
use crate::windows::{EvaluationWindow, resolve_windows};

/// Evaluate a performance signature for one service's most recent
/// deployment.
///
/// A failed gate is a `pass: false` body with HTTP 200; only malformed
/// requests (400) and upstream fetch faults (503) are HTTP errors.
pub async fn evaluate(
    State(state): State<AppState>,
    Json(req): Json<SignatureRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let evaluation_id = uuid::Uuid::new_v4();
    let now_ms = chrono::Utc::now().timestamp_millis();

    let sig = params::resolve(req, &state.config, now_ms).map_err(|e| {
        tracing::warn!(%evaluation_id, "rejected signature request: {e}");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let client = BackendClient::new(state.http.clone());

    let events = client.fetch_deployment_events(&sig).await.map_err(|e| {
        tracing::error!(%evaluation_id, service = %sig.service_id, "deployment event fetch failed: {e}");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("could not fetch deployment events: {e}"),
        )
    })?;

    let windows = resolve_windows(&events.events, sig.evaluation_mins);
    let Some(current_window) = windows.first() else {
        tracing::info!(%evaluation_id, service = %sig.service_id, "no deployment events found, auto-passing");
        return Ok(Json(SignatureResponse {
            pass: true,
            response: vec!["No deployment events found. Auto-passing.".to_string()],
        }));
    };
    log_windows(&windows);

    let current: ObservationSet = client
        .fetch_metrics(&sig, current_window)
        .await
        .map_err(|e| {
            tracing::error!(%evaluation_id, "current metrics fetch failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("could not fetch current metrics: {e}"),
            )
        })?
        .into();

    let previous: ObservationSet = match windows.get(1) {
        Some(previous_window) => client
            .fetch_metrics(&sig, previous_window)
            .await
            .map_err(|e| {
                tracing::error!(%evaluation_id, "previous metrics fetch failed: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("could not fetch previous metrics: {e}"),
                )
            })?
            .into(),
        None => ObservationSet::default(),
    };

    let outcome = engine::evaluate_signature(&sig.metrics, &current, &previous);
    tracing::info!(
        %evaluation_id,
        service = %sig.service_id,
        pass = outcome.pass,
        metrics = sig.metrics.len(),
        "signature evaluated"
    );

    Ok(Json(SignatureResponse::from(outcome)))
}

fn log_windows(windows: &[EvaluationWindow]) {
    match windows {
        [current] => tracing::info!(
            "found current deployment from {} to {}",
            pretty_ms(current.start_time),
            pretty_ms(current.end_time),
        ),
        [current, previous] => tracing::info!(
            "found previous deployment from {} to {} and current deployment from {} to {}",
            pretty_ms(previous.start_time),
            pretty_ms(previous.end_time),
            pretty_ms(current.start_time),
            pretty_ms(current.end_time),
        ),
        _ => {}
    }
}

fn pretty_ms(ts_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ts_ms)
        .map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| ts_ms.to_string())
}
