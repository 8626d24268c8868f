//! Resolution of POSTed signature parameters over the server's
//! configured defaults.

use thiserror::Error;

use crate::config::GateConfig;
use crate::models::signature::{ResolvedSignature, SignatureRequest};

const MS_PER_DAY: i64 = 86_400_000;

/// A request that cannot be turned into a backend query. Handlers map
/// these to HTTP 400.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("no default api_token configured and none was passed with the POST")]
    MissingApiToken,
    #[error("no default server configured and none was passed with the POST")]
    MissingServer,
    #[error("no metrics passed with the POST")]
    NoMetrics,
    #[error("no service_id passed with the POST")]
    MissingServiceId,
}

/// Overlay the POSTed parameters on the configured defaults and check
/// that everything needed to query the backend is present.
///
/// `now_ms` is injected rather than read from the clock so the
/// event-age cutoff is deterministic under test.
pub fn resolve(
    req: SignatureRequest,
    config: &GateConfig,
    now_ms: i64,
) -> Result<ResolvedSignature, ParamsError> {
    let api_token = override_or_default(req.api_token, &config.api_token);
    let server = override_or_default(req.server, &config.server);
    let env = override_or_default(req.env, &config.env);

    if api_token.is_empty() {
        return Err(ParamsError::MissingApiToken);
    }
    if server.is_empty() {
        return Err(ParamsError::MissingServer);
    }
    if req.metrics.is_empty() {
        return Err(ParamsError::NoMetrics);
    }
    if req.service_id.is_empty() {
        return Err(ParamsError::MissingServiceId);
    }

    let event_cutoff_ms = (req.event_age_days > 0).then(|| {
        tracing::info!(days = req.event_age_days, "limiting deployment events by age");
        now_ms - req.event_age_days * MS_PER_DAY
    });

    Ok(ResolvedSignature {
        api_token,
        server,
        env,
        evaluation_mins: req.evaluation_mins,
        event_cutoff_ms,
        service_id: req.service_id,
        metrics: req.metrics,
    })
}

fn override_or_default(posted: String, configured: &str) -> String {
    if posted.is_empty() {
        configured.to_string()
    } else {
        posted
    }
}
