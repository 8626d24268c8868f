use serde::{Deserialize, Serialize};

/// Declares how one named metric should be judged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRule {
    /// Metric id the way the backend names it, e.g.
    /// `builtin:service.response.time:(avg)`.
    pub id: String,
    /// `"static"`, `"relative"`, or anything else for the default
    /// zero-tolerance comparison.
    #[serde(default)]
    pub validation: String,
    #[serde(default)]
    pub static_threshold: f64,
    #[serde(default)]
    pub relative_threshold: f64,
}

/// Body of `POST /api/v1/signature`. Backend connection fields are
/// optional; anything omitted falls back to the server's config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignatureRequest {
    #[serde(default)]
    pub api_token: String,
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub env: String,
    /// Fixed evaluation window length. `< 1` means "use each deployment
    /// event's own end time".
    #[serde(default)]
    pub evaluation_mins: i64,
    /// Only consider deployment events newer than this many days.
    #[serde(default)]
    pub event_age_days: i64,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub metrics: Vec<MetricRule>,
}

/// A request merged over the config defaults, with everything needed to
/// query the backend present and validated.
#[derive(Debug, Clone)]
pub struct ResolvedSignature {
    pub api_token: String,
    pub server: String,
    pub env: String,
    pub evaluation_mins: i64,
    /// Epoch-ms cutoff derived from `event_age_days`.
    pub event_cutoff_ms: Option<i64>,
    pub service_id: String,
    pub metrics: Vec<MetricRule>,
}
