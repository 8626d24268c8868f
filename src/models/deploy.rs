use serde::{Deserialize, Serialize};

/// One deployment event as returned by the monitoring backend's events
/// API. Events arrive most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEvent {
    /// Epoch ms.
    pub start_time: i64,
    /// Epoch ms.
    pub end_time: i64,
    #[serde(default)]
    pub deployment_name: String,
    #[serde(default)]
    pub deployment_version: String,
}

/// Wrapper matching the events API response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentEvents {
    #[serde(default)]
    pub events: Vec<DeploymentEvent>,
}
