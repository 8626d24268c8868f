use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One data point in a metric series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricPoint {
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub timestamp: i64,
    pub value: f64,
}

/// All data points returned for one metric id within a window. An empty
/// `values` list is a valid response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricSeries {
    #[serde(default)]
    pub values: Vec<MetricPoint>,
}

/// Response body of the backend's metrics query API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub next_page_key: Option<String>,
    #[serde(default)]
    pub metrics: HashMap<String, MetricSeries>,
}

/// Per-window lookup of metric observations.
///
/// Only the first data point of a series is consulted. An absent key or
/// an empty series means "no data", which is distinct from an observed
/// value of 0.0. Lookups never fabricate observations.
#[derive(Debug, Clone, Default)]
pub struct ObservationSet {
    metrics: HashMap<String, MetricSeries>,
}

impl ObservationSet {
    pub fn first_value(&self, metric_id: &str) -> Option<f64> {
        self.metrics
            .get(metric_id)?
            .values
            .first()
            .map(|point| point.value)
    }
}

impl From<MetricsResponse> for ObservationSet {
    fn from(response: MetricsResponse) -> Self {
        Self {
            metrics: response.metrics,
        }
    }
}
