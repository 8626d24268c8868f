use serde::Serialize;

use crate::models::deploy::DeploymentEvent;

const MS_PER_MINUTE: i64 = 60_000;

/// A start/end timestamp pair (epoch ms) over which metric observations
/// are aggregated for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvaluationWindow {
    pub start_time: i64,
    pub end_time: i64,
}

/// Turn deployment events (most recent first) into the windows to
/// compare. At most two events are consulted: index 0 becomes the
/// current window, index 1 the previous one. No events means nothing is
/// checkable, and the caller treats an empty result as an automatic pass.
///
/// With `evaluation_mins >= 1` each window is re-anchored to a fixed
/// duration from the event's start and the event's own end time is
/// ignored. Otherwise the event's timestamps are used verbatim.
pub fn resolve_windows(events: &[DeploymentEvent], evaluation_mins: i64) -> Vec<EvaluationWindow> {
    events
        .iter()
        .take(2)
        .map(|event| {
            let end_time = if evaluation_mins < 1 {
                event.end_time
            } else {
                event.start_time + evaluation_mins * MS_PER_MINUTE
            };
            EvaluationWindow {
                start_time: event.start_time,
                end_time,
            }
        })
        .collect()
}
