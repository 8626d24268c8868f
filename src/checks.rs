//! The three threshold evaluators. Each is a pure function over numeric
//! inputs plus a metric name for message formatting.
//!
//! Deltas are uniformly `current - previous`, so a decrease in the
//! current value is always the good direction, and a value at or below
//! a static threshold is good. Messages round to 2 decimal places; the
//! pass/fail boolean is computed on unrounded values.

/// One evaluator's verdict. A failed check is a normal result, not an
/// error value; upstream faults use `BackendError` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub message: String,
    pub passed: bool,
}

/// Fixed numeric ceiling: values at or below the threshold pass.
pub fn check_static_threshold(value: f64, threshold: f64, metric: &str) -> Check {
    if value - threshold > 0.0 {
        return Check {
            message: format!(
                "{metric} was above the static threshold ({threshold:.2}) with a value of {value:.2}"
            ),
            passed: false,
        };
    }

    Check {
        message: format!(
            "{metric} fit the static threshold ({threshold:.2}) with a value of {value:.2}."
        ),
        passed: true,
    }
}

/// The current value may be worse than the previous one by up to
/// `tolerance` before failing.
pub fn check_relative_threshold(current: f64, previous: f64, tolerance: f64, metric: &str) -> Check {
    let delta = current - previous;

    if delta - tolerance > 0.0 {
        return Check {
            message: format!(
                "FAIL - {metric} did not meet the relative threshold criteria. The current performance is {current:.2}, which is not better than the previous value of {previous:.2} plus the relative threshold of {tolerance:.2}."
            ),
            passed: false,
        };
    }

    // A negative delta is an outright improvement
    if delta < 0.0 {
        return Check {
            message: format!(
                "PASS - {metric} improvement to {current:.2} from {previous:.2}. (Difference: {delta:.2})"
            ),
            passed: true,
        };
    }

    Check {
        message: format!(
            "PASS - {metric}'s current value is {current:.2}, which is passable compared to the previous results ({previous:.2}) plus the tolerance ({tolerance:.2})."
        ),
        passed: true,
    }
}

/// Zero-tolerance current-vs-previous comparison: any increase fails.
pub fn compare_to_previous(current: f64, previous: f64, metric: &str) -> Check {
    let delta = current - previous;

    if delta > 0.0 {
        return Check {
            message: format!(
                "{metric} had a degradation of {delta:.2}, from {previous:.2} to {current:.2}"
            ),
            passed: false,
        };
    }

    Check {
        message: format!("Successful deploy! Improvement of {:.2}.", delta.abs()),
        passed: true,
    }
}
