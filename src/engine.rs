//! Per-signature evaluation: match declared metric rules to fetched
//! observations and dispatch each to the right threshold evaluator.

use crate::checks;
use crate::models::metrics::ObservationSet;
use crate::models::outcome::EvaluationOutcome;
use crate::models::signature::MetricRule;

/// Key a declared metric id the way the metrics API keys its response.
///
/// Aggregation-qualified ids like `name:percentile(90)` come back
/// verbatim, while plain ids like `name:(avg)` come back with the
/// parentheses dropped. This is an upstream naming quirk, not
/// evaluation logic, and stays out of the evaluators.
pub fn normalize_metric_id(id: &str) -> String {
    if id.contains("percentile(") {
        return id.to_string();
    }
    id.replace(['(', ')'], "")
}

/// Judge every declared metric against the fetched observations.
///
/// Never short-circuits: each rule contributes exactly one message, in
/// declaration order, and the aggregate passes unless an evaluator
/// explicitly fails. A metric with no current data, or a default-method
/// metric with no previous data, is reported without failing the
/// signature.
pub fn evaluate_signature(
    rules: &[MetricRule],
    current: &ObservationSet,
    previous: &ObservationSet,
) -> EvaluationOutcome {
    let mut outcome = EvaluationOutcome::default();

    for rule in rules {
        let lookup_id = normalize_metric_id(&rule.id);
        tracing::debug!(metric = %rule.id, lookup = %lookup_id, "evaluating metric");

        let Some(current_value) = current.first_value(&lookup_id) else {
            outcome.note(format!("No current metrics found for metric {}", rule.id));
            continue;
        };
        let previous_value = previous.first_value(&lookup_id);

        match rule.validation.as_str() {
            "static" => {
                outcome.record(checks::check_static_threshold(
                    current_value,
                    rule.static_threshold,
                    &rule.id,
                ));
            }
            "relative" => {
                outcome.record(checks::check_relative_threshold(
                    current_value,
                    previous_value.unwrap_or(0.0),
                    rule.relative_threshold,
                    &rule.id,
                ));
            }
            _ => match previous_value {
                Some(previous_value) => {
                    outcome.record(checks::compare_to_previous(
                        current_value,
                        previous_value,
                        &rule.id,
                    ));
                }
                None => {
                    outcome.note(format!(
                        "No previous metrics to compare against for metric {}",
                        rule.id
                    ));
                }
            },
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::metrics::{MetricPoint, MetricSeries, MetricsResponse};
    use std::collections::HashMap;

    fn rule(id: &str, validation: &str) -> MetricRule {
        MetricRule {
            id: id.to_string(),
            validation: validation.to_string(),
            static_threshold: 0.0,
            relative_threshold: 0.0,
        }
    }

    fn observations(entries: &[(&str, f64)]) -> ObservationSet {
        let metrics: HashMap<String, MetricSeries> = entries
            .iter()
            .map(|(id, value)| {
                (
                    id.to_string(),
                    MetricSeries {
                        values: vec![MetricPoint {
                            dimensions: vec![],
                            timestamp: 0,
                            value: *value,
                        }],
                    },
                )
            })
            .collect();
        MetricsResponse {
            metrics,
            ..Default::default()
        }
        .into()
    }

    #[test]
    fn test_normalize_strips_parens_from_plain_ids() {
        assert_eq!(
            normalize_metric_id("dummy_metric_name:(avg)"),
            "dummy_metric_name:avg"
        );
    }

    #[test]
    fn test_normalize_keeps_percentile_ids_verbatim() {
        assert_eq!(
            normalize_metric_id("dummy_metric_name:percentile(90)"),
            "dummy_metric_name:percentile(90)"
        );
    }

    #[test]
    fn test_static_check_end_to_end() {
        let mut static_rule = rule("dummy_metric_name:percentile(90)", "static");
        static_rule.static_threshold = 1234.1234;

        let current = observations(&[("dummy_metric_name:percentile(90)", 1235.0)]);
        let outcome = evaluate_signature(&[static_rule], &current, &ObservationSet::default());

        assert!(!outcome.pass);
        assert_eq!(outcome.messages.len(), 1);
        assert!(
            outcome.messages[0]
                .contains("above the static threshold (1234.12) with a value of 1235.00"),
            "unexpected message: {}",
            outcome.messages[0]
        );
    }

    #[test]
    fn test_missing_current_is_informational() {
        let outcome = evaluate_signature(
            &[rule("dummy_metric_name:(avg)", "")],
            &ObservationSet::default(),
            &ObservationSet::default(),
        );

        assert!(outcome.pass);
        assert_eq!(
            outcome.messages,
            vec!["No current metrics found for metric dummy_metric_name:(avg)"]
        );
    }

    #[test]
    fn test_missing_previous_is_informational_for_default_method() {
        let current = observations(&[("dummy_metric_name:avg", 1.0)]);
        let outcome = evaluate_signature(
            &[rule("dummy_metric_name:(avg)", "")],
            &current,
            &ObservationSet::default(),
        );

        assert!(outcome.pass);
        assert_eq!(
            outcome.messages,
            vec!["No previous metrics to compare against for metric dummy_metric_name:(avg)"]
        );
    }

    #[test]
    fn test_relative_check_without_previous_compares_against_zero() {
        let mut relative_rule = rule("dummy_metric_name:(avg)", "relative");
        relative_rule.relative_threshold = 0.5;

        let current = observations(&[("dummy_metric_name:avg", 1.0)]);
        let outcome =
            evaluate_signature(&[relative_rule], &current, &ObservationSet::default());

        assert!(!outcome.pass);
    }

    #[test]
    fn test_lookup_uses_normalized_id() {
        // Declared with parens, keyed without them in the response
        let current = observations(&[("dummy_metric_name:avg", 2.0)]);
        let previous = observations(&[("dummy_metric_name:avg", 3.0)]);
        let outcome = evaluate_signature(
            &[rule("dummy_metric_name:(avg)", "")],
            &current,
            &previous,
        );

        assert!(outcome.pass);
        assert!(outcome.messages[0].contains("Improvement of 1.00"));
    }

    #[test]
    fn test_one_message_per_rule_and_no_short_circuit() {
        let mut static_rule = rule("a:(avg)", "static");
        static_rule.static_threshold = 1.0;
        let rules = vec![
            static_rule,                 // fails: 5.0 > 1.0
            rule("b:(avg)", ""),         // passes: improvement
            rule("c:(avg)", ""),         // informational: no data at all
        ];

        let current = observations(&[("a:avg", 5.0), ("b:avg", 1.0)]);
        let previous = observations(&[("a:avg", 1.0), ("b:avg", 2.0)]);
        let outcome = evaluate_signature(&rules, &current, &previous);

        assert!(!outcome.pass);
        assert_eq!(outcome.messages.len(), rules.len());
        assert!(outcome.messages[0].contains("above the static threshold"));
        assert!(outcome.messages[1].contains("Improvement of 1.00"));
        assert!(outcome.messages[2].contains("No current metrics found"));
    }

    #[test]
    fn test_unknown_validation_method_falls_back_to_default() {
        let current = observations(&[("a:avg", 2.0)]);
        let previous = observations(&[("a:avg", 1.0)]);
        let outcome = evaluate_signature(&[rule("a:(avg)", "bogus")], &current, &previous);

        assert!(!outcome.pass);
        assert!(outcome.messages[0].contains("degradation of 1.00"));
    }
}
