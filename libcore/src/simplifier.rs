//! Applies the ordered rule set until the tree stops changing

use crate::component::Component;
use crate::context::Context;
use crate::error::MathError;
use crate::rules::{Rule, RULES};
use crate::trace::{SimplifyTrace, TraceStep};
use std::collections::HashSet;

enum Outcome {
    FixedPoint,
    Cycle,
    Exhausted,
}

struct Run {
    result: Component,
    passes: usize,
    outcome: Outcome,
}

/// Applies `rule` to every node, children before their parent.
fn apply_bottom_up(
    rule: Rule,
    component: Component,
    context: &Context,
    pass: usize,
    steps: &mut Option<Vec<TraceStep>>,
) -> Component {
    let component =
        component.map_children(|child| apply_bottom_up(rule, child, context, pass, steps));
    if !rule.precondition(&component, context) {
        return component;
    }
    let before = component.clone();
    let after = rule.transform(component, context);
    if after != before {
        tracing::trace!(
            target: "simplify",
            rule = rule.name(),
            before = %before,
            after = %after,
            "rule_applied"
        );
        if let Some(steps) = steps {
            steps.push(TraceStep {
                rule,
                pass,
                before: before.to_string(),
                after: after.to_string(),
            });
        }
    }
    after
}

fn run(component: Component, context: &Context, steps: &mut Option<Vec<TraceStep>>) -> Run {
    let mut current = component;
    let mut seen = HashSet::new();
    for pass in 0..context.max_iterations {
        let previous = current.clone();
        for rule in RULES.iter() {
            current = apply_bottom_up(*rule, current, context, pass, steps);
        }
        if current == previous {
            tracing::debug!(target: "simplify", passes = pass + 1, "fixed_point");
            return Run {
                result: current,
                passes: pass + 1,
                outcome: Outcome::FixedPoint,
            };
        }
        seen.insert(previous);
        if seen.contains(&current) {
            tracing::warn!(
                target: "simplify",
                passes = pass + 1,
                result = %current,
                "cycle_detected"
            );
            return Run {
                result: current,
                passes: pass + 1,
                outcome: Outcome::Cycle,
            };
        }
    }
    tracing::error!(
        target: "simplify",
        limit = context.max_iterations,
        result = %current,
        "Simplification did not reach a fixed point. Returned partial result."
    );
    Run {
        result: current,
        passes: context.max_iterations,
        outcome: Outcome::Exhausted,
    }
}

/// Simplifies to the canonical form.
///
/// Best effort: if no fixed point is reached within the configured number of
/// passes the last intermediate result is returned.
pub fn simplify(component: &Component, context: &Context) -> Component {
    run(component.clone(), context, &mut None).result
}

/// Like [`simplify`] but fails if no fixed point is reached.
pub fn try_simplify(component: &Component, context: &Context) -> Result<Component, MathError> {
    let run = run(component.clone(), context, &mut None);
    match run.outcome {
        Outcome::FixedPoint => Ok(run.result),
        Outcome::Cycle => Err(MathError::Internal(format!(
            "simplification of {} is cyclic",
            component
        ))),
        Outcome::Exhausted => Err(MathError::Internal(format!(
            "simplification of {} did not settle within {} passes",
            component, run.passes
        ))),
    }
}

/// Simplifies and records every rewrite applied on the way.
pub fn simplify_with_trace(component: &Component, context: &Context) -> (Component, SimplifyTrace) {
    let mut steps = Some(vec![]);
    let run = run(component.clone(), context, &mut steps);
    let trace = SimplifyTrace {
        initial: component.to_string(),
        steps: steps.unwrap_or_default(),
        passes: run.passes,
        result: run.result.to_string(),
    };
    (run.result, trace)
}
