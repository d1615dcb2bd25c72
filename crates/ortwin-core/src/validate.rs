//! Constraint validation seam.
//!
//! The engine only needs "does this snapshot conform, and if not, why" —
//! the shape language behind that answer is somebody else's problem. The
//! in-tree [`FactRules`] implementation covers the demo and tests with
//! required/forbidden fact checks.

use ortwin_graph::{Fact, GraphStore};
use serde::Deserialize;

/// Result of a conformance check. The report is opaque operator-facing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conformance {
    pub conforms: bool,
    pub report: String,
}

impl Conformance {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            conforms: true,
            report: String::new(),
        }
    }
}

/// External conformance-check capability.
pub trait ConstraintValidator {
    fn check(&self, graph: &GraphStore) -> Conformance;
}

/// One rule: a fact that must (or must not) be present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FactRule {
    #[serde(flatten)]
    pub fact: Fact,
    pub message: String,
}

/// Rule-set validator: all `required` facts present, no `forbidden` fact
/// present. Violated rules contribute their message to the report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FactRules {
    #[serde(default)]
    pub required: Vec<FactRule>,
    #[serde(default)]
    pub forbidden: Vec<FactRule>,
}

impl ConstraintValidator for FactRules {
    fn check(&self, graph: &GraphStore) -> Conformance {
        let mut lines: Vec<String> = Vec::new();
        for rule in &self.required {
            if !graph.contains(&rule.fact) {
                lines.push(format!("missing {}: {}", rule.fact, rule.message));
            }
        }
        for rule in &self.forbidden {
            if graph.contains(&rule.fact) {
                lines.push(format!("forbidden {}: {}", rule.fact, rule.message));
            }
        }

        if lines.is_empty() {
            Conformance::ok()
        } else {
            Conformance {
                conforms: false,
                report: lines.join("\n"),
            }
        }
    }
}
