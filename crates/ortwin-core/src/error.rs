//! Error types for the procedure engine
//!
//! Covers:
//! - Structural corruption in the procedure graph
//! - Ambiguous or missing phase successors during navigation
//! - Exhausted violation-repair attempts
//! - Malformed sensor replay data
//! - Operator console failures
//!
//! Empty query results are not errors: an empty next-step set is how a phase
//! boundary announces itself.

use ortwin_graph::Resource;

/// Main engine error type.
#[derive(Debug, thiserror::Error)]
pub enum ProcedureError {
    /// Plan structure demands exactly one successor phase; more matched.
    #[error("phase {phase} has {rows} candidate successor rows; expected exactly one")]
    NextPhaseAmbiguous { phase: Resource, rows: usize },

    /// A non-final phase ran out of steps but no successor phase exists.
    #[error("phase {phase} is not final but plan {plan} defines no successor phase")]
    MissingNextPhase { phase: Resource, plan: Resource },

    /// A phase in the cursor carries no order number.
    #[error("phase {phase} has no phaseOrder fact")]
    MissingPhaseOrder { phase: Resource },

    /// Post-repair recheck still fails after the configured attempt budget.
    #[error("violation repair failed after {attempts} attempt(s): {report}")]
    RepairFailed { attempts: u32, report: String },

    /// Procedure graph failed its structural invariants.
    #[error("procedure graph is inconsistent: {0}")]
    Structure(#[from] StructureError),

    /// Sensor replay data could not be used.
    #[error("sensor replay error: {0}")]
    Replay(#[from] ReplayError),

    /// Reading from or writing to the operator console failed.
    #[error("operator console error: {0}")]
    Console(#[from] std::io::Error),
}

/// Violations of the static plan/phase/step invariants.
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    /// follows/followedBy edges must form a DAG.
    #[error("step ordering edges contain a cycle")]
    CycleDetected,

    /// Exactly one phase per plan may carry `isFinalPhase true`.
    #[error("plan {plan} has {count} final phases; expected exactly one")]
    FinalPhaseCount { plan: Resource, count: usize },

    /// Two phases of one plan share an order number.
    #[error("plan {plan} has duplicate phase order {order}")]
    DuplicatePhaseOrder { plan: Resource, order: i64 },

    /// A phase of the plan has no order number at all.
    #[error("phase {phase} has no phaseOrder fact")]
    UnorderedPhase { phase: Resource },
}

/// Failures while parsing a sensor replay file.
///
/// Malformed entries are never skipped; they fail the run with a diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Event action was neither `add` nor `remove`.
    #[error("event for step {step} has unknown action {action:?}")]
    UnknownAction { step: String, action: String },

    /// Triple object was not a name, boolean, or integer.
    #[error("event for step {step} has a malformed triple object: {value}")]
    MalformedObject { step: String, value: String },

    /// The file itself did not deserialize.
    #[error("replay file did not parse: {0}")]
    Parse(#[from] serde_json::Error),
}
