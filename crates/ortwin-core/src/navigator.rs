//! Step and phase navigation.
//!
//! Pure functions of (graph contents, cursor): identical inputs yield
//! identical outputs, which is what makes the controller's transitions
//! testable in isolation.

use crate::error::ProcedureError;
use crate::procedure::{PhaseTransition, ProcedureGraph};
use ortwin_graph::{GraphStore, Resource};

/// Controller-owned position inside a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub plan: Resource,
    pub phase: Resource,
    pub steps: Vec<Resource>,
}

impl Cursor {
    pub fn new(
        plan: impl Into<Resource>,
        phase: impl Into<Resource>,
        steps: Vec<Resource>,
    ) -> Self {
        Self {
            plan: plan.into(),
            phase: phase.into(),
            steps,
        }
    }
}

/// Outcome of one advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// New position; unchanged when `done`.
    pub cursor: Cursor,
    /// Present when the advance crossed a phase boundary.
    pub transition: Option<PhaseTransition>,
    /// The final phase completed; no further advances exist.
    pub done: bool,
}

/// Steps following the current step set. Empty at a phase boundary.
#[must_use]
pub fn next_steps(store: &GraphStore, current: &[Resource]) -> Vec<Resource> {
    ProcedureGraph::new(store).next_steps(current)
}

/// Advance the cursor by one transition.
///
/// Within a phase this moves to the next step set. At a phase boundary it
/// moves to the successor phase's first steps, or reports `done` when the
/// current phase is final. A non-final phase without a successor is plan
/// corruption and fails loudly.
pub fn advance(store: &GraphStore, cursor: &Cursor) -> Result<Advance, ProcedureError> {
    let graph = ProcedureGraph::new(store);

    let next = graph.next_steps(&cursor.steps);
    if !next.is_empty() {
        return Ok(Advance {
            cursor: Cursor {
                plan: cursor.plan.clone(),
                phase: cursor.phase.clone(),
                steps: next,
            },
            transition: None,
            done: false,
        });
    }

    match graph.next_phase(&cursor.phase, &cursor.plan)? {
        Some(transition) => Ok(Advance {
            cursor: Cursor {
                plan: cursor.plan.clone(),
                phase: transition.phase.clone(),
                steps: transition.first_steps.clone(),
            },
            transition: Some(transition),
            done: false,
        }),
        None if graph.is_final_phase(&cursor.phase) => Ok(Advance {
            cursor: cursor.clone(),
            transition: None,
            done: true,
        }),
        None => Err(ProcedureError::MissingNextPhase {
            phase: cursor.phase.clone(),
            plan: cursor.plan.clone(),
        }),
    }
}
