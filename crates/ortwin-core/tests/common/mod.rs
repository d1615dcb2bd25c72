//! Shared two-phase procedure fixture.
//!
//! PlanA: A_Phase1 (order 1, "Patient_Preparation") with simultaneous start
//! steps Step_A1_1/Step_A1_2, then B_Phase1 (order 2, "Incision", final)
//! starting at Step_B1_1.

#![allow(dead_code)]

use ortwin_core::vocab;
use ortwin_core::Cursor;
use ortwin_graph::{Fact, GraphStore, Term};

pub fn sample_graph() -> GraphStore {
    [
        Fact::link("PlanA", vocab::HAS_PHASE, "A_Phase1"),
        Fact::link("PlanA", vocab::HAS_PHASE, "B_Phase1"),
        Fact::new("A_Phase1", vocab::PHASE_ORDER, Term::Int(1)),
        Fact::new("B_Phase1", vocab::PHASE_ORDER, Term::Int(2)),
        Fact::new("B_Phase1", vocab::IS_FINAL_PHASE, Term::Bool(true)),
        Fact::link("A_Phase1", vocab::PHASE_TASK, "Patient_Preparation"),
        Fact::link("B_Phase1", vocab::PHASE_TASK, "Incision"),
        Fact::link("B_Phase1", vocab::PHASE_START_STEP, "Step_B1_1"),
        Fact::link("Step_A1_1", vocab::STEP_ACTION, "Position_Patient"),
        Fact::link("Step_A1_2", vocab::STEP_ACTION, "Attach_Monitoring"),
        Fact::link("Step_B1_1", vocab::STEP_ACTION, "Open_Incision"),
        Fact::link("Step_B1_1", vocab::TOOL_USED, "Scalpel"),
        Fact::link("Step_B1_1", vocab::TOOL_USED, "Retractor"),
        Fact::link("Step_B1_1", vocab::ACTOR_PRESENT, "Lead_Surgeon"),
    ]
    .into_iter()
    .collect()
}

pub fn start_cursor() -> Cursor {
    Cursor::new(
        "PlanA",
        "A_Phase1",
        vec!["Step_A1_1".into(), "Step_A1_2".into()],
    )
}
