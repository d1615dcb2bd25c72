//! Top-level procedure state machine.
//!
//! The controller owns the fact snapshot and the cursor, and is the only
//! thing that mutates either. Trigger sources call into it one at a time
//! (serialization is the driver's job); while a violation prompt is
//! outstanding the controller sits in [`RunState::AwaitingConfirmation`] and
//! drops advance triggers.

use crate::console::OperatorConsole;
use crate::error::ProcedureError;
use crate::navigator::{self, Cursor};
use crate::procedure::ProcedureGraph;
use crate::question::{self, and_join};
use crate::replay::SensorReplay;
use crate::validate::ConstraintValidator;
use crate::violation;
use ortwin_graph::GraphStore;
use tracing::{debug, info, warn};

/// Engine knobs.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Surface the raw validation report on violation.
    pub show_validation_report: bool,
    /// Repair attempts before a violation becomes fatal to the step.
    pub max_repair_attempts: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            show_validation_report: false,
            max_repair_attempts: 1,
        }
    }
}

/// Lifecycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    InStep,
    /// A violation is being confirmed/repaired; advance triggers are dropped.
    AwaitingConfirmation,
    Finished,
}

/// The procedure state machine.
pub struct ProcedureController<C: OperatorConsole> {
    graph: GraphStore,
    cursor: Cursor,
    replay: Box<dyn SensorReplay + Send>,
    validator: Box<dyn ConstraintValidator + Send>,
    console: C,
    config: ControllerConfig,
    state: RunState,
    violation_occurred: bool,
}

impl<C: OperatorConsole> ProcedureController<C> {
    pub fn new(
        graph: GraphStore,
        cursor: Cursor,
        replay: Box<dyn SensorReplay + Send>,
        validator: Box<dyn ConstraintValidator + Send>,
        console: C,
        config: ControllerConfig,
    ) -> Self {
        Self {
            graph,
            cursor,
            replay,
            validator,
            console,
            config,
            state: RunState::NotStarted,
            violation_occurred: false,
        }
    }

    /// Begin the run: check plan structure, narrate the opening, apply and
    /// validate the first steps' sensor events.
    pub fn start(&mut self) -> Result<(), ProcedureError> {
        if self.state != RunState::NotStarted {
            warn!(state = ?self.state, "start ignored");
            return Ok(());
        }

        ProcedureGraph::new(&self.graph).validate_structure(&self.cursor.plan)?;
        info!(plan = %self.cursor.plan, phase = %self.cursor.phase, "procedure starting");

        self.intro_message();
        self.progress_message();
        self.apply_sensor_events();
        self.state = RunState::InStep;
        self.handle_sensor_data()?;
        Ok(())
    }

    /// Advance to the next step set or phase. Dropped unless `InStep`.
    pub fn advance_trigger(&mut self) -> Result<(), ProcedureError> {
        if self.state != RunState::InStep {
            debug!(state = ?self.state, "advance trigger dropped");
            return Ok(());
        }

        let advance = navigator::advance(&self.graph, &self.cursor)?;
        if advance.done {
            info!("final phase complete");
            self.console.say(
                "No more steps needed. The final phase is complete. The procedure is finished.",
            );
            self.state = RunState::Finished;
            return Ok(());
        }

        if let Some(transition) = &advance.transition {
            let current_task = self.phase_task_label();
            let next_task = ProcedureGraph::new(&self.graph)
                .phase_task(&transition.phase)
                .unwrap_or_else(|| transition.phase.label());
            info!(
                from = transition.current_order,
                to = transition.next_order,
                "crossing phase boundary"
            );
            self.console
                .say(&format!("Current phase ({current_task}), is complete.\n"));
            self.console.say(&format!(
                "Proceeding from phase {} to phase {}, namely {}.",
                transition.current_order, transition.next_order, next_task
            ));
        }

        self.cursor = advance.cursor;
        self.progress_message();
        self.apply_sensor_events();
        self.handle_sensor_data()?;
        Ok(())
    }

    /// Answer a free-text operator question. Dropped unless `InStep`.
    pub fn ask_question(&mut self, text: &str) -> Result<(), ProcedureError> {
        if self.state != RunState::InStep {
            debug!(state = ?self.state, "question dropped");
            return Ok(());
        }
        let reply = question::answer(&self.graph, &self.cursor.steps, text, &mut self.console)?;
        self.console.say(&reply);
        Ok(())
    }

    /// Jump straight to `Finished` from any state.
    pub fn terminate(&mut self) {
        if self.state == RunState::Finished {
            return;
        }
        info!("procedure terminated");
        self.state = RunState::Finished;
        self.console.say("Procedure terminated.");
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == RunState::Finished
    }

    #[must_use]
    pub fn is_awaiting_confirmation(&self) -> bool {
        self.state == RunState::AwaitingConfirmation
    }

    /// Whether a violation is currently unresolved.
    #[must_use]
    pub fn violation_occurred(&self) -> bool {
        self.violation_occurred
    }

    /// Task label of the current phase.
    #[must_use]
    pub fn current_phase_label(&self) -> String {
        self.phase_task_label()
    }

    /// Action labels of the current steps.
    #[must_use]
    pub fn current_step_labels(&self) -> Vec<String> {
        ProcedureGraph::new(&self.graph).step_actions(&self.cursor.steps)
    }

    #[must_use]
    pub fn console(&self) -> &C {
        &self.console
    }

    #[must_use]
    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// Apply the sensor events of every current step to the snapshot.
    fn apply_sensor_events(&mut self) {
        for step in &self.cursor.steps {
            if let Some(event) = self.replay.event_for(step) {
                debug!(step = %step, mutations = event.mutations.len(), "applying sensor event");
                for mutation in &event.mutations {
                    self.graph.apply(mutation);
                }
            }
        }
    }

    /// Validate the snapshot and, on violation, run confirm-and-repair.
    fn handle_sensor_data(&mut self) -> Result<(), ProcedureError> {
        let outcome = self.validator.check(&self.graph);
        if !outcome.conforms {
            warn!("snapshot failed constraint validation");
            self.violation_occurred = true;
            self.state = RunState::AwaitingConfirmation;
            if self.config.show_validation_report {
                self.console.say(&outcome.report);
            }
            violation::repair(
                &mut self.graph,
                &*self.replay,
                &*self.validator,
                &mut self.console,
                &self.cursor.steps,
                self.config.max_repair_attempts,
            )?;
            self.violation_occurred = false;
            self.state = RunState::InStep;
        }
        self.step_finished_message();
        Ok(())
    }

    fn intro_message(&mut self) {
        let graph = ProcedureGraph::new(&self.graph);
        let order = graph.phase_order(&self.cursor.phase).unwrap_or(1);
        let task = self.phase_task_label();
        let actions = self.current_step_labels();

        self.console.say(&format!(
            "\nLet's begin the procedure. We're starting with phase {order}, {task}."
        ));
        let line = match actions.as_slice() {
            [only] => format!("The first step is {only}."),
            many => format!("The first steps are {}.", and_join(many)),
        };
        self.console.say(&line);
    }

    fn progress_message(&mut self) {
        let actions = self.current_step_labels();
        let line = match actions.as_slice() {
            [only] => format!("Performing step: {only}..."),
            many => format!("Performing steps: {}...", and_join(many)),
        };
        self.console.say(&line);
    }

    fn step_finished_message(&mut self) {
        let actions = self.current_step_labels();
        let line = match actions.as_slice() {
            [only] => format!("Current step ({only}) is finished."),
            many => format!("Current steps ({}) are finished.", and_join(many)),
        };
        self.console.say(&line);
    }

    fn phase_task_label(&self) -> String {
        ProcedureGraph::new(&self.graph)
            .phase_task(&self.cursor.phase)
            .unwrap_or_else(|| self.cursor.phase.label())
    }
}
