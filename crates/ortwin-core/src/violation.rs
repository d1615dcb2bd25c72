//! Diagnose-and-repair flow for constraint violations.
//!
//! When a sensor event leaves the snapshot non-conforming, the engine walks
//! the operator through the prompts attached to the current steps, reverses
//! the offending mutations to restore the last known-good snapshot, and
//! rechecks. The reversal happens exactly once per violation; reversing a
//! second time would re-apply the bad facts. Additional attempts (when
//! configured) re-prompt and re-check only, and exhausting the budget is
//! fatal to the step.

use crate::console::OperatorConsole;
use crate::error::ProcedureError;
use crate::replay::SensorReplay;
use crate::validate::ConstraintValidator;
use ortwin_graph::{GraphStore, Resource};
use tracing::{debug, info, warn};

/// Run the repair loop for the current steps. Returns once the snapshot
/// conforms again, or fails with [`ProcedureError::RepairFailed`].
pub fn repair(
    graph: &mut GraphStore,
    replay: &dyn SensorReplay,
    validator: &dyn ConstraintValidator,
    console: &mut dyn OperatorConsole,
    current_steps: &[Resource],
    max_attempts: u32,
) -> Result<(), ProcedureError> {
    let max_attempts = max_attempts.max(1);

    surface_prompts(replay, console, current_steps)?;
    reverse_event_mutations(graph, replay, current_steps);

    let mut attempts = 0;
    loop {
        attempts += 1;
        let outcome = validator.check(graph);
        if outcome.conforms {
            info!(attempts, "violation repaired");
            console.say("Looks like you've fixed the issue! We can now proceed.");
            return Ok(());
        }

        warn!(attempts, max_attempts, "snapshot still non-conforming after repair");
        if attempts >= max_attempts {
            return Err(ProcedureError::RepairFailed {
                attempts,
                report: outcome.report,
            });
        }
        surface_prompts(replay, console, current_steps)?;
    }
}

/// Surface each current step's prompt and block for the operator.
///
/// Any response proceeds; an affirmative one also gets the event's help
/// text, anything else a nudge to retry.
fn surface_prompts(
    replay: &dyn SensorReplay,
    console: &mut dyn OperatorConsole,
    current_steps: &[Resource],
) -> Result<(), ProcedureError> {
    for step in current_steps {
        let Some(event) = replay.event_for(step) else {
            continue;
        };
        let Some(prompt) = &event.prompt else {
            continue;
        };

        debug!(step = %step, tag = ?prompt.tag, "surfacing violation prompt");
        let response = console.prompt(&prompt.message)?;
        if response.trim().to_lowercase().contains("yes") {
            if let Some(help) = &prompt.affirming_help {
                console.say(help);
            }
        } else {
            console.say("Please try again.");
        }
    }
    Ok(())
}

/// Undo every mutation the current steps' events applied, newest first.
fn reverse_event_mutations(
    graph: &mut GraphStore,
    replay: &dyn SensorReplay,
    current_steps: &[Resource],
) {
    let mut applied = Vec::new();
    for step in current_steps {
        if let Some(event) = replay.event_for(step) {
            applied.extend(event.mutations.iter().cloned());
        }
    }
    for mutation in applied.iter().rev() {
        graph.apply(&mutation.inverse());
    }
    debug!(reversed = applied.len(), "event mutations reversed");
}
