//! Trigger drivers.
//!
//! Both drivers serialize triggers onto the controller. The timed driver
//! runs a tokio interval on its own task, feeding a bounded(1) channel whose
//! single consumer owns the controller; while an operator prompt blocks the
//! consumer, the full channel suspends the ticker. The interactive driver is
//! a single-threaded read-eval loop, so serialization holds by construction
//! and nested prompts share stdin with the command reader.

use crate::console::StdConsole;
use ortwin_core::{ProcedureController, ProcedureError};
use std::io::{self, BufRead};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Trigger fed to the timed consumer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Advance one transition.
    Tick,
    /// End the run from any state.
    Terminate,
}

/// Drive the procedure with an advance trigger every `interval`.
///
/// Ctrl-C terminates between transitions.
pub async fn run_timed(
    controller: ProcedureController<StdConsole>,
    interval: Duration,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<Trigger>(1);

    let ticker = {
        let tx = tx.clone();
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            loop {
                ticker.tick().await;
                if tx.send(Trigger::Tick).await.is_err() {
                    break;
                }
            }
        })
    };

    let signals = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(Trigger::Terminate).await;
        }
    });

    let worker = tokio::task::spawn_blocking(move || -> Result<(), ProcedureError> {
        let mut controller = controller;
        controller.start()?;
        while !controller.is_finished() {
            match rx.blocking_recv() {
                Some(Trigger::Tick) => controller.advance_trigger()?,
                Some(Trigger::Terminate) | None => controller.terminate(),
            }
        }
        Ok(())
    });

    let result = worker.await;
    ticker.abort();
    signals.abort();
    result??;
    Ok(())
}

/// Drive the procedure from stdin.
///
/// Commands: empty line advances, `? <question>` asks, `quit` ends.
pub fn run_interactive(
    mut controller: ProcedureController<StdConsole>,
) -> Result<(), ProcedureError> {
    controller.start()?;

    let stdin = io::stdin();
    while !controller.is_finished() {
        println!("[Press Enter to proceed to the next step, '? <question>' to ask, 'quit' to end.]");

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // stdin closed
            controller.terminate();
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            controller.advance_trigger()?;
        } else if let Some(rest) = line.strip_prefix('?') {
            let question = match rest.trim() {
                "" => prompt_question()?,
                text => text.to_owned(),
            };
            controller.ask_question(&question)?;
        } else if matches!(line, "quit" | "exit" | "q") {
            controller.terminate();
        } else {
            debug!(command = line, "unrecognized command");
            println!("Unrecognized command. Press Enter to proceed or '?' to ask a question.");
        }
    }
    Ok(())
}

fn prompt_question() -> io::Result<String> {
    println!("\nIn question mode. What is your question?");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}
