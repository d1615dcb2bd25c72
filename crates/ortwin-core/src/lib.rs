//! ORTWIN Core - Procedure state machine
//!
//! The engine that walks an instrumented procedure:
//! - Navigates the plan/phase/step structure through typed fact-graph queries
//! - Applies sensor events to the world-state snapshot
//! - Runs the validate -> violate -> repair -> recheck loop
//! - Answers free-text operator questions over the current context
//!
//! Ontology reasoning, constraint engines, and the console front end stay
//! outside this crate; they appear here only as seams ([`SensorReplay`],
//! [`ConstraintValidator`], [`OperatorConsole`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use ortwin_core::{Cursor, ProcedureController, ControllerConfig};
//!
//! let mut controller = ProcedureController::new(
//!     graph, cursor, replay, validator, console, ControllerConfig::default(),
//! );
//! controller.start()?;
//! while !controller.is_finished() {
//!     controller.advance_trigger()?;
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod console;
pub mod controller;
pub mod error;
pub mod navigator;
pub mod procedure;
pub mod question;
pub mod replay;
pub mod validate;
pub mod violation;
pub mod vocab;

// Re-exports for convenience
pub use console::{OperatorConsole, ScriptedConsole};
pub use controller::{ControllerConfig, ProcedureController, RunState};
pub use error::{ProcedureError, ReplayError, StructureError};
pub use navigator::{advance, next_steps, Advance, Cursor};
pub use procedure::{PhaseTransition, ProcedureGraph};
pub use question::{answer, classify, Intent, Topic, ZoomDirection};
pub use replay::{JsonReplay, SensorEvent, SensorReplay, StepPrompt};
pub use validate::{Conformance, ConstraintValidator, FactRule, FactRules};
