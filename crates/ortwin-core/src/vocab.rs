//! Predicate vocabulary of the procedure ontology.
//!
//! Names match the materialized snapshot the reasoner hands over. The
//! `co-occur` property of the source ontology arrives here as `coOccursWith`;
//! it is symmetric, and every query that touches it checks both directions.

/// Step S2 `follows` step S1.
pub const FOLLOWS: &str = "follows";
/// Step S1 `followedBy` step S2.
pub const FOLLOWED_BY: &str = "followedBy";
/// Symmetric co-occurrence between steps performed jointly.
pub const CO_OCCURS_WITH: &str = "coOccursWith";

/// Plan `hasPhase` phase.
pub const HAS_PHASE: &str = "hasPhase";
/// Phase `phaseOrder` integer literal.
pub const PHASE_ORDER: &str = "phaseOrder";
/// Phase `phaseStartStep` its first step.
pub const PHASE_START_STEP: &str = "phaseStartStep";
/// Phase `phaseTask` its task label node.
pub const PHASE_TASK: &str = "phaseTask";
/// Phase `isFinalPhase` boolean literal.
pub const IS_FINAL_PHASE: &str = "isFinalPhase";

/// Step `stepAction` its action label node.
pub const STEP_ACTION: &str = "stepAction";
/// Step `toolUsed` tool.
pub const TOOL_USED: &str = "toolUsed";
/// Step `actorPresent` actor that must be present.
pub const ACTOR_PRESENT: &str = "actorPresent";
/// Step `capabilityRequired` capability an actor must have.
pub const CAPABILITY_REQUIRED: &str = "capabilityRequired";
/// Step `materialUsed` material.
pub const MATERIAL_USED: &str = "materialUsed";
