//! Sensor replay: scripted world-state mutations keyed by step id.
//!
//! A replay file is a JSON object mapping step ids to events:
//!
//! ```json
//! {
//!   "Step_A1_1": {
//!     "action": "add",
//!     "triples": [
//!       { "subject": "Patient", "predicate": "positionConfirmed", "object": true }
//!     ],
//!     "message": "Has the patient been positioned? ",
//!     "description": "Step failure check",
//!     "affirming help message": "Re-check the table locks before continuing."
//!   }
//! }
//! ```
//!
//! Malformed entries fail parsing with a diagnostic; nothing is skipped
//! silently.

use crate::error::ReplayError;
use ortwin_graph::{Fact, Mutation, MutationOp, Resource, Term};
use serde::Deserialize;
use std::collections::HashMap;

/// Operator prompt attached to a sensor event, surfaced on violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPrompt {
    pub message: String,
    /// Free-form tag describing what kind of check the prompt belongs to.
    pub tag: Option<String>,
    /// Extra guidance shown when the operator answers affirmatively.
    pub affirming_help: Option<String>,
}

/// Ordered fact mutations for one step, plus an optional prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorEvent {
    pub mutations: Vec<Mutation>,
    pub prompt: Option<StepPrompt>,
}

/// Source of sensor events, keyed by step id.
pub trait SensorReplay {
    fn event_for(&self, step: &Resource) -> Option<&SensorEvent>;
}

/// Replay backed by the JSON file format above.
#[derive(Debug, Clone, Default)]
pub struct JsonReplay {
    events: HashMap<Resource, SensorEvent>,
}

impl JsonReplay {
    pub fn from_json_str(raw: &str) -> Result<Self, ReplayError> {
        let raw: HashMap<String, RawEvent> = serde_json::from_str(raw)?;
        let mut events = HashMap::with_capacity(raw.len());
        for (step, event) in raw {
            let event = event.into_event(&step)?;
            events.insert(Resource::new(step), event);
        }
        Ok(Self { events })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl SensorReplay for JsonReplay {
    fn event_for(&self, step: &Resource) -> Option<&SensorEvent> {
        self.events.get(step)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEvent {
    action: String,
    #[serde(default)]
    triples: Vec<RawTriple>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "affirming help message")]
    affirming_help_message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTriple {
    subject: String,
    predicate: String,
    object: serde_json::Value,
}

impl RawEvent {
    fn into_event(self, step: &str) -> Result<SensorEvent, ReplayError> {
        let op = match self.action.as_str() {
            "add" => MutationOp::Add,
            "remove" => MutationOp::Remove,
            other => {
                return Err(ReplayError::UnknownAction {
                    step: step.to_owned(),
                    action: other.to_owned(),
                })
            }
        };

        let mut mutations = Vec::with_capacity(self.triples.len());
        for triple in self.triples {
            let object = parse_object(step, triple.object)?;
            mutations.push(Mutation {
                op,
                fact: Fact::new(triple.subject, triple.predicate, object),
            });
        }

        let prompt = self.message.map(|message| StepPrompt {
            message,
            tag: self.description,
            affirming_help: self.affirming_help_message,
        });

        Ok(SensorEvent { mutations, prompt })
    }
}

fn parse_object(step: &str, value: serde_json::Value) -> Result<Term, ReplayError> {
    match value {
        serde_json::Value::Bool(b) => Ok(Term::Bool(b)),
        serde_json::Value::String(s) => Ok(Term::node(s)),
        serde_json::Value::Number(n) => {
            n.as_i64()
                .map(Term::Int)
                .ok_or_else(|| ReplayError::MalformedObject {
                    step: step.to_owned(),
                    value: n.to_string(),
                })
        }
        other => Err(ReplayError::MalformedObject {
            step: step.to_owned(),
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_event_with_prompt() {
        let replay = JsonReplay::from_json_str(
            r#"{
                "Step_A1_1": {
                    "action": "add",
                    "triples": [
                        { "subject": "Patient", "predicate": "positionConfirmed", "object": true },
                        { "subject": "Step_A1_1", "predicate": "toolUsed", "object": "Clamp" }
                    ],
                    "message": "Did positioning fail? ",
                    "description": "Step failure check",
                    "affirming help message": "Re-check the table locks."
                }
            }"#,
        )
        .unwrap();

        let event = replay.event_for(&Resource::new("Step_A1_1")).unwrap();
        assert_eq!(event.mutations.len(), 2);
        assert_eq!(event.mutations[0].op, MutationOp::Add);
        assert_eq!(event.mutations[0].fact.object, Term::Bool(true));

        let prompt = event.prompt.as_ref().unwrap();
        assert_eq!(prompt.tag.as_deref(), Some("Step failure check"));
        assert_eq!(prompt.affirming_help.as_deref(), Some("Re-check the table locks."));
    }

    #[test]
    fn test_event_without_message_has_no_prompt() {
        let replay = JsonReplay::from_json_str(
            r#"{ "Step_B1_1": { "action": "remove", "triples": [] } }"#,
        )
        .unwrap();
        let event = replay.event_for(&Resource::new("Step_B1_1")).unwrap();
        assert!(event.prompt.is_none());
        assert!(event.mutations.is_empty());
    }

    #[test]
    fn test_unknown_action_is_an_error() {
        let err = JsonReplay::from_json_str(
            r#"{ "Step_A1_1": { "action": "toggle", "triples": [] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReplayError::UnknownAction { ref action, .. } if action == "toggle"));
    }

    #[test]
    fn test_malformed_object_is_an_error() {
        let err = JsonReplay::from_json_str(
            r#"{
                "Step_A1_1": {
                    "action": "add",
                    "triples": [ { "subject": "s", "predicate": "p", "object": [1, 2] } ]
                }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReplayError::MalformedObject { .. }));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = JsonReplay::from_json_str(
            r#"{ "Step_A1_1": { "action": "add", "sensor": "drift" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReplayError::Parse(_)));
    }
}
