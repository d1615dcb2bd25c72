//! Free-text question answering over the current procedure context.
//!
//! Questions are classified once into a tagged [`Intent`], in fixed
//! precedence order: next-step questions win over zoom requests, which win
//! over camera positioning, with a generic fallback last. Classification is
//! deterministic keyword matching; no semantic validation of the rest of the
//! sentence happens.

use crate::console::OperatorConsole;
use crate::procedure::ProcedureGraph;
use ortwin_graph::{GraphStore, Resource};
use std::io;

/// Aspect of the next step a question asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Tool,
    Actor,
    Capability,
    Material,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Classified operator question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// "next step" question, optionally about a specific aspect.
    NextStep(Option<Topic>),
    /// Camera zoom request.
    Zoom(Option<ZoomDirection>),
    /// Camera angle/position request, with the first integer in the text.
    CameraAngle(Option<u32>),
    /// Nothing matched.
    Unknown,
}

/// Classify a question in one pass. Matching is case-insensitive.
#[must_use]
pub fn classify(text: &str) -> Intent {
    let text = text.to_lowercase();

    if text.contains("next step") {
        let topic = if text.contains("tool") {
            Some(Topic::Tool)
        } else if text.contains("actor") {
            Some(Topic::Actor)
        } else if text.contains("capability") || text.contains("capabilities") {
            Some(Topic::Capability)
        } else if text.contains("material") {
            Some(Topic::Material)
        } else {
            None
        };
        return Intent::NextStep(topic);
    }

    if text.contains("zoom") {
        let direction = if text.contains("in") {
            Some(ZoomDirection::In)
        } else if text.contains("out") {
            Some(ZoomDirection::Out)
        } else {
            None
        };
        return Intent::Zoom(direction);
    }

    if text.contains("angle") || text.contains("position") {
        return Intent::CameraAngle(first_integer(&text));
    }

    Intent::Unknown
}

/// Answer a question against the current context.
///
/// May block on the console when a camera question arrives without a
/// position value.
pub fn answer(
    store: &GraphStore,
    current_steps: &[Resource],
    text: &str,
    console: &mut dyn OperatorConsole,
) -> io::Result<String> {
    let graph = ProcedureGraph::new(store);

    let reply = match classify(text) {
        Intent::NextStep(topic) => {
            let next = graph.next_steps(current_steps);
            if next.is_empty() {
                "There are no more steps to perform in this phase.".to_owned()
            } else {
                match topic {
                    Some(topic) => describe_topic(&graph, &next, topic),
                    None => "Sorry, I didn't understand the question.".to_owned(),
                }
            }
        }
        Intent::Zoom(Some(ZoomDirection::In)) => "Zooming in...".to_owned(),
        Intent::Zoom(Some(ZoomDirection::Out)) => "Zooming out...".to_owned(),
        Intent::Zoom(None) => "Sorry, I didn't understand the question.".to_owned(),
        Intent::CameraAngle(Some(position)) => {
            format!("Setting camera angle to position {position}.")
        }
        Intent::CameraAngle(None) => {
            let position = console.prompt("What position would you like to set the camera to? ")?;
            format!("Setting camera angle to position {}.", position.trim())
        }
        Intent::Unknown => "Sorry, I don't know how to answer that question.".to_owned(),
    };

    Ok(reply)
}

fn describe_topic(graph: &ProcedureGraph<'_>, next: &[Resource], topic: Topic) -> String {
    let (labels, empty_msg, prefix) = match topic {
        Topic::Tool => (
            graph.tools_for_steps(next),
            "I don't know of any tools needed for the next step.",
            "Tools needed for the next step: ",
        ),
        Topic::Actor => (
            graph.actors_for_steps(next),
            "I don't know of any actors needed for the next step.",
            "Actors needed for the next step: ",
        ),
        Topic::Capability => (
            graph.capabilities_for_steps(next),
            "I don't know of any capabilities needed for the next step.",
            "Actors in the next step(s) must have the following capabilities: ",
        ),
        Topic::Material => (
            graph.materials_for_steps(next),
            "I don't know of any materials needed for the next step.",
            "Materials needed for the next step: ",
        ),
    };

    if labels.is_empty() {
        empty_msg.to_owned()
    } else {
        format!("{prefix}{}", and_join(&labels))
    }
}

/// Join items with ", ", using " and " before the final item.
///
/// ```
/// use ortwin_core::question::and_join;
/// assert_eq!(and_join(&["Scalpel".into()]), "Scalpel");
/// assert_eq!(and_join(&["Scalpel".into(), "Retractor".into()]), "Scalpel and Retractor");
/// ```
#[must_use]
pub fn and_join(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn first_integer(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
